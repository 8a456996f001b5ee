mod common;
mod eclipse;
mod intellij;
mod libs;
mod mvn;
mod pom;
pub mod status;
mod uplock;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cairn",
    version,
    about = "Generates IDE projects and library rules from build metadata",
    long_about = "Cairn reads target metadata from the build tool, resolves it into IDE \
                  modules with classified source roots and wired dependencies, and writes \
                  IntelliJ, Eclipse and Maven project files alongside the code."
)]
pub struct Cli {
    /// Trace command line calls and created files on stderr
    #[arg(long, global = true)]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate library BUCK rules, fetch artifacts and link jars
    Lib,
    /// Refresh the checksum lockfile from the remote repository
    Uplock,
    /// Generate an IntelliJ IDEA project
    Intellij,
    /// Generate an Eclipse project
    Eclipse,
    /// Generate Maven POMs for publishable modules
    Pom {
        /// Parent POM path, instantiated from its `.template.xml` sibling
        #[arg(long, default_value = "pom.xml")]
        parent: String,

        /// Group id of the parent POM
        #[arg(long, default_value = "group")]
        group: String,

        /// Version of the parent POM
        #[arg(long, default_value = "0-SNAPSHOT")]
        version: String,
    },
    /// Print JSON info about Maven coordinates
    Mvn {
        /// Coordinates, `group:artifact:version` or `group:artifact:classifier:version`
        #[arg(value_name = "COORDS")]
        coords: String,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = if cli.trace { "debug" } else { "info" };
    let _guard = cairn_core::logging::init_logging("cli", cli.trace, filter);

    let workdir: PathBuf = std::env::current_dir()?;
    match cli.command {
        Commands::Lib => libs::run(&workdir)?,
        Commands::Uplock => uplock::run(&workdir)?,
        Commands::Intellij => intellij::run(&workdir)?,
        Commands::Eclipse => eclipse::run(&workdir)?,
        Commands::Pom {
            parent,
            group,
            version,
        } => pom::run(&workdir, &parent, group, version)?,
        Commands::Mvn { coords } => mvn::run(&coords)?,
    }
    status::ok("OK");
    Ok(())
}
