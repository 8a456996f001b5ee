//! Steps shared by every project-generating command: staging libraries
//! from the manifest, seeding checksums from the lockfile, and running
//! discovery against the build tool.

use crate::status;
use anyhow::Context;
use cairn_buck::{BuckCli, TargetCatalog, TargetRecord};
use cairn_core::discovery::DEFAULT_PATTERN;
use cairn_core::library::MANIFEST;
use cairn_core::{DiscoverOptions, LibraryCatalog, LogDiagnostics, ProjectModel, discover};
use cairn_maven::{ChecksumStore, Lockfile};
use std::path::Path;

pub fn staged_libraries(workdir: &Path) -> anyhow::Result<LibraryCatalog> {
    let manifest = LibraryCatalog::load_manifest(workdir)
        .with_context(|| format!("reading {MANIFEST}"))?;
    let libs = LibraryCatalog::from_manifest(&manifest)?;
    status::info(&format!("Libraries: {}", libs.len()));
    Ok(libs)
}

/// Lockfile-seeded checksum store; fresh checksums are fetched only for
/// artifacts the lockfile does not pin.
pub fn checksum_store(workdir: &Path) -> anyhow::Result<ChecksumStore> {
    let mut sums = ChecksumStore::new();
    if Lockfile::exists(workdir) {
        Lockfile::load(workdir)?.seed(&mut sums)?;
    }
    Ok(sums)
}

pub fn discover_model(
    workdir: &Path,
    libs: &LibraryCatalog,
) -> anyhow::Result<(ProjectModel, Vec<TargetRecord>)> {
    let mut catalog = BuckCli::new(workdir);
    let mut diag = LogDiagnostics;
    let options = DiscoverOptions::new(workdir);
    let model = discover(&mut catalog, libs, &mut diag, &options)?;
    status::info(&model.to_string());
    // memoized by the catalog, no extra build tool call
    let records = catalog.query(DEFAULT_PATTERN)?;
    Ok((model, records))
}
