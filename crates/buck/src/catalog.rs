use crate::error::{BuckError, Result};
use crate::record::TargetRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Answers a target-pattern query with the ordered records the build tool
/// reports for it. Implementations may memoize per pattern.
pub trait TargetCatalog {
    fn query(&mut self, pattern: &str) -> Result<Vec<TargetRecord>>;
}

/// Catalog backed by the `buck` command line. Query results are cached
/// per pattern for the lifetime of the value.
pub struct BuckCli {
    workdir: PathBuf,
    cache: HashMap<String, Vec<TargetRecord>>,
}

impl BuckCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        BuckCli {
            workdir: workdir.into(),
            cache: HashMap::new(),
        }
    }

    /// Clears memoized query results, forcing fresh catalog calls.
    pub fn drop_cache(&mut self) {
        self.cache.clear();
    }

    /// Runs `buck fetch` over the whole repository so remote artifacts
    /// are materialized before symlinking.
    pub fn fetch_all(&self) -> Result<()> {
        run(&self.workdir, &["fetch", "//..."])?;
        Ok(())
    }

    fn targets(&self, pattern: &str) -> Result<Vec<TargetRecord>> {
        let out = run(
            &self.workdir,
            &["targets", pattern, "--json", "--show-output"],
        )?;
        Ok(serde_json::from_str(&out)?)
    }
}

impl TargetCatalog for BuckCli {
    fn query(&mut self, pattern: &str) -> Result<Vec<TargetRecord>> {
        if let Some(cached) = self.cache.get(pattern) {
            return Ok(cached.clone());
        }
        let records = self.targets(pattern)?;
        self.cache.insert(pattern.to_string(), records.clone());
        Ok(records)
    }
}

fn run(workdir: &Path, args: &[&str]) -> Result<String> {
    let command = format!("buck {}", args.join(" "));
    debug!(%command, "exec");
    let output = Command::new("buck")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|source| BuckError::Exec {
            command: command.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(BuckError::ExitStatus {
            command,
            status: output.status.code().unwrap_or(-1),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
