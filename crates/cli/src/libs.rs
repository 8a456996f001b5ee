use crate::{common, status};
use cairn_buck::{BuckCli, TargetCatalog};
use cairn_core::discovery::DEFAULT_PATTERN;
use std::path::Path;

/// Writes BUCK rules for every staged library, fetches the artifacts
/// and links them under each library's `.jars/` folder.
pub fn run(workdir: &Path) -> anyhow::Result<()> {
    let libs = common::staged_libraries(workdir)?;
    let mut sums = common::checksum_store(workdir)?;

    cairn_gen::buckfiles::generate(&libs, &mut sums, workdir)?;

    let mut catalog = BuckCli::new(workdir);
    status::info("Fetching artifacts");
    catalog.fetch_all()?;

    let records = catalog.query(DEFAULT_PATTERN)?;
    cairn_gen::links::link_jars(&libs, &records, workdir)?;
    Ok(())
}
