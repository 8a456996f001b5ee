use crate::common;
use cairn_gen::pom::PomConfig;
use std::path::Path;

pub fn run(workdir: &Path, parent: &str, group: String, version: String) -> anyhow::Result<()> {
    let libs = common::staged_libraries(workdir)?;
    let (model, records) = common::discover_model(workdir, &libs)?;
    let config = PomConfig { group, version };
    cairn_gen::pom::generate(&model, &libs, &records, &config, parent, workdir)?;
    Ok(())
}
