use crate::common;
use std::path::Path;

pub fn run(workdir: &Path) -> anyhow::Result<()> {
    let libs = common::staged_libraries(workdir)?;
    let (model, _) = common::discover_model(workdir, &libs)?;
    cairn_gen::links::link_gen_srcs(&model, workdir)?;
    cairn_gen::idea::generate(&model, &libs, workdir)?;
    Ok(())
}
