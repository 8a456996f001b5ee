use super::deps;
use super::naming::path_derived_name;
use super::{ANNOTATION_PROCESSOR_RULE, labels};
use crate::error::Result;
use crate::model::{Module, ResourceKind, SourceRoot, insert_unique, merge_into};
use cairn_buck::TargetRecord;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;

/// Phase 1: one module shell per origin target. An origin target is the
/// default target of its folder that either declares a source folder or
/// carries the module marker label. A later qualifying record for the
/// same folder replaces the earlier shell.
pub fn collect_origins(records: &[TargetRecord]) -> Result<IndexMap<String, Module>> {
    let mut modules = IndexMap::new();
    for record in records {
        let target = record.target()?;
        if target.is_default()
            && (record.resources_root.is_some() || record.has_label(labels::MODULE))
        {
            modules.insert(target.path.clone(), Module::new(target.path));
        }
    }
    Ok(modules)
}

/// Phase 2: for every record falling into a discovered module, classify
/// its source folder and collect raw dependency edges. Returns the
/// record-target → module-path index used later for sibling resolution.
///
/// Annotation processor definitions are skipped: their dependencies are
/// build-time only.
pub fn define_sources_and_deps(
    modules: &mut IndexMap<String, Module>,
    records: &[TargetRecord],
    workdir: &Path,
) -> Result<HashMap<String, String>> {
    let mut module_by_target = HashMap::new();
    for record in records {
        let target = record.target()?;
        let Some(module) = modules.get_mut(&target.path) else {
            continue;
        };
        if record.rule_type == ANNOTATION_PROCESSOR_RULE {
            continue;
        }

        let is_test = record.is_test_rule();
        if record.has_label(labels::PACKAGE_MODULE) {
            module.package = Some(path_derived_name(&module.path));
        }

        add_source_folder(module, record, is_test, workdir);
        merge_into(&mut module.deps, deps::edges_of(record, &target, is_test)?);

        module_by_target.insert(target.to_string(), target.path.clone());
    }
    Ok(module_by_target)
}

/// A declared source folder is honored only when it is the module folder
/// itself or actually present on disk. The `test` flag ORs across all
/// contributing records; resource markers come from the current record.
fn add_source_folder(module: &mut Module, record: &TargetRecord, is_test: bool, workdir: &Path) {
    let Some(folder) = &record.resources_root else {
        return;
    };
    if folder != "." && !workdir.join(&module.path).join(folder).is_dir() {
        return;
    }

    let was_test = module.srcs.get(folder).is_some_and(|existing| existing.test);
    let resources = if record.has_label(labels::RESOURCES) {
        Some(ResourceKind::Resource)
    } else if record.has_label(labels::TEST_RESOURCES) {
        Some(ResourceKind::TestResource)
    } else {
        None
    };
    module.srcs.insert(folder.clone(), SourceRoot {
        path: folder.clone(),
        test: is_test || was_test,
        generated: false,
        resources,
        package: module.package.clone(),
    });
}

/// Phase 3: generated source roots, added once all plain roots are known
/// so a generated root inherits the test flag of the base root sharing
/// its folder.
pub fn define_generated_sources(
    modules: &mut IndexMap<String, Module>,
    records: &[TargetRecord],
) -> Result<()> {
    for record in records {
        let target = record.target()?;
        let Some(module) = modules.get_mut(&target.path) else {
            continue;
        };
        add_generated_source_folder(module, record, record.is_test_rule());
    }
    Ok(())
}

fn add_generated_source_folder(module: &mut Module, record: &TargetRecord, is_test: bool) {
    let base_folder = record.resources_root.clone();
    let is_test_gen = match &base_folder {
        Some(folder) => is_test || module.srcs.get(folder).is_some_and(|root| root.test),
        None => is_test,
    };

    let mut gen_path = record.generated_source_path.clone();
    if gen_path.is_none() && is_test && record.uses_codegen() {
        // the build tool does not report a generated source path for
        // test rules; synthesize the known output location instead
        gen_path = Some(format!(
            "buck-out/annotation/{}/__{}#testsjar_gen__",
            record.base_path, record.name
        ));
    }

    let Some(gen_path) = gen_path else { return };
    if !record.uses_codegen() || record.has_label(labels::NO_GEN_SRCS) {
        return;
    }

    let alias = base_folder.unwrap_or_else(|| {
        if is_test_gen { "test" } else { "src" }.to_string()
    });
    insert_unique(&mut module.srcs, &format!("{alias}-gen"), SourceRoot {
        path: gen_path,
        test: is_test_gen,
        generated: true,
        resources: None,
        package: None,
    });
}
