mod deps;
mod naming;
mod sources;
mod wiring;

use crate::diag::Diagnostics;
use crate::error::Result;
use crate::library::LibraryCatalog;
use crate::model::Module;
use cairn_buck::{TargetCatalog, TargetRecord};
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Catalog pattern covering the whole workspace.
pub const DEFAULT_PATTERN: &str = "//...";

/// Marker labels understood by the classifier.
pub(crate) mod labels {
    /// Forces module creation for an origin target without a source folder.
    pub const MODULE: &str = "ide_mod";
    /// Package-style module: folder nesting equals package nesting.
    pub const PACKAGE_MODULE: &str = "ide_mod_package";
    pub const RESOURCES: &str = "ide_res";
    pub const TEST_RESOURCES: &str = "ide_test_res";
    /// Opts a code-generating rule out of generated source roots.
    pub const NO_GEN_SRCS: &str = "ide_no_gen_srcs";
}

/// Rule kind whose dependencies are build-time only and never
/// contribute compile edges or source roots.
pub(crate) const ANNOTATION_PROCESSOR_RULE: &str = "java_annotation_processor";

#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// Workspace root; source-folder attributes are validated against it.
    pub workdir: PathBuf,
    /// Reserved name of the root project, claimed before any module.
    pub root_name: String,
    /// Extra catalog patterns queried after the default one.
    pub extra_patterns: Vec<String>,
}

impl DiscoverOptions {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        let workdir = workdir.into();
        let root_name = workdir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("workspace")
            .to_string();
        DiscoverOptions {
            workdir,
            root_name,
            extra_patterns: Vec::new(),
        }
    }

    pub fn with_root_name(mut self, root_name: impl Into<String>) -> Self {
        self.root_name = root_name.into();
        self
    }

    pub fn add_targets(mut self, pattern: impl Into<String>) -> Self {
        self.extra_patterns.push(pattern.into());
        self
    }
}

/// The populated result of one discovery run: modules keyed by folder
/// path, in origin-collection order. Read-mostly; downstream generators
/// only read it.
#[derive(Debug)]
pub struct ProjectModel {
    pub root_name: String,
    pub modules: IndexMap<String, Module>,
}

impl ProjectModel {
    pub fn get(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Display for ProjectModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modules")?;
        for module in self.iter() {
            write!(f, "\n\t{module}")?;
        }
        Ok(())
    }
}

/// One-shot discovery pipeline: collect origin targets, classify source
/// roots and raw dependency edges, add generated roots, assign unique
/// module names, wire edges to sibling modules and libraries.
///
/// Returns a fresh `ProjectModel` per call; rerunning over an unchanged
/// catalog yields an identical model.
pub fn discover(
    catalog: &mut dyn TargetCatalog,
    libs: &LibraryCatalog,
    diag: &mut dyn Diagnostics,
    options: &DiscoverOptions,
) -> Result<ProjectModel> {
    let mut records: Vec<TargetRecord> = catalog.query(DEFAULT_PATTERN)?;
    for pattern in &options.extra_patterns {
        records.extend(catalog.query(pattern)?);
    }

    let mut modules = sources::collect_origins(&records)?;
    let module_by_target =
        sources::define_sources_and_deps(&mut modules, &records, &options.workdir)?;
    sources::define_generated_sources(&mut modules, &records)?;
    naming::assign_names(&mut modules, &options.root_name);
    wiring::wire_dependencies(&mut modules, &module_by_target, libs, diag)?;

    info!(
        modules = modules.len(),
        records = records.len(),
        "discovery complete"
    );

    Ok(ProjectModel {
        root_name: options.root_name.clone(),
        modules,
    })
}
