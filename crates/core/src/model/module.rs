use super::dep::{DependencyEdge, LibraryDep, ModuleDep};
use super::source_root::SourceRoot;
use indexmap::IndexMap;
use std::fmt;

/// Placeholder until the naming phase runs; never leaks out of a
/// completed discovery.
pub const UNASSIGNED: &str = "__UNASSIGNED__";

/// One IDE module discovered from an origin target. Mutated only during
/// the discovery phases, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Module {
    /// Repository-relative folder; the module's stable identity.
    pub path: String,
    /// Globally unique display name, assigned by the naming phase.
    pub name: String,
    /// Package prefix for package-style modules.
    pub package: Option<String>,
    /// Source roots keyed by alias.
    pub srcs: IndexMap<String, SourceRoot>,
    /// Raw dependency edges keyed by resolved target identity.
    pub deps: IndexMap<String, DependencyEdge>,
    /// Wired sibling-module edges keyed by module path.
    pub dep_modules: IndexMap<String, ModuleDep>,
    /// Wired library edges (transitively closed) keyed by library target.
    pub dep_libraries: IndexMap<String, LibraryDep>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Module {
            path: path.into(),
            name: UNASSIGNED.to_string(),
            package: None,
            srcs: IndexMap::new(),
            deps: IndexMap::new(),
            dep_modules: IndexMap::new(),
            dep_libraries: IndexMap::new(),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "//{} [{}] {}",
            self.path,
            self.name,
            self.srcs.keys().cloned().collect::<Vec<_>>().join(", ")
        )
    }
}
