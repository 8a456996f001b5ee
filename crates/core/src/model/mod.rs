pub mod dep;
pub mod module;
pub mod source_root;

pub use dep::{DepFlags, DependencyEdge, Flagged, LibraryDep, ModuleDep, merge_into};
pub use module::{Module, UNASSIGNED};
pub use source_root::{ResourceKind, SourceRoot, insert_unique};
