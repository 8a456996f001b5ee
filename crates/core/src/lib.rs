pub mod diag;
pub mod discovery;
pub mod error;
pub mod library;
pub mod logging;
pub mod model;

pub use diag::{CollectedDiagnostics, Diagnostics, LogDiagnostics};
pub use discovery::{DiscoverOptions, ProjectModel, discover};
pub use error::{CoreError, Result};
pub use library::{Library, LibraryCatalog, LibraryOptions};
