pub mod catalog;
pub mod error;
pub mod record;
pub mod rules;
pub mod target;

pub use catalog::{BuckCli, TargetCatalog};
pub use error::{BuckError, Result};
pub use record::TargetRecord;
pub use target::{Target, flatname};
