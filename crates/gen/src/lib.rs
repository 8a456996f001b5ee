pub mod buckfiles;
pub mod eclipse;
pub mod error;
pub mod idea;
pub mod links;
pub mod out;
pub mod pom;

pub use error::{GenError, Result};
