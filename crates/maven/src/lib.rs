pub mod checksums;
pub mod coords;
pub mod error;
pub mod lock;

pub use checksums::ChecksumStore;
pub use coords::{Coords, Ext};
pub use error::{MavenError, Result};
pub use lock::{LockedArtifact, LockedLibrary, Lockfile};
