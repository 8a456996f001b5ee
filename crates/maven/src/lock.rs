use crate::checksums::ChecksumStore;
use crate::coords::{Coords, Ext};
use crate::error::{MavenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOCKFILE: &str = ".cairn.lock.json";

const GEN_BANNER: &str =
    "Generated by `cairn uplock`, do not edit, manual edits will be overridden";

/// Pinned checksums for staged libraries. Not a cache: an explicit,
/// committed artifact that makes library generation reproducible and
/// offline-capable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lockfile {
    pub note: String,
    pub libs: Vec<LockedLibrary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedLibrary {
    pub target: String,
    pub jars: Vec<LockedArtifact>,
    pub srcs: Vec<LockedArtifact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedArtifact {
    pub coords: String,
    pub sha1: String,
}

impl Lockfile {
    pub fn new(libs: Vec<LockedLibrary>) -> Self {
        Lockfile {
            note: GEN_BANNER.to_string(),
            libs,
        }
    }

    pub fn exists(workdir: &Path) -> bool {
        workdir.join(LOCKFILE).exists()
    }

    pub fn load(workdir: &Path) -> Result<Lockfile> {
        let path = workdir.join(LOCKFILE);
        if !path.exists() {
            return Err(MavenError::MissingLockfile(LOCKFILE.to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn store(&self, workdir: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(workdir.join(LOCKFILE), data)?;
        Ok(())
    }

    /// Seeds the checksum store so later lookups never hit the network.
    pub fn seed(&self, sums: &mut ChecksumStore) -> Result<()> {
        for lib in &self.libs {
            for jar in &lib.jars {
                sums.set(&Coords::parse(&jar.coords)?, Ext::JarSum, &jar.sha1);
            }
            for src in &lib.srcs {
                sums.set(&Coords::parse(&src.coords)?, Ext::SrcSum, &src.sha1);
            }
        }
        Ok(())
    }
}
