use crate::{common, status};
use cairn_maven::{ChecksumStore, Ext, LockedArtifact, LockedLibrary, Lockfile};
use std::path::Path;

/// Refreshes the lockfile from the remote repository: jar checksums are
/// required, missing sources checksums drop the source pin.
pub fn run(workdir: &Path) -> anyhow::Result<()> {
    let libs = common::staged_libraries(workdir)?;
    let sums = ChecksumStore::new();

    let mut locked = Vec::new();
    for (target, lib) in libs.iter() {
        if lib.options.internal {
            continue;
        }
        let mut jars = Vec::new();
        let mut srcs = Vec::new();
        for (i, jar) in lib.jars.iter().enumerate() {
            let sha1 = sums
                .fetch(jar, Ext::JarSum, false)?
                .unwrap_or_default();
            jars.push(LockedArtifact {
                coords: jar.to_string(),
                sha1,
            });
            if let Some(src) = lib.srcs.get(i).and_then(|s| s.as_ref()) {
                if let Some(sha1) = sums.fetch(src, Ext::SrcSum, true)? {
                    srcs.push(LockedArtifact {
                        coords: src.to_string(),
                        sha1,
                    });
                }
            }
        }
        locked.push(LockedLibrary {
            target: target.clone(),
            jars,
            srcs,
        });
    }

    Lockfile::new(locked).store(workdir)?;
    status::info(&format!("Locked {} libraries", libs.len()));
    Ok(())
}
