//! Writes a `BUCK` file into each fetched library's folder: a facade
//! rule plus `prebuilt_jar`/`remote_file` groups with pinned SHA-1s.

use crate::error::Result;
use crate::out;
use cairn_buck::rules::{LibraryRuleOptions, RemoteArtifact, library_rules};
use cairn_core::{Library, LibraryCatalog};
use cairn_maven::{ChecksumStore, Coords, Ext};
use std::path::Path;
use tracing::{info, warn};

pub fn generate(libs: &LibraryCatalog, sums: &mut ChecksumStore, workdir: &Path) -> Result<()> {
    for (_, lib) in libs.iter() {
        if lib.options.internal {
            continue;
        }
        info!(library = %lib.name(), "writing BUCK rules");
        out::write(
            workdir,
            format!("{}/BUCK", lib.target.path),
            &build_file(lib, sums)?,
        )?;
    }
    Ok(())
}

fn build_file(lib: &Library, sums: &mut ChecksumStore) -> Result<String> {
    let jars = lib
        .jars
        .iter()
        .map(|c| jar_artifact(c, sums))
        .collect::<Result<Vec<_>>>()?;
    let srcs: Vec<Option<RemoteArtifact>> = lib
        .srcs
        .iter()
        .map(|s| s.as_ref().and_then(|c| src_artifact(c, sums)))
        .collect();
    let options = LibraryRuleOptions {
        deps: lib.options.deps.clone(),
        processor: lib.options.processor.clone(),
        processor_library: lib.options.processor_library.clone(),
    };
    Ok(library_rules(&lib.target, &jars, &srcs, &options).concat())
}

fn jar_artifact(coords: &Coords, sums: &mut ChecksumStore) -> Result<RemoteArtifact> {
    Ok(RemoteArtifact {
        coords: coords.to_string(),
        file: coords.filename_jar(),
        url: coords.remote_with(Ext::Jar),
        sha1: sums.get(coords, Ext::JarSum)?,
    })
}

/// A missing sources jar drops the source attachment rather than
/// failing the whole library.
fn src_artifact(coords: &Coords, sums: &mut ChecksumStore) -> Option<RemoteArtifact> {
    match sums.get(coords, Ext::SrcSum) {
        Ok(sha1) => Some(RemoteArtifact {
            coords: coords.to_string(),
            file: coords.filename_src(),
            url: coords.remote_with(Ext::Src),
            sha1,
        }),
        Err(e) => {
            warn!("{e}");
            None
        }
    }
}
