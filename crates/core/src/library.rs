use crate::error::Result;
use cairn_buck::{Target, flatname};
use cairn_maven::Coords;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MANIFEST: &str = "cairn.json";

/// A prebuilt/external library descriptor: facade target, jar (and
/// optional sources-jar) coordinates, and its own declared dependency
/// identities.
#[derive(Debug, Clone)]
pub struct Library {
    pub target: Target,
    pub jars: Vec<Coords>,
    /// Parallel to `jars`; `None` where no sources jar is published.
    pub srcs: Vec<Option<Coords>>,
    pub options: LibraryOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryOptions {
    /// Further library targets this one depends on; closed over
    /// transitively when wiring module dependencies.
    pub deps: Vec<String>,
    /// Annotation processor class, making the facade rule a processor.
    pub processor: Option<String>,
    /// Intermediate library goal backing the processor rule.
    pub processor_library: Option<String>,
    /// Built from workspace sources rather than fetched; excluded from
    /// the lockfile.
    pub internal: bool,
    /// No sources jars published for this library.
    pub no_sources: bool,
}

impl Library {
    /// Display name used in generated IDE files: the short target form
    /// with separators flattened to dots (`lib.acme.util`).
    pub fn name(&self) -> String {
        self.target
            .abbr()
            .chars()
            .map(|c| if c == '/' || c == ':' { '.' } else { c })
            .collect()
    }

    /// File-name-safe variant of `name()`.
    pub fn flat_name(&self) -> String {
        flatname(&self.name())
    }

    /// Workspace-relative symlink path of a fetched jar.
    pub fn symlink_jar(&self, coords: &Coords) -> String {
        format!("{}/.jars/{}", self.target.path, coords.filename_jar())
    }

    /// Workspace-relative symlink path of a fetched sources jar.
    pub fn symlink_src(&self, coords: &Coords) -> String {
        format!("{}/.jars/{}", self.target.path, coords.filename_src())
    }
}

/// Declarative manifest shape (`cairn.json` at the workspace root) that
/// stages libraries before discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub libs: Vec<StagedLibrary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagedLibrary {
    pub target: String,
    pub jars: Vec<String>,
    #[serde(default)]
    pub options: LibraryOptions,
}

/// Registry of staged libraries keyed by their normalized facade target
/// identity. Fully populated before discovery starts.
#[derive(Debug, Default)]
pub struct LibraryCatalog {
    by_target: IndexMap<String, Library>,
}

impl LibraryCatalog {
    pub fn new() -> Self {
        LibraryCatalog::default()
    }

    pub fn load_manifest(workdir: &Path) -> Result<Manifest> {
        let data = std::fs::read_to_string(workdir.join(MANIFEST))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let mut catalog = LibraryCatalog::new();
        for staged in &manifest.libs {
            catalog.stage(staged)?;
        }
        Ok(catalog)
    }

    pub fn stage(&mut self, staged: &StagedLibrary) -> Result<()> {
        let target = Target::parse(&staged.target)?;
        let jars = staged
            .jars
            .iter()
            .map(|j| Coords::parse(j))
            .collect::<cairn_maven::Result<Vec<_>>>()?;
        let srcs = if staged.options.no_sources {
            vec![None; jars.len()]
        } else {
            jars.iter().cloned().map(Some).collect()
        };
        let library = Library {
            target: target.clone(),
            jars,
            srcs,
            options: staged.options.clone(),
        };
        self.by_target.insert(target.to_string(), library);
        Ok(())
    }

    pub fn contains(&self, target: &str) -> bool {
        self.by_target.contains_key(target)
    }

    pub fn get(&self, target: &str) -> Option<&Library> {
        self.by_target.get(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Library)> {
        self.by_target.iter()
    }

    pub fn len(&self) -> usize {
        self.by_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_target.is_empty()
    }
}
