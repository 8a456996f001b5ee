use crate::error::{MavenError, Result};
use std::fmt;

pub const CENTRAL_REPO: &str = "https://repo1.maven.org/maven2/";

/// Artifact file-name and checksum-uri extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ext {
    Jar,
    Src,
    JarSum,
    SrcSum,
}

impl Ext {
    pub fn suffix(self) -> &'static str {
        match self {
            Ext::Jar => ".jar",
            Ext::Src => "-sources.jar",
            Ext::JarSum => ".jar.sha1",
            Ext::SrcSum => "-sources.jar.sha1",
        }
    }
}

/// Maven coordinates: `group:artifact:version` or
/// `group:artifact:classifier:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coords {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl Coords {
    pub fn parse(input: &str) -> Result<Coords> {
        let parts: Vec<&str> = input.split(':').collect();
        match parts.as_slice() {
            [g, a, v] => Ok(Coords {
                group: g.to_string(),
                artifact: a.to_string(),
                version: v.to_string(),
                classifier: None,
            }),
            [g, a, c, v] => Ok(Coords {
                group: g.to_string(),
                artifact: a.to_string(),
                version: v.to_string(),
                classifier: Some(c.to_string()),
            }),
            _ => Err(MavenError::Coords(input.to_string())),
        }
    }

    /// Artifact file name without extension: `artifact-version[-classifier]`.
    pub fn filename(&self) -> String {
        let mut name = format!("{}-{}", self.artifact, self.version);
        if let Some(c) = &self.classifier {
            name.push('-');
            name.push_str(c);
        }
        name
    }

    pub fn filename_jar(&self) -> String {
        format!("{}{}", self.filename(), Ext::Jar.suffix())
    }

    pub fn filename_src(&self) -> String {
        format!("{}{}", self.filename(), Ext::Src.suffix())
    }

    /// Repository-relative folder of this artifact's files.
    pub fn repo_path(&self) -> String {
        format!(
            "{}/{}/{}/",
            self.group.replace('.', "/"),
            self.artifact,
            self.version
        )
    }

    /// Remote base URI of the artifact, without extension.
    pub fn remote(&self) -> String {
        format!("{}{}{}", CENTRAL_REPO, self.repo_path(), self.filename())
    }

    pub fn remote_with(&self, ext: Ext) -> String {
        format!("{}{}", self.remote(), ext.suffix())
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Classifier prints before version, matching the parse order.
        match &self.classifier {
            Some(c) => write!(
                f,
                "{}:{}:{}:{}",
                self.group, self.artifact, c, self.version
            ),
            None => write!(f, "{}:{}:{}", self.group, self.artifact, self.version),
        }
    }
}
