use crate::error::{BuckError, Result};
use std::fmt;
use std::path::Path;

/// One build unit identity: `//folder/path:goal`, or `:goal` for a
/// target local to the declaring build file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Repository-relative folder, empty for local targets.
    pub path: String,
    pub goal: String,
}

impl Target {
    pub fn new(path: impl Into<String>, goal: impl Into<String>) -> Self {
        Target {
            path: path.into(),
            goal: goal.into(),
        }
    }

    /// Parses a qualified (`//a/b:c`, `//a/b`) or local (`:c`) specifier.
    /// A missing goal defaults to the folder basename.
    pub fn parse(spec: &str) -> Result<Target> {
        let (p, g) = match spec.split_once(':') {
            Some((p, g)) => (p, g),
            None => (spec, ""),
        };
        let path = trim_slashes(p);
        let goal = if g.is_empty() {
            basename(&path).to_string()
        } else {
            g.to_string()
        };
        if path.is_empty() && goal.is_empty() {
            return Err(BuckError::MalformedTarget(spec.to_string()));
        }
        Ok(Target { path, goal })
    }

    pub fn basename(&self) -> &str {
        basename(&self.path)
    }

    /// The "default" target of its folder: goal named after the folder.
    pub fn is_default(&self) -> bool {
        self.basename() == self.goal
    }

    pub fn is_local(&self) -> bool {
        self.path.is_empty()
    }

    /// Short form used in display output: the `:goal` suffix is omitted
    /// for default targets.
    pub fn abbr(&self) -> String {
        if self.is_default() {
            self.path.clone()
        } else {
            format!("{}:{}", self.path, self.goal)
        }
    }

    /// Anchors a local target at this target's folder; qualified targets
    /// pass through unchanged.
    pub fn resolve(&self, other: Target) -> Target {
        if other.is_local() {
            Target::new(self.path.clone(), other.goal)
        } else {
            other
        }
    }

    pub fn with_goal(&self, goal: impl Into<String>) -> Target {
        Target::new(self.path.clone(), goal)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_local() {
            write!(f, ":{}", self.goal)
        } else {
            write!(f, "//{}:{}", self.path, self.goal)
        }
    }
}

/// Flattens an arbitrary identifier (coords, target) into a rule-name-safe
/// token: `-`, `.` and `:` become `_`.
pub fn flatname(input: &str) -> String {
    input
        .chars()
        .map(|c| if matches!(c, '-' | '.' | ':') { '_' } else { c })
        .collect()
}

fn trim_slashes(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
}
