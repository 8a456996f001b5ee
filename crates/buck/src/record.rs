use crate::error::Result;
use crate::target::Target;
use serde::{Deserialize, Serialize};

/// Suffix convention that classifies a rule as test-only
/// (`java_test`, `kotlin_test`, ...).
const TEST_RULE_SUFFIX: &str = "_test";

/// One target record as reported by `buck targets --json`. Attribute
/// names follow Buck's JSON output; everything not listed here is
/// ignored at deserialization.
///
/// Dependency attributes are required to be JSON arrays; a bare string
/// where a list is expected fails parsing instead of being coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetRecord {
    #[serde(rename = "fully_qualified_name")]
    pub qualified_name: String,
    #[serde(rename = "buck.type", default)]
    pub rule_type: String,
    #[serde(rename = "buck.base_path", default)]
    pub base_path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub out: Option<String>,
    #[serde(rename = "buck.outputPath", default)]
    pub output_path: Option<String>,
    #[serde(rename = "buck.generatedSourcePath", default)]
    pub generated_source_path: Option<String>,
    #[serde(rename = "resourcesRoot", default)]
    pub resources_root: Option<String>,
    #[serde(rename = "maven_coords", default)]
    pub maven_coords: Option<String>,
    #[serde(rename = "annotationProcessors", default)]
    pub annotation_processors: Vec<String>,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub deps: Vec<String>,
    #[serde(rename = "providedDeps", default)]
    pub provided_deps: Vec<String>,
    #[serde(rename = "exportedDeps", default)]
    pub exported_deps: Vec<String>,
    #[serde(rename = "exportedProvidedDeps", default)]
    pub exported_provided_deps: Vec<String>,
}

impl TargetRecord {
    /// The record's own identity. Malformed identities abort discovery,
    /// a catalog that emits them is structurally inconsistent.
    pub fn target(&self) -> Result<Target> {
        Target::parse(&self.qualified_name)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Test classification is purely convention based: rule kind ends in
    /// the `_test` suffix.
    pub fn is_test_rule(&self) -> bool {
        self.rule_type.len() > TEST_RULE_SUFFIX.len()
            && self.rule_type.ends_with(TEST_RULE_SUFFIX)
    }

    /// Whether the rule declares code generation via annotation
    /// processors or compiler plugins.
    pub fn uses_codegen(&self) -> bool {
        !self.plugins.is_empty() || !self.annotation_processors.is_empty()
    }
}
