//! Maven POM generation for publishable modules: a parent POM built
//! from a template next to it, plus one `pom.xml` per module whose
//! origin rule declares `maven_coords`.

use crate::error::Result;
use crate::out;
use cairn_buck::TargetRecord;
use cairn_core::model::{DepFlags, Module};
use cairn_core::{LibraryCatalog, ProjectModel};
use cairn_maven::Coords;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

const PUBLISHABLE_RULES: &[&str] = &["java_library", "kotlin_library"];

#[derive(Debug, Clone)]
pub struct PomConfig {
    pub group: String,
    pub version: String,
}

impl Default for PomConfig {
    fn default() -> Self {
        PomConfig {
            group: "group".to_string(),
            version: "0-SNAPSHOT".to_string(),
        }
    }
}

pub fn generate(
    model: &ProjectModel,
    libs: &LibraryCatalog,
    records: &[TargetRecord],
    config: &PomConfig,
    parent_pom: &str,
    workdir: &Path,
) -> Result<()> {
    let artifacts = publishable_artifacts(records)?;
    let modules: Vec<&Module> = model
        .iter()
        .filter(|m| artifacts.contains_key(&m.path))
        .collect();
    info!(parent = parent_pom, modules = modules.len(), "generating POMs");

    generate_parent(&modules, config, parent_pom, workdir)?;
    for module in modules {
        out::write(
            workdir,
            format!("{}/pom.xml", module.path),
            &module_pom(module, &artifacts, libs, config, parent_pom),
        )?;
    }
    Ok(())
}

/// Maps module folder to published coordinates for every library rule
/// carrying `maven_coords`.
fn publishable_artifacts(records: &[TargetRecord]) -> Result<HashMap<String, Coords>> {
    let mut artifacts = HashMap::new();
    for record in records {
        if !PUBLISHABLE_RULES.contains(&record.rule_type.as_str()) {
            continue;
        }
        if let Some(gav) = &record.maven_coords {
            artifacts.insert(record.base_path.clone(), Coords::parse(gav)?);
        }
    }
    Ok(artifacts)
}

/// Instantiates `<parent>.template.xml` next to the parent POM if it
/// exists; templates carry placeholder comments for the coordinates and
/// the module list.
fn generate_parent(
    modules: &[&Module],
    config: &PomConfig,
    parent_pom: &str,
    workdir: &Path,
) -> Result<()> {
    let template = workdir.join(parent_pom.replace(".xml", ".template.xml"));
    if !template.is_file() {
        return Ok(());
    }
    let module_list: String = modules
        .iter()
        .map(|m| format!("\n    <module>{}</module>", m.path))
        .collect();
    let content = std::fs::read_to_string(template)?
        .replace("G<!--GROUP-->", &config.group)
        .replace("A<!--ARTIFACT-->", &parent_artifact(parent_pom))
        .replace("V<!--VERSION-->", &config.version)
        .replace("<!--MODULES-->", &module_list);
    out::write(workdir, parent_pom, &content)?;
    Ok(())
}

fn parent_artifact(parent_pom: &str) -> String {
    let name: String = parent_pom
        .replace(".xml", "")
        .replace(".pom", "")
        .chars()
        .filter(|c| *c != '/' && *c != '.')
        .collect();
    if name == "pom" { "parent".to_string() } else { name }
}

fn module_pom(
    module: &Module,
    artifacts: &HashMap<String, Coords>,
    libs: &LibraryCatalog,
    config: &PomConfig,
    parent_pom: &str,
) -> String {
    let coords = &artifacts[&module.path];
    let depth = module.path.chars().filter(|c| *c == '/').count() + 1;
    let relative_path = format!("{}{}", "../".repeat(depth), parent_pom);

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{group}</groupId>
  <artifactId>{artifact}</artifactId>
  <version>{version}</version>
  <packaging>jar</packaging>
  <name>${{project.groupId}}.${{project.artifactId}}</name>
  <parent>
    <groupId>{parent_group}</groupId>
    <artifactId>{parent_artifact}</artifactId>
    <version>{parent_version}</version>
    <relativePath>{relative_path}</relativePath>
  </parent>
  <dependencies>{dependencies}
  </dependencies>
</project>
"#,
        group = coords.group,
        artifact = coords.artifact,
        version = coords.version,
        parent_group = config.group,
        parent_artifact = parent_artifact(parent_pom),
        parent_version = config.version,
        dependencies = pom_dependencies(module, artifacts, libs),
    )
}

fn pom_dependencies(
    module: &Module,
    artifacts: &HashMap<String, Coords>,
    libs: &LibraryCatalog,
) -> String {
    let mut deps = String::new();

    // Sibling modules appear only when they are published themselves.
    for dep in module.dep_modules.values() {
        if let Some(coords) = artifacts.get(&dep.path) {
            deps.push_str(&dependency_xml(coords, dep.flags));
        }
    }
    for dep in module.dep_libraries.values() {
        if let Some(lib) = libs.get(&dep.target) {
            for coords in &lib.jars {
                deps.push_str(&dependency_xml(coords, dep.flags));
            }
        }
    }
    deps
}

fn dependency_xml(coords: &Coords, flags: DepFlags) -> String {
    let classifier = coords
        .classifier
        .as_ref()
        .map(|c| format!("\n      <classifier>{c}</classifier>"))
        .unwrap_or_default();
    format!(
        "\n    <dependency>\n      <groupId>{}</groupId>\n      <artifactId>{}</artifactId>\n      <version>{}</version>{}{}\n    </dependency>",
        coords.group,
        coords.artifact,
        coords.version,
        classifier,
        scope_xml(flags)
    )
}

fn scope_xml(flags: DepFlags) -> &'static str {
    if flags.test {
        "\n      <scope>test</scope>"
    } else if flags.provided && flags.exported {
        "\n      <scope>provided</scope>"
    } else if flags.provided {
        "\n      <scope>provided</scope>\n      <optional>true</optional>"
    } else if flags.exported {
        "\n      <scope>compile</scope>"
    } else {
        "\n      <scope>compile</scope>\n      <optional>true</optional>"
    }
}
