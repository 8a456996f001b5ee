//! Eclipse project generation: a root `.project` referencing every
//! module project, plus per-module `.project` and `.classpath` files.

use crate::error::Result;
use crate::out;
use cairn_core::model::Module;
use cairn_core::{LibraryCatalog, ProjectModel};
use std::path::Path;

pub fn generate(model: &ProjectModel, libs: &LibraryCatalog, workdir: &Path) -> Result<()> {
    let refs: Vec<String> = model.iter().map(|m| project_name(model, m)).collect();
    out::write(
        workdir,
        ".project",
        &dot_project(&model.root_name, &[], &refs),
    )?;

    for module in model.iter() {
        let module_refs: Vec<String> = module
            .dep_modules
            .values()
            .filter_map(|d| model.get(&d.path))
            .map(|m| project_name(model, m))
            .collect();
        out::write(
            workdir,
            format!("{}/.project", module.path),
            &dot_project(&project_name(model, module), &["java"], &module_refs),
        )?;
        out::write(
            workdir,
            format!("{}/.classpath", module.path),
            &dot_classpath(module, model, libs),
        )?;
    }
    Ok(())
}

/// Eclipse workspaces are flat, so module projects are namespaced under
/// the root project name.
fn project_name(model: &ProjectModel, module: &Module) -> String {
    format!("{}.{}", model.root_name, module.name)
}

fn dot_project(name: &str, natures: &[&str], projects: &[String]) -> String {
    let project_refs: String = projects
        .iter()
        .map(|p| format!("\n    <project>{p}</project>"))
        .collect();

    let (build_specs, project_natures) = if natures.contains(&"java") {
        (
            "\n    <buildCommand>\n      <name>org.eclipse.jdt.core.javabuilder</name>\n      <arguments></arguments>\n    </buildCommand>",
            "\n    <nature>org.eclipse.jdt.core.javanature</nature>",
        )
    } else {
        ("", "")
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<projectDescription>
  <name>{name}</name>
  <comment></comment>
  <projects>{project_refs}
  </projects>
  <buildSpec>{build_specs}
  </buildSpec>
  <natures>{project_natures}
  </natures>
</projectDescription>
"#
    )
}

fn dot_classpath(module: &Module, model: &ProjectModel, libs: &LibraryCatalog) -> String {
    let mut aliases: Vec<&String> = module.srcs.keys().collect();
    aliases.sort();
    let folders: String = aliases
        .iter()
        .map(|alias| format!("\n  <classpathentry kind=\"src\" path=\"{alias}\"/>"))
        .collect();

    let dep_modules: String = module
        .dep_modules
        .values()
        .filter_map(|d| model.get(&d.path).map(|m| (d, m)))
        .map(|(d, m)| {
            format!(
                "\n  <!-- {}  {} -->\n  <classpathentry kind=\"src\" path=\"/{}\"{} combineaccessrules=\"false\"/>",
                m.path,
                m.name,
                project_name(model, m),
                exported_attr(d.flags.exported)
            )
        })
        .collect();

    let dep_libraries: String = module
        .dep_libraries
        .values()
        .filter_map(|d| libs.get(&d.target).map(|lib| (d, lib)))
        .flat_map(|(d, lib)| {
            lib.jars.iter().zip(lib.srcs.iter()).map(move |(jar, src)| {
                let sourcepath = src
                    .as_ref()
                    .map(|s| {
                        format!(
                            " sourcepath=\"/{}/{}\"",
                            model.root_name,
                            lib.symlink_src(s)
                        )
                    })
                    .unwrap_or_default();
                format!(
                    "\n  <!-- {}  {} -->\n  <classpathentry kind=\"lib\" path=\"/{}/{}\"{}{}/>",
                    lib.name(),
                    jar,
                    model.root_name,
                    lib.symlink_jar(jar),
                    sourcepath,
                    exported_attr(d.flags.exported)
                )
            })
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<classpath>{folders}
  <classpathentry kind="con" path="org.eclipse.jdt.launching.JRE_CONTAINER/org.eclipse.jdt.internal.debug.ui.launcher.StandardVMType/JavaSE-1.8"/>{dep_modules}{dep_libraries}
  <classpathentry kind="output" path=".classes"/>
</classpath>
"#
    )
}

fn exported_attr(exported: bool) -> &'static str {
    if exported { " exported=\"true\"" } else { "" }
}
