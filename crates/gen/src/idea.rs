//! IntelliJ IDEA project generation: one library table entry per
//! catalog library, one `.iml` per discovered module, plus the root
//! module and project manifests under `.idea/`.

use crate::error::Result;
use crate::out;
use cairn_core::model::{DepFlags, Module};
use cairn_core::{Library, LibraryCatalog, ProjectModel};
use std::path::Path;

pub fn generate(model: &ProjectModel, libs: &LibraryCatalog, workdir: &Path) -> Result<()> {
    generate_libraries(libs, workdir)?;
    generate_modules(model, libs, workdir)
}

pub fn generate_libraries(libs: &LibraryCatalog, workdir: &Path) -> Result<()> {
    for (_, lib) in libs.iter() {
        out::write(
            workdir,
            format!(".idea/libraries/{}.xml", lib.flat_name()),
            &library_xml(lib),
        )?;
    }
    Ok(())
}

pub fn generate_modules(model: &ProjectModel, libs: &LibraryCatalog, workdir: &Path) -> Result<()> {
    for module in model.iter() {
        out::write(
            workdir,
            format!(".idea/modules/{}.iml", module.name),
            &module_xml(module, libs, workdir),
        )?;
    }
    out::write(
        workdir,
        format!(".idea/modules/{}.iml", model.root_name),
        &root_module_xml(&excluded_root_folders(model, workdir)),
    )?;
    out::write(workdir, ".idea/modules.xml", &modules_xml(model))?;
    out::write(workdir, ".idea/misc.xml", misc_xml())?;
    Ok(())
}

fn scope(flags: DepFlags) -> &'static str {
    if flags.test {
        "TEST"
    } else if flags.provided {
        "PROVIDED"
    } else {
        "COMPILE"
    }
}

fn exported_attr(flags: DepFlags) -> &'static str {
    if flags.exported { " exported=\"\"" } else { "" }
}

fn library_xml(lib: &Library) -> String {
    let classes: String = lib
        .jars
        .iter()
        .map(|j| {
            format!(
                "\n      <root url=\"jar://$PROJECT_DIR$/{}!/\" />",
                lib.symlink_jar(j)
            )
        })
        .collect();
    let sources: String = lib
        .srcs
        .iter()
        .flatten()
        .map(|s| {
            format!(
                "\n      <root url=\"jar://$PROJECT_DIR$/{}!/\" />",
                lib.symlink_src(s)
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<component name="libraryTable">
  <library name="{name}">
    <CLASSES>{classes}
    </CLASSES>
    <JAVADOC />
    <SOURCES>{sources}
    </SOURCES>
  </library>
</component>
"#,
        name = lib.name(),
    )
}

fn module_xml(module: &Module, libs: &LibraryCatalog, workdir: &Path) -> String {
    let excludes: String = [".jars"]
        .iter()
        .filter(|dir| workdir.join(&module.path).join(dir).is_dir())
        .map(|dir| {
            format!(
                "\n      <excludeFolder url=\"file://$MODULE_DIR$/../../{}/{dir}\" isTestSource=\"false\" />",
                module.path
            )
        })
        .collect();

    let folders: String = module
        .srcs
        .iter()
        .map(|(alias, root)| {
            format!(
                "\n      <sourceFolder url=\"file://$MODULE_DIR$/../../{}/{alias}\"\n          isTestSource=\"{}\" generated=\"{}\"/>",
                module.path, root.test, root.generated
            )
        })
        .collect();

    let dep_libraries: String = module
        .dep_libraries
        .values()
        .filter_map(|d| libs.get(&d.target).map(|lib| (d, lib)))
        .map(|(d, lib)| {
            format!(
                "\n    <orderEntry type=\"library\" name=\"{}\"\n        scope=\"{}\" level=\"project\"{}/>",
                lib.name(),
                scope(d.flags),
                exported_attr(d.flags)
            )
        })
        .collect();

    let dep_modules: String = module
        .dep_modules
        .values()
        .map(|d| {
            format!(
                "\n    <orderEntry type=\"module\" module-name=\"{}\"\n        scope=\"{}\"{} />",
                d.name,
                scope(d.flags),
                exported_attr(d.flags)
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<module type="JAVA_MODULE" version="4">
  <component name="NewModuleRootManager" inherit-compiler-output="true">
    <exclude-output />
    <content url="file://$MODULE_DIR$/../../{path}">{folders}{excludes}
    </content>
    <orderEntry type="inheritedJdk" />
    <orderEntry type="sourceFolder" forTests="false" />{dep_libraries}{dep_modules}
  </component>
</module>
"#,
        path = module.path,
    )
}

fn root_module_xml(excludes: &[String]) -> String {
    let exclude_folders: String = excludes
        .iter()
        .map(|dir| {
            format!(
                "\n      <excludeFolder url=\"file://$MODULE_DIR$/../../{dir}\" isTestSource=\"false\" />"
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<module type="JAVA_MODULE" version="4">
  <component name="NewModuleRootManager" inherit-compiler-output="true">
    <exclude-output />
    <content url="file://$MODULE_DIR$/../..">{exclude_folders}
    </content>
    <orderEntry type="inheritedJdk" />
    <orderEntry type="sourceFolder" forTests="false" />
    <orderEntry type="sourceFolder" forTests="true" />
  </component>
</module>
"#
    )
}

fn modules_xml(model: &ProjectModel) -> String {
    let element = |name: &str| {
        format!(
            "\n     <module fileurl=\"file://$PROJECT_DIR$/.idea/modules/{name}.iml\" filepath=\"$PROJECT_DIR$/.idea/modules/{name}.iml\" />"
        )
    };
    let modules: String = std::iter::once(element(&model.root_name))
        .chain(model.iter().map(|m| element(&m.name)))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project version="4">
  <component name="ProjectModuleManager">
    <modules>{modules}
    </modules>
  </component>
</project>
"#
    )
}

fn misc_xml() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<project version="4">
  <component name="ProjectRootManager" version="2" default="false" languageLevel="JDK_1_8" project-jdk-name="1.8" project-jdk-type="JavaSDK">
    <output url="file://$PROJECT_DIR$/.idea/.out" />
  </component>
</project>
"#
}

/// Folders at the workspace root that contain no module are excluded
/// from the root module's content.
fn excluded_root_folders(model: &ProjectModel, workdir: &Path) -> Vec<String> {
    let mut excludes: Vec<String> = std::fs::read_dir(workdir)
        .into_iter()
        .flatten()
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    excludes.sort();
    excludes.retain(|dir| {
        !model
            .iter()
            .any(|m| m.path.split('/').next() == Some(dir.as_str()))
    });
    excludes
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::library::{LibraryOptions, StagedLibrary};
    use cairn_core::model::{DependencyEdge, LibraryDep, ModuleDep, SourceRoot};

    fn module_with_deps() -> Module {
        let mut module = Module::new("svc/a");
        module.name = "a".to_string();
        module.srcs.insert("src".to_string(), SourceRoot {
            path: "src".to_string(),
            test: false,
            generated: false,
            resources: None,
            package: None,
        });
        module.srcs.insert("src-gen".to_string(), SourceRoot {
            path: "buck-out/gen/svc/a/__a_gen__".to_string(),
            test: true,
            generated: true,
            resources: None,
            package: None,
        });
        module.deps.insert("//svc/b:b".to_string(), DependencyEdge {
            target: "//svc/b:b".to_string(),
            flags: DepFlags::default(),
        });
        module.dep_modules.insert("svc/b".to_string(), ModuleDep {
            path: "svc/b".to_string(),
            name: "b".to_string(),
            flags: DepFlags {
                test: true,
                provided: false,
                exported: false,
            },
        });
        module
            .dep_libraries
            .insert("//lib/acme/util:util".to_string(), LibraryDep {
                target: "//lib/acme/util:util".to_string(),
                flags: DepFlags {
                    test: false,
                    provided: true,
                    exported: true,
                },
            });
        module
    }

    fn catalog() -> LibraryCatalog {
        let mut libs = LibraryCatalog::new();
        libs.stage(&StagedLibrary {
            target: "//lib/acme/util".to_string(),
            jars: vec!["com.acme:util:1.0".to_string()],
            options: LibraryOptions::default(),
        })
        .unwrap();
        libs
    }

    #[test]
    fn module_xml_maps_scopes_and_exported() {
        let dir = tempfile::tempdir().unwrap();
        let xml = module_xml(&module_with_deps(), &catalog(), dir.path());

        assert!(xml.contains("content url=\"file://$MODULE_DIR$/../../svc/a\""));
        assert!(xml.contains("svc/a/src\""));
        assert!(xml.contains("isTestSource=\"true\" generated=\"true\""));
        assert!(xml.contains("module-name=\"b\""));
        assert!(xml.contains("scope=\"TEST\""));
        assert!(xml.contains("name=\"lib.acme.util\""));
        assert!(xml.contains("scope=\"PROVIDED\" level=\"project\" exported=\"\"/>"));
    }

    #[test]
    fn library_xml_links_jars_and_sources() {
        let libs = catalog();
        let lib = libs.get("//lib/acme/util:util").unwrap();
        let xml = library_xml(lib);
        assert!(xml.contains("<library name=\"lib.acme.util\">"));
        assert!(xml.contains("jar://$PROJECT_DIR$/lib/acme/util/.jars/util-1.0.jar!/"));
        assert!(xml.contains("jar://$PROJECT_DIR$/lib/acme/util/.jars/util-1.0-sources.jar!/"));
    }

    #[test]
    fn excluded_folders_skip_module_roots() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("svc/a")).unwrap();
        std::fs::create_dir_all(dir.path().join("third-party")).unwrap();

        let mut model = ProjectModel {
            root_name: "proj".to_string(),
            modules: Default::default(),
        };
        model
            .modules
            .insert("svc/a".to_string(), module_with_deps());

        let excluded = excluded_root_folders(&model, dir.path());
        assert_eq!(excluded, vec!["third-party".to_string()]);
    }
}
