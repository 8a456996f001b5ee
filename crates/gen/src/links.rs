//! Workspace symlinks: build outputs into `.out/`, fetched jars into
//! `.jars/`, and generated source roots into their module folders.

use crate::error::Result;
use crate::out;
use cairn_buck::{TargetRecord, flatname};
use cairn_core::{LibraryCatalog, ProjectModel};
use std::path::Path;
use tracing::warn;

/// Rule kinds whose single output is worth surfacing next to the code.
const OUTPUT_RULES: &[&str] = &[
    "remote_file",
    "genrule",
    "java_binary",
    "http_file",
    "http_archive",
    "zip_file",
];

/// Label forcing output symlinking for rule kinds not listed above.
const FORCE_OUTPUT_LABEL: &str = "symlink_out";

pub fn link_outputs(records: &[TargetRecord], workdir: &Path) -> Result<()> {
    for record in records {
        if !record.has_label(FORCE_OUTPUT_LABEL)
            && !OUTPUT_RULES.contains(&record.rule_type.as_str())
        {
            continue;
        }
        let Some(output) = &record.output_path else {
            warn!(target = %record.qualified_name, "no output to link");
            continue;
        };
        let file = match &record.out {
            Some(out) => out.clone(),
            None => format!("{}.jar", record.name),
        };
        out::symlink(
            workdir,
            format!("{}/.out/{}", record.base_path, file),
            output,
            false,
        )?;
    }
    Ok(())
}

/// Links each fetched artifact's build output under the library folder,
/// where the IDE files expect it.
pub fn link_jars(
    libs: &LibraryCatalog,
    records: &[TargetRecord],
    workdir: &Path,
) -> Result<()> {
    for (_, lib) in libs.iter() {
        if lib.options.internal {
            continue;
        }
        for (i, jar) in lib.jars.iter().enumerate() {
            let n = flatname(&jar.to_string());
            if let Some(output) = fetched_output(records, &lib.target.path, &format!("remote_{n}_jar")) {
                out::symlink(workdir, lib.symlink_jar(jar), output, false)?;
            }
            if let Some(src) = lib.srcs.get(i).and_then(|s| s.as_ref()) {
                if let Some(output) =
                    fetched_output(records, &lib.target.path, &format!("remote_{n}_src"))
                {
                    out::symlink(workdir, lib.symlink_src(src), output, false)?;
                }
            }
        }
    }
    Ok(())
}

fn fetched_output<'a>(
    records: &'a [TargetRecord],
    folder: &str,
    goal: &str,
) -> Option<&'a String> {
    records
        .iter()
        .find(|r| r.base_path == folder && r.name == goal)
        .and_then(|r| r.output_path.as_ref())
}

/// Links generated source roots into module folders so the aliases the
/// IDE files reference resolve to real directories.
pub fn link_gen_srcs(model: &ProjectModel, workdir: &Path) -> Result<()> {
    for module in model.iter() {
        for (alias, root) in &module.srcs {
            if root.generated {
                out::symlink(
                    workdir,
                    format!("{}/{}", module.path, alias),
                    &root.path,
                    true,
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use cairn_core::library::{LibraryOptions, StagedLibrary};
    use cairn_core::model::{Module, SourceRoot};

    fn record(name: &str, rule_type: &str, base_path: &str) -> TargetRecord {
        TargetRecord {
            qualified_name: format!("//{base_path}:{name}"),
            name: name.to_string(),
            rule_type: rule_type.to_string(),
            base_path: base_path.to_string(),
            ..TargetRecord::default()
        }
    }

    #[test]
    fn output_rules_and_labels_get_out_links() {
        let dir = tempfile::tempdir().unwrap();
        out::write(dir.path(), "buck-out/gen/tool.jar", "jar").unwrap();
        out::write(dir.path(), "buck-out/gen/data.zip", "zip").unwrap();

        let mut binary = record("tool", "java_binary", "svc/tool");
        binary.output_path = Some("buck-out/gen/tool.jar".to_string());
        let mut labeled = record("data", "export_file", "svc/tool");
        labeled.labels = vec![FORCE_OUTPUT_LABEL.to_string()];
        labeled.out = Some("data.zip".to_string());
        labeled.output_path = Some("buck-out/gen/data.zip".to_string());
        let plain = record("lib", "java_library", "svc/tool");

        link_outputs(&[binary, labeled, plain], dir.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("svc/tool/.out/tool.jar")).unwrap(),
            "jar"
        );
        assert_eq!(
            std::fs::read_to_string(dir.path().join("svc/tool/.out/data.zip")).unwrap(),
            "zip"
        );
        assert!(!dir.path().join("svc/tool/.out/lib.jar").exists());
    }

    #[test]
    fn fetched_jars_link_into_the_jars_folder() {
        let dir = tempfile::tempdir().unwrap();
        out::write(dir.path(), "buck-out/gen/lib/acme/util/util-1.0.jar", "bin").unwrap();
        out::write(dir.path(), "buck-out/gen/lib/acme/util/util-1.0-sources.jar", "src").unwrap();

        let mut libs = LibraryCatalog::new();
        libs.stage(&StagedLibrary {
            target: "//lib/acme/util".to_string(),
            jars: vec!["com.acme:util:1.0".to_string()],
            options: LibraryOptions::default(),
        })
        .unwrap();

        let mut jar = record("remote_com_acme_util_1_0_jar", "remote_file", "lib/acme/util");
        jar.output_path = Some("buck-out/gen/lib/acme/util/util-1.0.jar".to_string());
        let mut src = record("remote_com_acme_util_1_0_src", "remote_file", "lib/acme/util");
        src.output_path = Some("buck-out/gen/lib/acme/util/util-1.0-sources.jar".to_string());

        link_jars(&libs, &[jar, src], dir.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("lib/acme/util/.jars/util-1.0.jar")).unwrap(),
            "bin"
        );
        assert_eq!(
            std::fs::read_to_string(
                dir.path().join("lib/acme/util/.jars/util-1.0-sources.jar")
            )
            .unwrap(),
            "src"
        );
    }

    #[test]
    fn generated_roots_become_directory_links() {
        let dir = tempfile::tempdir().unwrap();
        out::write(dir.path(), "buck-out/annotation/svc/a/__a_gen__/G.java", "class G {}")
            .unwrap();

        let mut module = Module::new("svc/a");
        module.name = "a".to_string();
        module.srcs.insert("src-gen".to_string(), SourceRoot {
            path: "buck-out/annotation/svc/a/__a_gen__".to_string(),
            test: false,
            generated: true,
            resources: None,
            package: None,
        });
        module.srcs.insert("src".to_string(), SourceRoot {
            path: "src".to_string(),
            test: false,
            generated: false,
            resources: None,
            package: None,
        });
        let mut model = ProjectModel {
            root_name: "proj".to_string(),
            modules: Default::default(),
        };
        model.modules.insert("svc/a".to_string(), module);

        link_gen_srcs(&model, dir.path()).unwrap();

        assert!(dir.path().join("svc/a/src-gen").join("G.java").exists());
        assert!(!dir.path().join("svc/a/src").exists());
    }
}
