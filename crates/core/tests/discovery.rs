use cairn_buck::{BuckError, TargetCatalog, TargetRecord};
use cairn_core::discovery::{DEFAULT_PATTERN, DiscoverOptions, discover};
use cairn_core::library::{LibraryCatalog, LibraryOptions, StagedLibrary};
use cairn_core::{CollectedDiagnostics, ProjectModel};
use std::collections::HashMap;
use std::path::Path;

struct FixedCatalog {
    by_pattern: HashMap<String, Vec<TargetRecord>>,
}

impl FixedCatalog {
    fn of(records: Vec<TargetRecord>) -> Self {
        FixedCatalog {
            by_pattern: HashMap::from([(DEFAULT_PATTERN.to_string(), records)]),
        }
    }
}

impl TargetCatalog for FixedCatalog {
    fn query(&mut self, pattern: &str) -> Result<Vec<TargetRecord>, BuckError> {
        Ok(self.by_pattern.get(pattern).cloned().unwrap_or_default())
    }
}

fn rule(qualified: &str, rule_type: &str) -> TargetRecord {
    let (path, goal) = qualified
        .trim_start_matches('/')
        .split_once(':')
        .unwrap_or((qualified.trim_start_matches('/'), ""));
    TargetRecord {
        qualified_name: qualified.to_string(),
        rule_type: rule_type.to_string(),
        base_path: path.to_string(),
        name: if goal.is_empty() {
            Path::new(path)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        } else {
            goal.to_string()
        },
        ..TargetRecord::default()
    }
}

fn origin(qualified: &str, rule_type: &str) -> TargetRecord {
    let mut r = rule(qualified, rule_type);
    r.resources_root = Some(".".to_string());
    r
}

fn library(target: &str, jars: &[&str], deps: &[&str]) -> StagedLibrary {
    StagedLibrary {
        target: target.to_string(),
        jars: jars.iter().map(|j| j.to_string()).collect(),
        options: LibraryOptions {
            deps: deps.iter().map(|d| d.to_string()).collect(),
            ..LibraryOptions::default()
        },
    }
}

fn run(
    records: Vec<TargetRecord>,
    staged: Vec<StagedLibrary>,
) -> (ProjectModel, CollectedDiagnostics) {
    let mut catalog = FixedCatalog::of(records);
    let mut libs = LibraryCatalog::new();
    for lib in &staged {
        libs.stage(lib).unwrap();
    }
    let mut diag = CollectedDiagnostics::default();
    let options = DiscoverOptions::new("/nonexistent-workdir").with_root_name("proj");
    let model = discover(&mut catalog, &libs, &mut diag, &options).unwrap();
    (model, diag)
}

#[test]
fn scenario_two_modules_and_a_library() {
    let mut a = origin("//svc/a:a", "java_library");
    a.deps = vec!["//svc/b:b".to_string(), "//lib/acme/util".to_string()];
    let b = origin("//svc/b:b", "java_test");

    let (model, diag) = run(
        vec![a, b],
        vec![library("//lib/acme/util", &["com.acme:util:1.0"], &[])],
    );

    assert_eq!(model.len(), 2);
    assert_eq!(model.get("svc/a").unwrap().name, "a");
    assert_eq!(model.get("svc/b").unwrap().name, "b");

    let a = model.get("svc/a").unwrap();
    let on_b = &a.dep_modules["svc/b"];
    assert_eq!(on_b.name, "b");
    assert!(!on_b.flags.test && !on_b.flags.provided && !on_b.flags.exported);

    let on_util = &a.dep_libraries["//lib/acme/util:util"];
    assert!(!on_util.flags.test && !on_util.flags.provided && !on_util.flags.exported);

    let b = model.get("svc/b").unwrap();
    assert!(b.dep_modules.is_empty() && b.dep_libraries.is_empty());
    assert!(diag.unresolved.is_empty());
}

#[test]
fn scenario_basename_collision_yields_path_derived_names() {
    let (model, _) = run(
        vec![
            origin("//x/widget:widget", "java_library"),
            origin("//y/widget:widget", "java_library"),
        ],
        vec![],
    );
    assert_eq!(model.get("x/widget").unwrap().name, "x.widget");
    assert_eq!(model.get("y/widget").unwrap().name, "y.widget");
}

#[test]
fn names_are_unique_and_distinct_from_root() {
    let (model, _) = run(
        vec![
            origin("//proj:proj", "java_library"),
            origin("//tools/proj:proj", "java_library"),
            origin("//svc/a:a", "java_library"),
        ],
        vec![],
    );
    let mut names: Vec<&str> = model.iter().map(|m| m.name.as_str()).collect();
    for name in &names {
        assert_ne!(*name, "proj");
    }
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), model.len());
}

#[test]
fn self_dependency_is_dropped_but_resolved() {
    let mut a = origin("//svc/a:a", "java_library");
    a.deps = vec!["//svc/a:a".to_string()];

    let (model, diag) = run(vec![a], vec![]);
    let module = model.get("svc/a").unwrap();
    assert!(!module.dep_modules.contains_key("svc/a"));
    assert!(diag.unresolved.is_empty());
}

#[test]
fn unresolved_dependency_is_reported_not_fatal() {
    let mut a = origin("//svc/a:a", "java_library");
    a.deps = vec![
        "//svc/ghost:ghost".to_string(),
        // same-folder references are implicit, never reported
        "//svc/a:helper".to_string(),
        ":local".to_string(),
    ];

    let (model, diag) = run(vec![a], vec![]);
    assert_eq!(model.len(), 1);
    assert_eq!(diag.unresolved, vec![(
        "svc/a".to_string(),
        "//svc/ghost:ghost".to_string()
    )]);
}

#[test]
fn library_closure_is_complete_and_cycle_safe() {
    let mut a = origin("//svc/a:a", "java_library");
    a.deps = vec!["//lib/l".to_string()];

    let (model, _) = run(vec![a], vec![
        library("//lib/l", &["com.acme:l:1.0"], &["//lib/m"]),
        library("//lib/m", &["com.acme:m:1.0"], &["//lib/n"]),
        library("//lib/n", &["com.acme:n:1.0"], &["//lib/m"]),
    ]);

    let deplibs = &model.get("svc/a").unwrap().dep_libraries;
    let keys: Vec<&str> = deplibs.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["//lib/l:l", "//lib/m:m", "//lib/n:n"]);
}

#[test]
fn dual_module_and_library_resolution_wires_both() {
    let mut a = origin("//svc/a:a", "java_library");
    a.deps = vec!["//svc/b:b".to_string()];
    let b = origin("//svc/b:b", "java_library");

    let (model, diag) = run(
        vec![a, b],
        vec![library("//svc/b:b", &["com.acme:b:1.0"], &[])],
    );
    let a = model.get("svc/a").unwrap();
    assert!(a.dep_modules.contains_key("svc/b"));
    assert!(a.dep_libraries.contains_key("//svc/b:b"));
    assert!(diag.unresolved.is_empty());
}

#[test]
fn multiple_records_merge_edge_flags() {
    // main rule and test rule of the same module both depend on B;
    // the test-only classification must not survive the merge
    let mut main = origin("//svc/a:a", "java_library");
    main.deps = vec!["//svc/b:b".to_string()];
    let mut test = rule("//svc/a:a_test", "java_test");
    test.deps = vec!["//svc/b:b".to_string()];
    test.exported_deps = vec!["//svc/b:b".to_string()];
    let b = origin("//svc/b:b", "java_library");

    let (model, _) = run(vec![main, test, b], vec![]);
    let edge = &model.get("svc/a").unwrap().deps["//svc/b:b"];
    assert!(!edge.flags.test);
    assert!(edge.flags.exported);
    assert!(!model.get("svc/a").unwrap().dep_modules["svc/b"].flags.test);
}

#[test]
fn annotation_processor_definitions_contribute_nothing() {
    let a = origin("//svc/a:a", "java_library");
    let mut processor = rule("//svc/a:processor", "java_annotation_processor");
    processor.deps = vec!["//svc/ghost:ghost".to_string()];

    let (model, diag) = run(vec![a, processor], vec![]);
    assert!(model.get("svc/a").unwrap().deps.is_empty());
    assert!(diag.unresolved.is_empty());
}

#[test]
fn generated_roots_get_synthesized_aliases() {
    let mut a = origin("//svc/a:a", "java_library");
    a.annotation_processors = vec!["com.acme.Processor".to_string()];
    a.generated_source_path = Some("buck-out/gen/svc/a/__a_gen__".to_string());

    let (model, _) = run(vec![a], vec![]);
    let srcs = &model.get("svc/a").unwrap().srcs;
    assert!(srcs.contains_key("."));
    let r#gen = &srcs[".-gen"];
    assert!(r#gen.generated);
    assert!(!r#gen.test);
    assert_eq!(r#gen.path, "buck-out/gen/svc/a/__a_gen__");
}

#[test]
fn test_codegen_without_declared_path_synthesizes_fallback() {
    let a = origin("//svc/a:a", "java_library");
    let mut test = rule("//svc/a:a_test", "java_test");
    test.annotation_processors = vec!["com.acme.Processor".to_string()];

    let (model, _) = run(vec![a, test], vec![]);
    let srcs = &model.get("svc/a").unwrap().srcs;
    let r#gen = &srcs["test-gen"];
    assert!(r#gen.generated && r#gen.test);
    assert_eq!(r#gen.path, "buck-out/annotation/svc/a/__a_test#testsjar_gen__");
}

#[test]
fn generated_root_inherits_test_flag_of_base_root() {
    // the base folder is contributed by a test rule; a non-test codegen
    // rule on the same folder still yields a test generated root
    let a = origin("//svc/a:a", "java_test");
    let mut r#gen = rule("//svc/a:gen", "java_library");
    r#gen.resources_root = Some(".".to_string());
    r#gen.plugins = vec!["com.acme:plugin:1.0".to_string()];
    r#gen.generated_source_path = Some("buck-out/gen/svc/a/__gen__".to_string());

    let (model, _) = run(vec![a, r#gen], vec![]);
    let srcs = &model.get("svc/a").unwrap().srcs;
    assert!(srcs["."].test);
    assert!(srcs[".-gen"].test, "inherited from the base root");
}

#[test]
fn no_gen_srcs_label_opts_out() {
    let mut a = origin("//svc/a:a", "java_library");
    a.annotation_processors = vec!["com.acme.Processor".to_string()];
    a.generated_source_path = Some("buck-out/gen/svc/a/__a_gen__".to_string());
    a.labels.push("ide_no_gen_srcs".to_string());

    let (model, _) = run(vec![a], vec![]);
    assert_eq!(model.get("svc/a").unwrap().srcs.len(), 1);
}

#[test]
fn missing_source_folders_are_ignored() {
    let mut a = origin("//svc/a:a", "java_library");
    a.resources_root = Some("does-not-exist".to_string());
    a.labels.push("ide_mod".to_string());

    let (model, _) = run(vec![a], vec![]);
    assert!(model.get("svc/a").unwrap().srcs.is_empty());
}

#[test]
fn existing_source_folders_are_classified() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("svc/a/src")).unwrap();

    let mut a = rule("//svc/a:a", "java_library");
    a.resources_root = Some("src".to_string());
    let mut res = rule("//svc/a:res", "java_library");
    res.resources_root = Some("src".to_string());
    res.labels.push("ide_res".to_string());

    let mut catalog = FixedCatalog::of(vec![a, res]);
    let libs = LibraryCatalog::new();
    let mut diag = CollectedDiagnostics::default();
    let options = DiscoverOptions::new(dir.path()).with_root_name("proj");
    let model = discover(&mut catalog, &libs, &mut diag, &options).unwrap();

    let srcs = &model.get("svc/a").unwrap().srcs;
    let root = &srcs["src"];
    assert!(!root.test && !root.generated);
    assert!(root.resources.is_some());
}

#[test]
fn malformed_identity_aborts_discovery() {
    let mut a = origin("//svc/a:a", "java_library");
    a.deps = vec![":".to_string()];

    let mut catalog = FixedCatalog::of(vec![a]);
    let libs = LibraryCatalog::new();
    let mut diag = CollectedDiagnostics::default();
    let options = DiscoverOptions::new("/nonexistent-workdir").with_root_name("proj");
    assert!(discover(&mut catalog, &libs, &mut diag, &options).is_err());
}

#[test]
fn extra_patterns_extend_the_default_query() {
    let mut catalog = FixedCatalog::of(vec![origin("//svc/a:a", "java_library")]);
    catalog.by_pattern.insert(
        "//plugins/...".to_string(),
        vec![origin("//plugins/p:p", "java_library")],
    );

    let libs = LibraryCatalog::new();
    let mut diag = CollectedDiagnostics::default();
    let options = DiscoverOptions::new("/nonexistent-workdir")
        .with_root_name("proj")
        .add_targets("//plugins/...");
    let model = discover(&mut catalog, &libs, &mut diag, &options).unwrap();
    assert_eq!(model.len(), 2);
    assert!(model.get("plugins/p").is_some());
}

#[test]
fn repeated_discovery_is_identical() {
    let records = vec![
        {
            let mut a = origin("//svc/a:a", "java_library");
            a.deps = vec!["//svc/b:b".to_string(), "//lib/l".to_string()];
            a
        },
        origin("//svc/b:b", "java_test"),
        origin("//x/widget:widget", "java_library"),
        origin("//y/widget:widget", "java_library"),
    ];
    let staged = vec![
        library("//lib/l", &["com.acme:l:1.0"], &["//lib/m"]),
        library("//lib/m", &["com.acme:m:1.0"], &[]),
    ];

    let (first, _) = run(records.clone(), staged.clone());
    let (second, _) = run(records, staged);

    assert_eq!(first.len(), second.len());
    for (path, module) in &first.modules {
        let twin = second.get(path).unwrap();
        assert_eq!(module.name, twin.name);
        assert_eq!(
            module.deps.keys().collect::<Vec<_>>(),
            twin.deps.keys().collect::<Vec<_>>()
        );
        assert_eq!(
            module.dep_modules.keys().collect::<Vec<_>>(),
            twin.dep_modules.keys().collect::<Vec<_>>()
        );
        assert_eq!(
            module.dep_libraries.keys().collect::<Vec<_>>(),
            twin.dep_libraries.keys().collect::<Vec<_>>()
        );
    }
}
