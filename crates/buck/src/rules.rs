use crate::target::{Target, flatname};

/// Everything needed to emit the remote-file rule pair for one artifact.
/// Coordinate/URL/checksum derivation belongs to the caller; this module
/// only renders rule text.
#[derive(Debug, Clone)]
pub struct RemoteArtifact {
    /// Full coordinate string, e.g. `com.acme:util:1.0`.
    pub coords: String,
    /// Local artifact file name, e.g. `util-1.0.jar`.
    pub file: String,
    pub url: String,
    pub sha1: String,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryRuleOptions {
    /// Additional library targets re-exported by the facade rule.
    pub deps: Vec<String>,
    /// Annotation processor class; switches the facade rule kind.
    pub processor: Option<String>,
    /// Optional intermediate library goal the processor rule depends on.
    pub processor_library: Option<String>,
}

/// Renders all build rules for one prebuilt library: a facade
/// `java_library` (or `java_annotation_processor`) plus one
/// `prebuilt_jar`/`remote_file` group per artifact.
pub fn library_rules(
    target: &Target,
    jars: &[RemoteArtifact],
    srcs: &[Option<RemoteArtifact>],
    options: &LibraryRuleOptions,
) -> Vec<String> {
    let facade = match &options.processor {
        Some(processor) => annotation_processor_rule(target, jars, options, processor),
        None => java_library_rule(target, jars, options),
    };
    let mut rules = vec![facade];
    for (i, jar) in jars.iter().enumerate() {
        rules.push(prebuilt_jar_rule(jar, srcs.get(i).and_then(|s| s.as_ref())));
    }
    rules
}

fn jar_refs(jars: &[RemoteArtifact], options: &LibraryRuleOptions) -> String {
    jars.iter()
        .map(|j| format!("':{}'", flatname(&j.coords)))
        .chain(options.deps.iter().map(|d| format!("'{d}'")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn java_library_rule(
    target: &Target,
    jars: &[RemoteArtifact],
    options: &LibraryRuleOptions,
) -> String {
    format!(
        r#"
java_library(
  name = '{goal}',
  exported_deps = [{deps}],
  visibility = ['PUBLIC'],
)
"#,
        goal = target.goal,
        deps = jar_refs(jars, options),
    )
}

fn annotation_processor_rule(
    target: &Target,
    jars: &[RemoteArtifact],
    options: &LibraryRuleOptions,
    processor: &str,
) -> String {
    if let Some(library_goal) = &options.processor_library {
        return format!(
            r#"
java_library(
  name = '{library_goal}',
  exported_deps = [{deps}],
  visibility = ['PUBLIC'],
)

java_annotation_processor(
  name = '{goal}',
  deps = [':{library_goal}'],
  processor_class = '{processor}',
  visibility = ['PUBLIC'],
)
"#,
            goal = target.goal,
            deps = jar_refs(jars, options),
        );
    }
    format!(
        r#"
java_annotation_processor(
  name = '{goal}',
  deps = [{deps}],
  processor_class = '{processor}',
  visibility = ['PUBLIC'],
)
"#,
        goal = target.goal,
        deps = jar_refs(jars, options),
    )
}

fn prebuilt_jar_rule(jar: &RemoteArtifact, src: Option<&RemoteArtifact>) -> String {
    let n = flatname(&jar.coords);
    let mut rule = format!(
        r#"
prebuilt_jar(
  name = '{n}',
  binary_jar = ':remote_{n}_jar',{source_jar}
  maven_coords = '{coords}',
)

remote_file(
  name = 'remote_{n}_jar',
  out = '{file}',
  url = '{url}',
  sha1 = '{sha1}',
)
"#,
        source_jar = if src.is_some() {
            format!("\n  source_jar = ':remote_{n}_src',")
        } else {
            String::new()
        },
        coords = jar.coords,
        file = jar.file,
        url = jar.url,
        sha1 = jar.sha1,
    );
    if let Some(src) = src {
        rule.push_str(&format!(
            r#"
remote_file(
  name = 'remote_{n}_src',
  out = '{file}',
  url = '{url}',
  sha1 = '{sha1}',
)
"#,
            file = src.file,
            url = src.url,
            sha1 = src.sha1,
        ));
    }
    rule
}
