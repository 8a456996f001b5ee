use indexmap::IndexMap;

/// IDE resource classification of a source root, derived from markers
/// on the contributing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Resource,
    TestResource,
}

/// One classified source folder of a module, keyed in `Module::srcs`
/// by its alias (usually the folder itself, `<alias>-gen` for
/// generated roots).
#[derive(Debug, Clone)]
pub struct SourceRoot {
    /// Folder relative to the module folder for plain roots; build
    /// output path for generated roots.
    pub path: String,
    pub test: bool,
    pub generated: bool,
    pub resources: Option<ResourceKind>,
    /// Package prefix for package-style modules.
    pub package: Option<String>,
}

/// Inserts under `base`, or under `base` plus the smallest unused
/// non-negative integer suffix. Generated roots never displace a plain
/// root sharing the alias; they land on a synthesized one.
pub fn insert_unique(
    map: &mut IndexMap<String, SourceRoot>,
    base: &str,
    root: SourceRoot,
) -> String {
    if !map.contains_key(base) {
        map.insert(base.to_string(), root);
        return base.to_string();
    }
    let mut n = 1u32;
    loop {
        let alias = format!("{base}{n}");
        if !map.contains_key(&alias) {
            map.insert(alias.clone(), root);
            return alias;
        }
        n += 1;
    }
}
