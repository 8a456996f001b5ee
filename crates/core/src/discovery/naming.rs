use crate::model::Module;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// Flattens a module path into a name candidate: folder separators and
/// underscores become dots (`svc/event_log` → `svc.event.log`).
pub fn path_derived_name(path: &str) -> String {
    path.chars()
        .map(|c| if c == '/' || c == '_' { '.' } else { c })
        .collect()
}

/// Single deterministic naming pass. The root name is claimed before any
/// module; a module whose folder basename is unique (and differs from
/// the root name) keeps the plain basename, every other module falls
/// back to a path-derived candidate. All candidates then pass the global
/// registry, which suffixes duplicates with the smallest unused integer.
///
/// Grouping and claiming iterate in sorted-path order, so assigned names
/// do not depend on catalog enumeration order.
pub fn assign_names(modules: &mut IndexMap<String, Module>, root_name: &str) {
    let mut by_basename: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut paths: Vec<String> = modules.keys().cloned().collect();
    paths.sort();
    for path in paths {
        let basename = Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        by_basename.entry(basename).or_default().push(path);
    }

    let mut registry = NameRegistry::new();
    registry.claim(root_name); // reserved ahead of any module claim

    for (basename, group) in by_basename {
        let path_derived = basename == root_name || group.len() > 1;
        for path in group {
            let candidate = if path_derived {
                path_derived_name(&path)
            } else {
                basename.clone()
            };
            let name = registry.claim(&candidate);
            modules[&path].name = name;
        }
    }
}

/// Global de-duplication registry: first claim of a base gets it
/// unsuffixed, later claims append 1, 2, ... with an amortized O(1)
/// counter per base.
struct NameRegistry {
    claimed: HashSet<String>,
    next_suffix: HashMap<String, u32>,
}

impl NameRegistry {
    fn new() -> Self {
        NameRegistry {
            claimed: HashSet::new(),
            next_suffix: HashMap::new(),
        }
    }

    fn claim(&mut self, base: &str) -> String {
        if self.claimed.insert(base.to_string()) {
            return base.to_string();
        }
        let counter = self.next_suffix.entry(base.to_string()).or_insert(1);
        loop {
            let candidate = format!("{base}{counter}");
            *counter += 1;
            if self.claimed.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
