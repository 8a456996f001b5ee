use crate::error::Result;
use crate::model::{DepFlags, DependencyEdge};
use cairn_buck::{Target, TargetRecord};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Collects one raw edge per distinct identity across the record's four
/// dependency attributes. Local (`:goal`) identities resolve against the
/// declaring target's folder before anything else, so flag membership
/// and deduplication both operate on normalized identities.
pub fn edges_of(
    record: &TargetRecord,
    owner: &Target,
    is_test: bool,
) -> Result<IndexMap<String, DependencyEdge>> {
    let resolve_all = |specs: &[String]| -> Result<Vec<String>> {
        specs
            .iter()
            .map(|spec| Ok(owner.resolve(Target::parse(spec)?).to_string()))
            .collect()
    };

    let plain = resolve_all(&record.deps)?;
    let provided = resolve_all(&record.provided_deps)?;
    let exported = resolve_all(&record.exported_deps)?;
    let exported_provided = resolve_all(&record.exported_provided_deps)?;

    let provided_set: HashSet<&String> =
        provided.iter().chain(exported_provided.iter()).collect();
    let exported_set: HashSet<&String> =
        exported.iter().chain(exported_provided.iter()).collect();

    let mut edges = IndexMap::new();
    for identity in plain
        .iter()
        .chain(provided.iter())
        .chain(exported.iter())
        .chain(exported_provided.iter())
    {
        if edges.contains_key(identity) {
            continue;
        }
        edges.insert(identity.clone(), DependencyEdge {
            target: identity.clone(),
            flags: DepFlags {
                test: is_test,
                provided: provided_set.contains(identity),
                exported: exported_set.contains(identity),
            },
        });
    }
    Ok(edges)
}
