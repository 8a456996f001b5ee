use crate::diag::Diagnostics;
use crate::error::{CoreError, Result};
use crate::library::LibraryCatalog;
use crate::model::{DependencyEdge, LibraryDep, Module, ModuleDep, merge_into};
use cairn_buck::Target;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, VecDeque};

/// Phase 5: resolve every raw edge against sibling modules and the
/// library catalog. The two resolutions are independent and may both
/// apply. An identity matching neither is reported unless it is a
/// same-folder local reference, which is implicit inside an IDE module.
pub fn wire_dependencies(
    modules: &mut IndexMap<String, Module>,
    module_by_target: &HashMap<String, String>,
    libs: &LibraryCatalog,
    diag: &mut dyn Diagnostics,
) -> Result<()> {
    let names: HashMap<String, String> = modules
        .iter()
        .map(|(path, m)| (path.clone(), m.name.clone()))
        .collect();

    let paths: Vec<String> = modules.keys().cloned().collect();
    for path in paths {
        let edges: Vec<DependencyEdge> = modules[&path].deps.values().cloned().collect();

        for edge in edges {
            let mut resolved = false;

            if let Some(dep_path) = module_by_target.get(&edge.target) {
                // A self edge cannot become a module dependency; it still
                // counts as resolved (merged attribute lists of the own
                // module can legitimately mention own targets).
                if dep_path != &path {
                    let name = names.get(dep_path).cloned().unwrap_or_default();
                    modules[&path].dep_modules.insert(dep_path.clone(), ModuleDep {
                        path: dep_path.clone(),
                        name,
                        flags: edge.flags,
                    });
                }
                resolved = true;
            }

            if libs.contains(&edge.target) {
                let closure = library_closure(libs, &edge.target)?;
                let additions: IndexMap<String, LibraryDep> = closure
                    .into_iter()
                    .map(|target| {
                        (target.clone(), LibraryDep {
                            target,
                            flags: edge.flags,
                        })
                    })
                    .collect();
                merge_into(&mut modules[&path].dep_libraries, additions);
                resolved = true;
            }

            if !resolved {
                let target = Target::parse(&edge.target)?;
                if !target.is_local() && target.path != path {
                    diag.unresolved_dependency(&path, &edge.target);
                }
            }
        }
    }
    Ok(())
}

/// Breadth-first closure over a library's declared dependencies. The
/// visited set guards against cyclic and self-referential declarations;
/// identities absent from the catalog are assumed module-only and
/// silently dropped.
fn library_closure(libs: &LibraryCatalog, start: &str) -> Result<Vec<String>> {
    let mut results: IndexSet<String> = IndexSet::new();
    let mut unprocessed: VecDeque<String> = VecDeque::from([start.to_string()]);

    while let Some(current) = unprocessed.pop_front() {
        results.insert(current.clone());
        let library = libs
            .get(&current)
            .ok_or_else(|| CoreError::Internal(format!("not in library catalog: {current}")))?;
        for spec in &library.options.deps {
            let target = library.target.resolve(Target::parse(spec)?).to_string();
            if libs.contains(&target) && !results.contains(&target) {
                unprocessed.push_back(target);
            }
        }
    }

    Ok(results.into_iter().collect())
}
