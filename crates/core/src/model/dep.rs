use indexmap::IndexMap;

/// Tri-state classification of one dependency use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepFlags {
    pub test: bool,
    pub provided: bool,
    pub exported: bool,
}

impl DepFlags {
    /// Combines two uses of the same identity. `test` and `provided`
    /// must hold across all uses to survive; `exported` is sticky.
    /// Commutative and associative, so merging is order independent.
    pub fn merge(self, other: DepFlags) -> DepFlags {
        DepFlags {
            test: self.test && other.test,
            provided: self.provided && other.provided,
            exported: self.exported || other.exported,
        }
    }
}

/// Raw edge collected from a record's dependency attributes, keyed by
/// the resolved target identity it points at.
#[derive(Debug, Clone)]
pub struct DependencyEdge {
    pub target: String,
    pub flags: DepFlags,
}

/// Edge wired to a sibling module in the same workspace.
#[derive(Debug, Clone)]
pub struct ModuleDep {
    pub path: String,
    pub name: String,
    pub flags: DepFlags,
}

/// Edge wired to a prebuilt/external library from the catalog.
#[derive(Debug, Clone)]
pub struct LibraryDep {
    pub target: String,
    pub flags: DepFlags,
}

/// Anything carrying merge-able dependency flags.
pub trait Flagged {
    fn flags(&self) -> DepFlags;
    fn set_flags(&mut self, flags: DepFlags);
}

impl Flagged for DependencyEdge {
    fn flags(&self) -> DepFlags {
        self.flags
    }
    fn set_flags(&mut self, flags: DepFlags) {
        self.flags = flags;
    }
}

impl Flagged for LibraryDep {
    fn flags(&self) -> DepFlags {
        self.flags
    }
    fn set_flags(&mut self, flags: DepFlags) {
        self.flags = flags;
    }
}

/// Merges a batch of edges into an accumulating map, combining flags on
/// identities present in both.
pub fn merge_into<T: Flagged>(into: &mut IndexMap<String, T>, from: IndexMap<String, T>) {
    for (key, incoming) in from {
        match into.get_mut(&key) {
            Some(existing) => {
                let merged = existing.flags().merge(incoming.flags());
                existing.set_flags(merged);
            }
            None => {
                into.insert(key, incoming);
            }
        }
    }
}
