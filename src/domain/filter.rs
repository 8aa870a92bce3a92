use {super::change_set::ChangeSet, std::collections::BTreeSet};

/// Which attributes of a diff get recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AttributeFilter {
    #[default]
    All,
    Only(BTreeSet<String>),
    Except(BTreeSet<String>),
}

impl AttributeFilter {
    /// A non-empty `only` wins over `except`.
    pub fn from_sets(only: BTreeSet<String>, except: BTreeSet<String>) -> Self {
        if !only.is_empty() {
            Self::Only(only)
        } else if !except.is_empty() {
            Self::Except(except)
        } else {
            Self::All
        }
    }

    pub fn apply(&self, mut changes: ChangeSet) -> ChangeSet {
        match self {
            Self::All => {}
            Self::Only(names) => changes.retain(|name| names.contains(name)),
            Self::Except(names) => changes.retain(|name| !names.contains(name)),
        }
        changes
    }
}

pub fn filter(
    changes: ChangeSet,
    only: &BTreeSet<String>,
    except: &BTreeSet<String>,
) -> ChangeSet {
    AttributeFilter::from_sets(only.clone(), except.clone()).apply(changes)
}
