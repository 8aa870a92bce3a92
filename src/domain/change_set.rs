use {
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    serde_json::{Map, Value},
    std::collections::{BTreeMap, BTreeSet},
};

/// Previous and new value of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub previous: Value,
    pub new: Value,
}

impl Change {
    pub fn new(previous: Value, new: Value) -> Self {
        Self { previous, new }
    }

    pub fn is_noop(&self) -> bool {
        self.previous == self.new
    }
}

// Stored as `[previous, new]`.
impl Serialize for Change {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.previous, &self.new).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Change {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (previous, new) = <(Value, Value)>::deserialize(deserializer)?;
        Ok(Self { previous, new })
    }
}

/// Attribute name → change. Never holds an entry whose two values are equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Change>",
    into = "BTreeMap<String, Change>"
)]
pub struct ChangeSet {
    changes: BTreeMap<String, Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff two attribute snapshots. Attributes missing on one side count as nil.
    pub fn diff(previous: &Map<String, Value>, current: &Map<String, Value>) -> Self {
        let names: BTreeSet<&String> = previous.keys().chain(current.keys()).collect();
        let mut set = Self::new();
        for name in names {
            let before = previous.get(name).cloned().unwrap_or(Value::Null);
            let after = current.get(name).cloned().unwrap_or(Value::Null);
            set.insert(name.clone(), before, after);
        }
        set
    }

    /// Diff against an all-nil baseline, as for a freshly created entity.
    pub fn created(current: &Map<String, Value>) -> Self {
        Self::diff(&Map::new(), current)
    }

    /// Returns `false` (and stores nothing) when `previous == new`.
    pub fn insert(&mut self, name: impl Into<String>, previous: Value, new: Value) -> bool {
        let change = Change::new(previous, new);
        if change.is_noop() {
            return false;
        }
        self.changes.insert(name.into(), change);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Change> {
        self.changes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.changes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Change)> {
        self.changes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.changes.retain(|name, _| keep(name));
    }
}

impl From<BTreeMap<String, Change>> for ChangeSet {
    fn from(mut changes: BTreeMap<String, Change>) -> Self {
        changes.retain(|_, change| !change.is_noop());
        Self { changes }
    }
}

impl From<ChangeSet> for BTreeMap<String, Change> {
    fn from(set: ChangeSet) -> Self {
        set.changes
    }
}
