use {
    super::change_set::ChangeSet,
    derive_more::Display,
    serde::{Deserialize, Serialize},
};

/// Type + id of an entity, as stored on an audit record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{entity_type}#{entity_id}")]
pub struct EntityRef {
    entity_type: String,
    entity_id: String,
}

impl EntityRef {
    pub fn new(entity_type: impl Into<String>, entity_id: impl ToString) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.to_string(),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

/// What the recorder needs from a host entity.
pub trait Auditable: Send + Sync {
    fn entity_ref(&self) -> EntityRef;

    /// Attributes that differ between the last persisted state and the
    /// in-memory one. For a freshly created entity the baseline is all nil.
    fn attribute_changes(&self) -> ChangeSet;

    /// Related entity reachable through `name`, or `None` when the
    /// association is unknown or currently unset.
    fn association(&self, name: &str) -> Option<EntityRef> {
        let _ = name;
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_type_and_id() {
        let r = EntityRef::new("Model", 42);
        assert_eq!(r.to_string(), "Model#42");
        assert_eq!(r.entity_type(), "Model");
        assert_eq!(r.entity_id(), "42");
    }
}
