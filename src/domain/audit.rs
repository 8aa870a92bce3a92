use {
    super::{action::ActionKind, change_set::ChangeSet, entity::EntityRef},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// One captured change event, ready for the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub action: ActionKind,
    pub auditable: EntityRef,
    pub owner: EntityRef,
    pub actor: Option<EntityRef>,
    pub comment: Option<String>,
    pub audited_changes: ChangeSet,
    pub created_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Fresh id (v7, time-ordered) and timestamp on every call.
    pub fn new(
        action: ActionKind,
        auditable: EntityRef,
        owner: EntityRef,
        actor: Option<EntityRef>,
        comment: Option<String>,
        audited_changes: ChangeSet,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            action,
            auditable,
            owner,
            actor,
            comment,
            audited_changes,
            created_at: Utc::now(),
        }
    }
}
