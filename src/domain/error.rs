use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("association `{association}` not found on {entity}")]
    AssociationNotFound { entity: String, association: String },

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("persistence: {0}")]
    Persistence(String),

    #[error("no actor scope established for the current task")]
    NoActorScope,
}

impl AuditError {
    /// True when the sink rejected the write, whatever the backend.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Serialization(_) | Self::Persistence(_)
        )
    }
}
