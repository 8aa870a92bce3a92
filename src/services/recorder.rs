use {
    super::{actor_context::ActorContext, owner::resolve_owner},
    crate::domain::{
        action::ActionKind,
        audit::AuditRecord,
        change_set::ChangeSet,
        config::RecorderConfig,
        entity::{Auditable, EntityRef},
        error::AuditError,
        sink::AuditSink,
    },
    std::sync::Arc,
};

/// Caller-supplied comment for a record: `(entity, actor, action)`.
pub type Annotation =
    Arc<dyn Fn(&dyn Auditable, Option<&EntityRef>, ActionKind) -> Option<String> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Recorded(AuditRecord),
    /// Auditing was switched off, or the action is not configured.
    Skipped,
}

impl RecordOutcome {
    pub fn record(&self) -> Option<&AuditRecord> {
        match self {
            Self::Recorded(record) => Some(record),
            Self::Skipped => None,
        }
    }
}

/// Turns an entity mutation into exactly one appended [`AuditRecord`].
///
/// Holds no mutable state of its own, so one instance can be shared
/// across tasks behind an `Arc`.
#[derive(Clone)]
pub struct Recorder {
    config: RecorderConfig,
    annotation: Option<Annotation>,
    sink: Arc<dyn AuditSink>,
}

impl Recorder {
    pub fn new(config: RecorderConfig, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            config,
            annotation: None,
            sink,
        }
    }

    pub fn with_annotation<F>(self, annotation: F) -> Self
    where
        F: Fn(&dyn Auditable, Option<&EntityRef>, ActionKind) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        self.with_shared_annotation(Arc::new(annotation))
    }

    pub(crate) fn with_shared_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Assemble the record for `action` without writing it. Use this with
    /// `insert_audit_record` to share the caller's transaction.
    pub fn build_record(
        &self,
        entity: &dyn Auditable,
        action: ActionKind,
    ) -> Result<AuditRecord, AuditError> {
        let audited_changes = if action.captures_changes() {
            self.config.filter().apply(entity.attribute_changes())
        } else {
            ChangeSet::new()
        };

        let owner = resolve_owner(entity, self.config.owner_association())?;
        let actor = ActorContext::current();
        let comment = self
            .annotation
            .as_ref()
            .and_then(|annotate| annotate(entity, actor.as_ref(), action));

        let record = AuditRecord::new(
            action,
            entity.entity_ref(),
            owner,
            actor,
            comment,
            audited_changes,
        );

        tracing::debug!(
            action = %record.action,
            auditable = %record.auditable,
            owner = %record.owner,
            changes = record.audited_changes.len(),
            "audit record assembled"
        );
        Ok(record)
    }

    pub async fn record(
        &self,
        entity: &dyn Auditable,
        action: ActionKind,
    ) -> Result<RecordOutcome, AuditError> {
        if !ActorContext::auditing_enabled() {
            tracing::warn!(
                action = %action,
                auditable = %entity.entity_ref(),
                "auditing disabled, record skipped"
            );
            return Ok(RecordOutcome::Skipped);
        }

        let record = self.build_record(entity, action)?;

        if let Err(e) = self.sink.append(&record).await {
            tracing::error!(
                action = %record.action,
                auditable = %record.auditable,
                error = %e,
                "audit sink rejected record"
            );
            return Err(e);
        }

        tracing::info!(
            id = %record.id,
            action = %record.action,
            auditable = %record.auditable,
            "audit record written"
        );
        Ok(RecordOutcome::Recorded(record))
    }

    pub async fn after_create(&self, entity: &dyn Auditable) -> Result<RecordOutcome, AuditError> {
        self.record(entity, ActionKind::Create).await
    }

    pub async fn after_update(&self, entity: &dyn Auditable) -> Result<RecordOutcome, AuditError> {
        self.record(entity, ActionKind::Update).await
    }

    pub async fn after_destroy(
        &self,
        entity: &dyn Auditable,
    ) -> Result<RecordOutcome, AuditError> {
        self.record(entity, ActionKind::Destroy).await
    }

    pub async fn after_find(&self, entity: &dyn Auditable) -> Result<RecordOutcome, AuditError> {
        self.record(entity, ActionKind::Find).await
    }
}
