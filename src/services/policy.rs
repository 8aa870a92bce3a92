use {
    super::recorder::{Annotation, RecordOutcome, Recorder},
    crate::domain::{
        action::ActionKind,
        config::{RecorderConfig, RecorderOptions},
        entity::{Auditable, EntityRef},
        error::AuditError,
        sink::AuditSink,
    },
    std::{collections::BTreeMap, sync::Arc},
};

/// Per-entity-type audit declaration: the set of audited actions, sharing
/// one set of options and one annotation.
pub struct AuditPolicy {
    recorders: BTreeMap<ActionKind, Recorder>,
}

impl AuditPolicy {
    pub fn new(
        actions: &[ActionKind],
        options: RecorderOptions,
        sink: Arc<dyn AuditSink>,
    ) -> Result<Self, AuditError> {
        if actions.is_empty() {
            return Err(AuditError::InvalidConfiguration(
                "audit policy needs at least one action".to_string(),
            ));
        }

        let mut recorders = BTreeMap::new();
        for &action in actions {
            let config = RecorderConfig::new(action, options.clone())?;
            recorders.insert(action, Recorder::new(config, Arc::clone(&sink)));
        }
        Ok(Self { recorders })
    }

    pub fn with_annotation<F>(self, annotation: F) -> Self
    where
        F: Fn(&dyn Auditable, Option<&EntityRef>, ActionKind) -> Option<String>
            + Send
            + Sync
            + 'static,
    {
        let shared: Annotation = Arc::new(annotation);
        let recorders = self
            .recorders
            .into_iter()
            .map(|(action, recorder)| {
                (action, recorder.with_shared_annotation(Arc::clone(&shared)))
            })
            .collect();
        Self { recorders }
    }

    pub fn covers(&self, action: ActionKind) -> bool {
        self.recorders.contains_key(&action)
    }

    pub fn recorder(&self, action: ActionKind) -> Option<&Recorder> {
        self.recorders.get(&action)
    }

    pub async fn record(
        &self,
        entity: &dyn Auditable,
        action: ActionKind,
    ) -> Result<RecordOutcome, AuditError> {
        match self.recorders.get(&action) {
            Some(recorder) => recorder.record(entity, action).await,
            None => Ok(RecordOutcome::Skipped),
        }
    }
}
