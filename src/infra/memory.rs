use {
    crate::domain::{
        audit::AuditRecord, entity::EntityRef, error::AuditError, sink::AuditSink,
    },
    std::{
        future::Future,
        pin::Pin,
        sync::{
            Mutex, PoisonError,
            atomic::{AtomicBool, Ordering},
        },
    },
};

/// In-process append-only sink. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
    reject_writes: AtomicBool,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every append fails with [`AuditError::Persistence`].
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<AuditRecord> {
        self.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn for_auditable(&self, entity: &EntityRef) -> Vec<AuditRecord> {
        self.lock()
            .iter()
            .filter(|r| &r.auditable == entity)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<AuditRecord>> {
        // push is the only mutation, so a poisoned lock still holds whole records.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AuditSink for MemoryAuditSink {
    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuditError>> + Send + 'a>> {
        Box::pin(async move {
            if self.reject_writes.load(Ordering::SeqCst) {
                return Err(AuditError::Persistence(format!(
                    "write rejected for audit {}",
                    record.id
                )));
            }
            self.lock().push(record.clone());
            Ok(())
        })
    }
}
