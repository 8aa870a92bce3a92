use {
    super::{audit::AuditRecord, error::AuditError},
    std::{future::Future, pin::Pin},
};

/// Append-only destination for audit records.
pub trait AuditSink: Send + Sync {
    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuditError>> + Send + 'a>>;
}
