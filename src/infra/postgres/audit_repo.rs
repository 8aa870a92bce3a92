use {
    crate::domain::{
        action::ActionKind, audit::AuditRecord, change_set::ChangeSet, entity::EntityRef,
        error::AuditError, sink::AuditSink,
    },
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

/// Append `record` inside a caller-owned transaction, so the audit row
/// commits or rolls back together with the mutation it describes.
pub async fn insert_audit_record(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    record: &AuditRecord,
) -> Result<(), AuditError> {
    let changes = serde_json::to_value(&record.audited_changes)?;

    sqlx::query(
        r#"
        INSERT INTO audits (
            id, action, auditable_type, auditable_id, owner_type, owner_id,
            user_type, user_id, comment, audited_changes, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(record.id)
    .bind(record.action.as_str())
    .bind(record.auditable.entity_type())
    .bind(record.auditable.entity_id())
    .bind(record.owner.entity_type())
    .bind(record.owner.entity_id())
    .bind(record.actor.as_ref().map(EntityRef::entity_type))
    .bind(record.actor.as_ref().map(EntityRef::entity_id))
    .bind(record.comment.as_deref())
    .bind(changes)
    .bind(record.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    id: Uuid,
    action: String,
    auditable_type: String,
    auditable_id: String,
    owner_type: String,
    owner_id: String,
    user_type: Option<String>,
    user_id: Option<String>,
    comment: Option<String>,
    audited_changes: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditRecord {
    type Error = AuditError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let actor = match (row.user_type, row.user_id) {
            (Some(t), Some(id)) => Some(EntityRef::new(t, id)),
            _ => None,
        };
        let audited_changes: ChangeSet = serde_json::from_value(row.audited_changes)?;

        Ok(AuditRecord {
            id: row.id,
            action: ActionKind::try_from(row.action.as_str())?,
            auditable: EntityRef::new(row.auditable_type, row.auditable_id),
            owner: EntityRef::new(row.owner_type, row.owner_id),
            actor,
            comment: row.comment,
            audited_changes,
            created_at: row.created_at,
        })
    }
}

/// Records for one auditable entity, oldest first.
pub async fn list_for_auditable(
    pool: &PgPool,
    entity: &EntityRef,
) -> Result<Vec<AuditRecord>, AuditError> {
    let rows = sqlx::query_as::<_, AuditRow>(
        r#"
        SELECT id, action, auditable_type, auditable_id, owner_type, owner_id,
               user_type, user_id, comment, audited_changes, created_at
        FROM audits
        WHERE auditable_type = $1 AND auditable_id = $2
        ORDER BY created_at, id
        "#,
    )
    .bind(entity.entity_type())
    .bind(entity.entity_id())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(AuditRecord::try_from).collect()
}

/// Sink that writes each record in its own transaction.
#[derive(Clone)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), AuditError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(sqlx::Error::from)?;
        Ok(())
    }

    async fn append_inner(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut tx = self.pool.begin().await?;
        insert_audit_record(&mut tx, record).await?;
        tx.commit().await?;
        Ok(())
    }
}

impl AuditSink for PgAuditSink {
    fn append<'a>(
        &'a self,
        record: &'a AuditRecord,
    ) -> Pin<Box<dyn Future<Output = Result<(), AuditError>> + Send + 'a>> {
        Box::pin(self.append_inner(record))
    }
}
