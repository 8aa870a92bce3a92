pub mod domain;
pub mod infra;
pub mod services;
pub mod settings;

pub use {
    domain::{
        action::ActionKind,
        audit::AuditRecord,
        change_set::{Change, ChangeSet},
        config::{AttributeNames, RecorderConfig, RecorderOptions},
        entity::{Auditable, EntityRef},
        error::AuditError,
        filter::AttributeFilter,
        sink::AuditSink,
    },
    services::{
        actor_context::ActorContext,
        policy::AuditPolicy,
        recorder::{Annotation, RecordOutcome, Recorder},
    },
};
