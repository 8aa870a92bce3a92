use {
    crate::domain::{entity::EntityRef, error::AuditError},
    std::{cell::RefCell, future::Future},
};

#[derive(Debug, Clone)]
struct ScopeState {
    actor: Option<EntityRef>,
    auditing: bool,
}

tokio::task_local! {
    static AUDIT_SCOPE: RefCell<ScopeState>;
}

/// Task-scoped "who is acting" slot.
///
/// Each task (or synchronous call tree) that wants an actor attached to its
/// audit records runs inside [`ActorContext::scope`]. Concurrent tasks never
/// see each other's actor, and nothing leaks past the end of a scope.
/// Outside any scope there is no actor and auditing is enabled.
pub struct ActorContext;

impl ActorContext {
    pub async fn scope<F: Future>(actor: Option<EntityRef>, fut: F) -> F::Output {
        AUDIT_SCOPE
            .scope(RefCell::new(ScopeState { actor, auditing: true }), fut)
            .await
    }

    pub fn sync_scope<R>(actor: Option<EntityRef>, f: impl FnOnce() -> R) -> R {
        AUDIT_SCOPE.sync_scope(RefCell::new(ScopeState { actor, auditing: true }), f)
    }

    pub fn set_current(actor: EntityRef) -> Result<(), AuditError> {
        AUDIT_SCOPE
            .try_with(|state| state.borrow_mut().actor = Some(actor))
            .map_err(|_| AuditError::NoActorScope)
    }

    pub fn current() -> Option<EntityRef> {
        AUDIT_SCOPE
            .try_with(|state| state.borrow().actor.clone())
            .ok()
            .flatten()
    }

    pub fn clear() -> Result<(), AuditError> {
        AUDIT_SCOPE
            .try_with(|state| state.borrow_mut().actor = None)
            .map_err(|_| AuditError::NoActorScope)
    }

    /// Run `fut` with `actor` as the current actor; the enclosing scope is
    /// untouched once it completes.
    pub async fn audit_as<F: Future>(actor: EntityRef, fut: F) -> F::Output {
        let state = ScopeState {
            actor: Some(actor),
            auditing: Self::auditing_enabled(),
        };
        AUDIT_SCOPE.scope(RefCell::new(state), fut).await
    }

    /// Run `fut` with recording switched off.
    pub async fn without_auditing<F: Future>(fut: F) -> F::Output {
        let state = ScopeState {
            actor: Self::current(),
            auditing: false,
        };
        AUDIT_SCOPE.scope(RefCell::new(state), fut).await
    }

    pub fn auditing_enabled() -> bool {
        AUDIT_SCOPE
            .try_with(|state| state.borrow().auditing)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u32) -> EntityRef {
        EntityRef::new("User", id)
    }

    #[test]
    fn no_scope_means_no_actor() {
        assert_eq!(ActorContext::current(), None);
        assert!(ActorContext::auditing_enabled());
        assert!(matches!(
            ActorContext::set_current(user(1)),
            Err(AuditError::NoActorScope)
        ));
        assert!(matches!(ActorContext::clear(), Err(AuditError::NoActorScope)));
    }

    #[test]
    fn sync_scope_set_and_clear() {
        ActorContext::sync_scope(None, || {
            assert_eq!(ActorContext::current(), None);
            ActorContext::set_current(user(1)).unwrap();
            assert_eq!(ActorContext::current(), Some(user(1)));
            ActorContext::clear().unwrap();
            assert_eq!(ActorContext::current(), None);
        });
        assert_eq!(ActorContext::current(), None);
    }

    #[tokio::test]
    async fn audit_as_restores_outer_actor() {
        ActorContext::scope(Some(user(1)), async {
            let inner = ActorContext::audit_as(user(2), async { ActorContext::current() }).await;
            assert_eq!(inner, Some(user(2)));
            assert_eq!(ActorContext::current(), Some(user(1)));
        })
        .await;
    }

    #[tokio::test]
    async fn without_auditing_keeps_actor() {
        ActorContext::scope(Some(user(3)), async {
            ActorContext::without_auditing(async {
                assert!(!ActorContext::auditing_enabled());
                assert_eq!(ActorContext::current(), Some(user(3)));
            })
            .await;
            assert!(ActorContext::auditing_enabled());
        })
        .await;
    }
}
