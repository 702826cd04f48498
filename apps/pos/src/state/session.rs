//! # Session State
//!
//! Holds the current `Session` snapshot.
//!
//! Core operations never mutate a session; they return the next one. `apply`
//! swaps the stored snapshot only when the operation succeeds, so a failed
//! checkout leaves inventory, ledger and history exactly as they were.

use std::sync::{Arc, Mutex};

use tripus_core::{CoreResult, Session};

#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> Session {
        self.with_session(Session::clone)
    }

    /// Executes a function with read access to the current snapshot.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.session.lock().expect("Session mutex poisoned");
        f(&session)
    }

    /// Runs a transition and stores the resulting snapshot.
    ///
    /// The lock is held for the whole transition; two checkouts of the same
    /// cart cannot both observe it as uncommitted.
    pub fn apply<F, R>(&self, f: F) -> CoreResult<R>
    where
        F: FnOnce(&Session) -> CoreResult<(Session, R)>,
    {
        let mut session = self.session.lock().expect("Session mutex poisoned");
        let (next, result) = f(&session)?;
        *session = next;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripus_core::generator::default_products;
    use tripus_core::CoreError;

    #[test]
    fn test_apply_swaps_on_success() {
        let state = SessionState::new(Session::new(default_products()));

        state
            .apply(|s| Ok((s.delete_product("P001")?, ())))
            .unwrap();

        assert_eq!(state.with_session(|s| s.products().len()), 4);
    }

    #[test]
    fn test_apply_keeps_snapshot_on_error() {
        let state = SessionState::new(Session::new(default_products()));

        let err = state
            .apply(|s| Ok((s.delete_product("P999")?, ())))
            .unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert_eq!(state.with_session(|s| s.products().len()), 5);
    }
}
