//! In-memory snapshot persistence.

use std::sync::{Mutex, PoisonError};

use crate::domain::ports::{StatePersistence, StatePersistenceError};
use crate::store::State;

/// Keeps the last saved snapshot in memory and counts writes.
///
/// Useful for embedding the store where no durable storage exists, and for
/// asserting on persisted state in tests.
#[derive(Debug, Default)]
pub struct InMemoryStatePersistence {
    inner: Mutex<Snapshot>,
}

#[derive(Debug, Default)]
struct Snapshot {
    state: Option<State>,
    saves: usize,
}

impl InMemoryStatePersistence {
    /// Start with `state` already stored.
    pub fn with_snapshot(state: State) -> Self {
        Self {
            inner: Mutex::new(Snapshot {
                state: Some(state),
                saves: 0,
            }),
        }
    }

    /// Last saved snapshot.
    pub fn snapshot(&self) -> Option<State> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    /// Number of saves performed.
    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).saves
    }
}

impl StatePersistence for InMemoryStatePersistence {
    fn load(&self) -> Result<Option<State>, StatePersistenceError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &State) -> Result<(), StatePersistenceError> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.state = Some(state.clone());
        inner.saves += 1;
        Ok(())
    }
}
