//! Driven port for persisting store snapshots between runs.

use super::define_port_error;
use crate::store::State;

define_port_error! {
    /// Errors raised while reading or writing a snapshot.
    pub enum StatePersistenceError {
        /// The storage medium could not be read or written.
        Io { message: String } =>
            "state snapshot i/o failed: {message}",
        /// The state could not be serialised.
        Encode { message: String } =>
            "state snapshot encode failed: {message}",
        /// A stored snapshot could not be parsed.
        Decode { message: String } =>
            "state snapshot decode failed: {message}",
    }
}

/// Port storing the full state after every mutation.
#[cfg_attr(test, mockall::automock)]
pub trait StatePersistence: Send + Sync {
    /// Load the last snapshot, `None` when nothing was stored yet.
    fn load(&self) -> Result<Option<State>, StatePersistenceError>;

    /// Replace the stored snapshot with `state`.
    fn save(&self, state: &State) -> Result<(), StatePersistenceError>;
}

/// Persistence that stores nothing, for callers that keep state in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpStatePersistence;

impl StatePersistence for NoOpStatePersistence {
    fn load(&self) -> Result<Option<State>, StatePersistenceError> {
        Ok(None)
    }

    fn save(&self, _state: &State) -> Result<(), StatePersistenceError> {
        Ok(())
    }
}
