//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod kanban_api;
mod state_persistence;

#[cfg(test)]
pub use kanban_api::MockKanbanApi;
pub use kanban_api::{ApiError, KanbanApi};
#[cfg(test)]
pub use state_persistence::MockStatePersistence;
pub use state_persistence::{NoOpStatePersistence, StatePersistence, StatePersistenceError};
