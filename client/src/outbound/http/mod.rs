//! REST adapter for the project server.
//!
//! This module provides a thin `reqwest` implementation of the `KanbanApi`
//! port.

mod rest_api;

pub use rest_api::{AUTH_HEADER_PREFIX, RestKanbanApi};
