//! Client library for the kanban project server.
//!
//! The crate is organised the hexagonal way: `domain` owns the data model and
//! the ports, `store` is the state container driven by callers, and
//! `outbound` holds the adapters (REST over `reqwest`, snapshot persistence).

pub mod config;
pub mod domain;
pub mod outbound;
pub mod store;

pub use config::ClientSettings;
pub use store::{Store, State};
