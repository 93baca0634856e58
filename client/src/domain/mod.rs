//! Domain primitives for the kanban client.
//!
//! Purpose: Define strongly typed values exchanged with the project server
//! and held by the store. Server records are modelled loosely: known fields
//! are typed, everything else passes through untouched.
//!
//! Public surface:
//! - LoginCredentials / RegistrationForm: validated inputs for auth actions.
//! - Session / AuthPayload: the signed-in identity and the server's answer.
//! - ErrorState: field-keyed validation messages from failed actions.
//! - ProjectSummary / ProjectPage / ProjectDetail: project records.
//! - column_titles: pure projection feeding the kanban board.

pub mod auth;
pub mod error_state;
pub mod ports;
pub mod project;
pub mod session;

pub use self::auth::{
    Avatar, LoginCredentials, LoginValidationError, RegistrationForm,
    RegistrationValidationError,
};
pub use self::error_state::{ErrorMessages, ErrorState, GENERAL_ERROR_FIELD};
pub use self::project::{
    Column, ProjectDetail, ProjectPage, ProjectSummary, Sprint, Task, column_titles,
};
pub use self::session::{AuthPayload, AuthUser, Session};
