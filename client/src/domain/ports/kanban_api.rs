//! Driven port for the project server REST API.
//!
//! The store talks to the server only through this trait, so tests can swap
//! in a double and the REST adapter stays the single owner of transport
//! details.

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;
use crate::domain::{
    AuthPayload, ErrorState, LoginCredentials, ProjectDetail, ProjectPage, RegistrationForm,
    Session,
};

define_port_error! {
    /// Normalised failure of one API call.
    pub enum ApiError {
        /// The request never produced a response (connect failure, reset).
        Transport { message: String } =>
            "request failed before a response arrived: {message}",
        /// No response arrived within the configured timeout.
        Timeout { message: String } =>
            "request timed out: {message}",
        /// The server answered with a non-success status.
        Rejected { status: u16, body: Value } =>
            "server rejected the request with status {status}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "response could not be decoded: {message}",
        /// The request could not be built.
        InvalidRequest { message: String } =>
            "request could not be built: {message}",
    }
}

impl ApiError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server refused the credentials or the token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Whether the call failed without any response from the server.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

impl From<&ApiError> for ErrorState {
    /// Uniform error record for every failure kind.
    ///
    /// Rejections keep the server body; failures without a usable body become
    /// a general message.
    fn from(value: &ApiError) -> Self {
        match value {
            ApiError::Rejected { body, .. } => Self::from_body(body),
            other => Self::general(other.to_string()),
        }
    }
}

/// Port for the project server REST API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KanbanApi: Send + Sync {
    /// Exchange credentials for a token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthPayload, ApiError>;

    /// Create an account and sign it in.
    async fn register(&self, form: &RegistrationForm) -> Result<AuthPayload, ApiError>;

    /// End the server-side session of `session`.
    async fn logout(&self, session: &Session) -> Result<(), ApiError>;

    /// List projects created by `created_by`.
    async fn list_projects(
        &self,
        session: &Session,
        created_by: i64,
    ) -> Result<ProjectPage, ApiError>;

    /// Fetch one project with its columns and tasks.
    async fn project_detail(&self, session: &Session, id: i64)
    -> Result<ProjectDetail, ApiError>;
}
