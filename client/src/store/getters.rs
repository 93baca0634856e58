//! Pure derived values over [`State`].
//!
//! Form error getters report a missing entry as `None` rather than a
//! placeholder string, so callers can tell "no error" from an error.

use crate::domain::{GENERAL_ERROR_FIELD, ProjectSummary};

use super::State;

/// Fallback key used by the server for authentication and lookup failures.
const DETAIL_ERROR_FIELD: &str = "detail";

/// Errors rendered by the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormErrors {
    /// Password field message.
    pub password: Option<String>,
    /// Message not tied to one field.
    pub general: Option<String>,
}

/// Errors rendered by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFormErrors {
    /// Username field message.
    pub username: Option<String>,
    /// Password field message.
    pub password: Option<String>,
    /// E-mail field message.
    pub email: Option<String>,
    /// Avatar field message.
    pub avatar: Option<String>,
}

/// Whether a non-empty token is held.
pub fn is_authorized(state: &State) -> bool {
    state.session.is_authenticated()
}

/// Project the login form errors out of the error state.
pub fn login_form_errors(state: &State) -> LoginFormErrors {
    let errors = &state.error_state;
    LoginFormErrors {
        password: errors.rendered("password"),
        general: errors.first_rendered(&[GENERAL_ERROR_FIELD, DETAIL_ERROR_FIELD]),
    }
}

/// Project the registration form errors out of the error state.
///
/// The server reports password problems on either confirmation field, so the
/// first of `password1`, `password2` and `password` wins.
pub fn register_form_errors(state: &State) -> RegisterFormErrors {
    let errors = &state.error_state;
    RegisterFormErrors {
        username: errors.rendered("username"),
        password: errors.first_rendered(&["password1", "password2", "password"]),
        email: errors.rendered("email"),
        avatar: errors.rendered("avatar"),
    }
}

/// The project list as stored.
pub fn projects(state: &State) -> &[ProjectSummary] {
    state.project_list.as_slice()
}
