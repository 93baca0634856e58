//! Authentication inputs: login credentials and registration forms.
//!
//! Inputs are validated locally before the store talks to the API port so a
//! blank form never costs a round trip. The server stays the authority on
//! anything deeper (password strength, unique e-mail and so on).

use std::fmt;

use zeroize::Zeroizing;

use super::error_state::{ErrorState, GENERAL_ERROR_FIELD};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<&LoginValidationError> for ErrorState {
    fn from(value: &LoginValidationError) -> Self {
        // The login form only renders password and general messages.
        let field = match value {
            LoginValidationError::EmptyUsername => GENERAL_ERROR_FIELD,
            LoginValidationError::EmptyPassword => "password",
        };
        Self::single(field, value.to_string())
    }
}

/// Validated login credentials sent to the authentication endpoint.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use kanban_client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username sent to the server.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors for [`RegistrationForm::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// E-mail was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<&RegistrationValidationError> for ErrorState {
    fn from(value: &RegistrationValidationError) -> Self {
        let field = match value {
            RegistrationValidationError::EmptyUsername => "username",
            RegistrationValidationError::EmptyEmail => "email",
            RegistrationValidationError::EmptyPassword => "password1",
        };
        Self::single(field, value.to_string())
    }
}

/// Optional profile picture attached to a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl Avatar {
    /// Wrap raw image bytes, guessing the content type from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_owned();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// File name reported in the multipart part.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// MIME type reported in the multipart part.
    pub fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Validated registration request.
///
/// The password is sent twice by the REST adapter (`password1` and
/// `password2`) because the server expects a confirmation field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    username: String,
    email: String,
    password: Zeroizing<String>,
    avatar: Option<Avatar>,
}

impl RegistrationForm {
    /// Validate raw inputs into a registration form.
    pub fn try_new(
        username: &str,
        email: &str,
        password: &str,
        avatar: Option<Avatar>,
    ) -> Result<Self, RegistrationValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RegistrationValidationError::EmptyUsername);
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(RegistrationValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }

        Ok(Self {
            username: username.to_owned(),
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            avatar,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact e-mail address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Avatar attachment, when one was supplied.
    pub fn avatar(&self) -> Option<&Avatar> {
        self.avatar.as_ref()
    }
}
