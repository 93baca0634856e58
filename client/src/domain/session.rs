//! Signed-in identity held by the client.

use serde::{Deserialize, Serialize};

/// User record returned alongside an authentication token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Server primary key of the user.
    pub pk: i64,
    /// Contact e-mail, when the server discloses it.
    #[serde(default)]
    pub email: Option<String>,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
}

/// Successful login or registration answer.
///
/// Some server configurations only return the token, so `user` is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    /// Opaque access token.
    #[serde(alias = "key")]
    pub token: String,
    /// Identity of the token holder.
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Client-side session.
///
/// ## Invariants
/// - `token` absent means the client is signed out.
/// - The four fields are written together: [`Session::from_payload`]
///   overwrites all of them and [`Session::default`] clears all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    user_id: Option<i64>,
    email: Option<String>,
    username: Option<String>,
}

impl Session {
    /// Session mirroring an authentication answer.
    ///
    /// # Examples
    /// ```
    /// use kanban_client::domain::{AuthPayload, Session};
    ///
    /// let session = Session::from_payload(AuthPayload { token: "t".into(), user: None });
    /// assert_eq!(session.token(), Some("t"));
    /// assert!(session.user_id().is_none());
    /// ```
    pub fn from_payload(payload: AuthPayload) -> Self {
        let AuthPayload { token, user } = payload;
        match user {
            Some(AuthUser {
                pk,
                email,
                username,
            }) => Self {
                token: Some(token),
                user_id: Some(pk),
                email,
                username,
            },
            None => Self {
                token: Some(token),
                ..Self::default()
            },
        }
    }

    /// Access token, when signed in.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Server id of the signed-in user.
    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    /// E-mail of the signed-in user.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Username of the signed-in user.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_with_user_fills_every_field() {
        let payload: AuthPayload = serde_json::from_value(json!({
            "token": "abc",
            "user": { "pk": 7, "email": "ada@example.com", "username": "ada" }
        }))
        .expect("decode payload");

        let session = Session::from_payload(payload);
        assert_eq!(session.token(), Some("abc"));
        assert_eq!(session.user_id(), Some(7));
        assert_eq!(session.email(), Some("ada@example.com"));
        assert_eq!(session.username(), Some("ada"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn key_only_payload_is_accepted() {
        let payload: AuthPayload =
            serde_json::from_value(json!({ "key": "abc" })).expect("decode payload");
        assert_eq!(payload.token, "abc");
        assert!(payload.user.is_none());
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let session = Session::from_payload(AuthPayload {
            token: String::new(),
            user: None,
        });
        assert!(!session.is_authenticated());
        assert!(!Session::default().is_authenticated());
    }
}
