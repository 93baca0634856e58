//! Field-keyed error payloads returned by failed actions.
//!
//! The server answers validation failures with an object mapping field names
//! to a message or a list of messages. The store keeps that mapping verbatim
//! so getters can pick the fields a form renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field used by the server for errors that belong to no single field.
pub const GENERAL_ERROR_FIELD: &str = "non_field_errors";

/// Messages attached to a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessages {
    /// A lone message string.
    One(String),
    /// Several messages, in server order.
    Many(Vec<String>),
}

impl ErrorMessages {
    /// Render the messages as one line.
    ///
    /// # Examples
    /// ```
    /// use kanban_client::domain::ErrorMessages;
    ///
    /// let messages = ErrorMessages::Many(vec!["Too short.".into(), "Too common.".into()]);
    /// assert_eq!(messages.render(), "Too short. Too common.");
    /// ```
    pub fn render(&self) -> String {
        match self {
            Self::One(message) => message.clone(),
            Self::Many(messages) => messages.join(" "),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(message) => Self::One(message.clone()),
            Value::Array(items) => Self::Many(items.iter().map(value_text).collect()),
            other => Self::One(other.to_string()),
        }
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Last error payload committed by a failed action.
///
/// ## Invariants
/// - An empty mapping means no active error.
/// - The mapping is only ever replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorState(BTreeMap<String, ErrorMessages>);

impl ErrorState {
    /// Error state with one message on one field.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), ErrorMessages::Many(vec![message.into()]));
        Self(fields)
    }

    /// Error state carrying only a general (non-field) message.
    pub fn general(message: impl Into<String>) -> Self {
        Self::single(GENERAL_ERROR_FIELD, message)
    }

    /// Build an error state from a server error body.
    ///
    /// Objects are kept field by field. Any other JSON shape becomes a
    /// general message so nothing the server said is lost.
    ///
    /// # Examples
    /// ```
    /// use kanban_client::domain::ErrorState;
    /// use serde_json::json;
    ///
    /// let state = ErrorState::from_body(&json!({ "password": ["bad"] }));
    /// assert_eq!(state.rendered("password").as_deref(), Some("bad"));
    /// ```
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Object(fields) => Self(
                fields
                    .iter()
                    .map(|(field, value)| (field.clone(), ErrorMessages::from_value(value)))
                    .collect(),
            ),
            Value::Null => Self::general("request failed"),
            other => Self(BTreeMap::from([(
                GENERAL_ERROR_FIELD.to_owned(),
                ErrorMessages::from_value(other),
            )])),
        }
    }

    /// Whether no error is active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages stored for `field`.
    pub fn get(&self, field: &str) -> Option<&ErrorMessages> {
        self.0.get(field)
    }

    /// Messages for `field` rendered as one line, `None` when absent.
    pub fn rendered(&self, field: &str) -> Option<String> {
        self.get(field).map(ErrorMessages::render)
    }

    /// First rendered entry among `fields`.
    pub fn first_rendered(&self, fields: &[&str]) -> Option<String> {
        fields.iter().find_map(|field| self.rendered(field))
    }

    /// Iterate over field names and their messages.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorMessages)> {
        self.0.iter().map(|(field, messages)| (field.as_str(), messages))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn object_bodies_are_kept_per_field() {
        let state = ErrorState::from_body(&json!({
            "password": ["bad"],
            "non_field_errors": ["invalid"],
        }));

        assert_eq!(state.rendered("password").as_deref(), Some("bad"));
        assert_eq!(state.rendered(GENERAL_ERROR_FIELD).as_deref(), Some("invalid"));
        assert!(state.rendered("username").is_none());
    }

    #[rstest]
    #[case::list(json!(["Not allowed."]), "Not allowed.")]
    #[case::text(json!("Server Error"), "Server Error")]
    #[case::null(Value::Null, "request failed")]
    fn non_object_bodies_become_general_errors(#[case] body: Value, #[case] expected: &str) {
        let state = ErrorState::from_body(&body);
        assert_eq!(state.rendered(GENERAL_ERROR_FIELD).as_deref(), Some(expected));
    }

    #[test]
    fn nested_values_render_as_json_text() {
        let state = ErrorState::from_body(&json!({ "user": { "email": ["taken"] } }));
        assert_eq!(
            state.rendered("user").as_deref(),
            Some(r#"{"email":["taken"]}"#)
        );
    }

    #[test]
    fn first_rendered_prefers_earlier_fields() {
        let state = ErrorState::from_body(&json!({
            "password2": ["mismatch"],
            "password": ["weak"],
        }));
        assert_eq!(
            state.first_rendered(&["password1", "password2", "password"]).as_deref(),
            Some("mismatch")
        );
    }

    #[test]
    fn default_is_empty() {
        assert!(ErrorState::default().is_empty());
        assert!(!ErrorState::general("boom").is_empty());
    }

    #[test]
    fn persisted_shape_matches_server_shape() {
        let state = ErrorState::from_body(&json!({ "detail": "Not found." }));
        let encoded = serde_json::to_value(&state).expect("encode error state");
        assert_eq!(encoded, json!({ "detail": "Not found." }));
    }
}
