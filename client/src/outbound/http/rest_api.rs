//! Reqwest-backed adapter for the project server REST API.
//!
//! This adapter owns transport details only: endpoint layout, request
//! encoding (JSON or multipart), the authorization header, timeout and HTTP
//! error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::ports::{ApiError, KanbanApi};
use crate::domain::{
    AuthPayload, LoginCredentials, ProjectDetail, ProjectPage, RegistrationForm, Session,
};

/// Scheme used in the `Authorization` header for token-bearing requests.
pub const AUTH_HEADER_PREFIX: &str = "JWT";

const LOGIN_PATH: &str = "rest-auth/login/";
const REGISTRATION_PATH: &str = "rest-auth/registration/";
const LOGOUT_PATH: &str = "rest-auth/logout/";
const PROJECTS_PATH: &str = "projects/";

/// REST adapter talking to one project server.
#[derive(Debug, Clone)]
pub struct RestKanbanApi {
    client: Client,
    base_url: Url,
}

impl RestKanbanApi {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// Endpoint paths are resolved relative to `base_url`, which is treated
    /// as a directory even without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Base URL endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|error| ApiError::invalid_request(format!("invalid endpoint {path}: {error}")))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn send_for<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        decode(&body)
    }
}

#[async_trait]
impl KanbanApi for RestKanbanApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthPayload, ApiError> {
        let url = self.endpoint(LOGIN_PATH)?;
        debug!(%url, "POST login");
        let request = self.client.post(url).json(&json!({
            "username": credentials.username(),
            "password": credentials.password(),
        }));
        self.send_for(request).await
    }

    async fn register(&self, form: &RegistrationForm) -> Result<AuthPayload, ApiError> {
        let url = self.endpoint(REGISTRATION_PATH)?;
        debug!(%url, "POST registration");
        let request = self.client.post(url).multipart(registration_form(form)?);
        self.send_for(request).await
    }

    async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        let url = self.endpoint(LOGOUT_PATH)?;
        debug!(%url, "POST logout");
        let request = authorize(self.client.post(url), session).json(&json!({}));
        self.send(request).await.map(drop)
    }

    async fn list_projects(
        &self,
        session: &Session,
        created_by: i64,
    ) -> Result<ProjectPage, ApiError> {
        let url = self.endpoint(PROJECTS_PATH)?;
        debug!(%url, created_by, "GET projects");
        let request = authorize(self.client.get(url), session).query(&[("created_by", created_by)]);
        self.send_for(request).await
    }

    async fn project_detail(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<ProjectDetail, ApiError> {
        let url = self.endpoint(&format!("{PROJECTS_PATH}{id}"))?;
        debug!(%url, "GET project detail");
        let request = authorize(self.client.get(url), session);
        self.send_for(request).await
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn authorize(request: RequestBuilder, session: &Session) -> RequestBuilder {
    match session.token().filter(|token| !token.is_empty()) {
        Some(token) => request.header(
            reqwest::header::AUTHORIZATION,
            format!("{AUTH_HEADER_PREFIX} {token}"),
        ),
        None => request,
    }
}

fn registration_form(form: &RegistrationForm) -> Result<Form, ApiError> {
    let mut multipart = Form::new();
    if let Some(avatar) = form.avatar() {
        let part = Part::bytes(avatar.bytes().to_vec())
            .file_name(avatar.file_name().to_owned())
            .mime_str(avatar.content_type())
            .map_err(|error| {
                ApiError::invalid_request(format!("invalid avatar content type: {error}"))
            })?;
        multipart = multipart.part("avatar", part);
    }

    Ok(multipart
        .text("username", form.username().to_owned())
        .text("email", form.email().to_owned())
        .text("password1", form.password().to_owned())
        .text("password2", form.password().to_owned()))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_builder() {
        ApiError::invalid_request(error.to_string())
    } else if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    ApiError::rejected(status.as_u16(), rejection_body(status, body))
}

/// Keep JSON error bodies as sent; summarise anything else as text.
fn rejection_body(status: StatusCode, body: &[u8]) -> Value {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        return value;
    }

    let preview = body_preview(body);
    if preview.is_empty() {
        Value::String(format!("status {}", status.as_u16()))
    } else {
        Value::String(format!("status {}: {}", status.as_u16(), preview))
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    fn api(base: &str) -> RestKanbanApi {
        let url = Url::parse(base).expect("base url");
        RestKanbanApi::new(url, Duration::from_secs(5)).expect("client builds")
    }

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000/rest-auth/login/")]
    #[case("http://localhost:8000/", "http://localhost:8000/rest-auth/login/")]
    #[case("https://example.com/api", "https://example.com/api/rest-auth/login/")]
    fn endpoints_resolve_under_the_base_path(#[case] base: &str, #[case] expected: &str) {
        let url = api(base).endpoint(LOGIN_PATH).expect("endpoint");
        assert_eq!(url.as_str(), expected);
    }

    #[test]
    fn detail_endpoint_has_no_trailing_slash() {
        let url = api("http://localhost:8000")
            .endpoint(&format!("{PROJECTS_PATH}{}", 42))
            .expect("endpoint");
        assert_eq!(url.as_str(), "http://localhost:8000/projects/42");
    }

    #[test]
    fn json_rejections_keep_the_body() {
        let error = map_status_error(
            StatusCode::BAD_REQUEST,
            br#"{"password":["This field may not be blank."]}"#,
        );
        assert_eq!(
            error,
            ApiError::rejected(
                400_u16,
                json!({ "password": ["This field may not be blank."] })
            )
        );
    }

    #[rstest]
    #[case::html(b"<html>\n  <h1>Bad Gateway</h1>\n</html>".as_slice(), "status 502: <html> <h1>Bad Gateway</h1> </html>")]
    #[case::empty(b"".as_slice(), "status 502")]
    fn non_json_rejections_are_summarised(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::BAD_GATEWAY, body);
        assert_eq!(error, ApiError::rejected(502_u16, json!(expected)));
    }

    #[test]
    fn long_previews_are_truncated() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn undecodable_success_body_is_a_decode_error() {
        let error = decode::<AuthPayload>(b"{\"user\":null}").expect_err("token is required");
        assert!(matches!(error, ApiError::Decode { .. }));
    }

    #[test]
    fn builder_failures_are_invalid_requests() {
        let error = Client::new()
            .get("http://localhost/")
            .header(reqwest::header::AUTHORIZATION, "JWT bad\ntoken")
            .build()
            .expect_err("control characters are not valid header values");

        let mapped = map_transport_error(error);

        assert!(matches!(mapped, ApiError::InvalidRequest { .. }), "{mapped:?}");
        assert!(!mapped.is_transport());
    }

    #[tokio::test]
    async fn malformed_tokens_fail_before_any_request() {
        let session = Session::from_payload(AuthPayload {
            token: "bad\ntoken".to_owned(),
            user: None,
        });

        let error = api("http://127.0.0.1:9/")
            .project_detail(&session, 1)
            .await
            .expect_err("request cannot be built");

        assert!(matches!(error, ApiError::InvalidRequest { .. }), "{error:?}");
    }

    #[test]
    fn blank_tokens_are_not_sent() {
        let client = Client::new();
        let session = Session::from_payload(AuthPayload {
            token: String::new(),
            user: None,
        });
        let request = authorize(client.get("http://localhost/"), &session)
            .build()
            .expect("request builds");
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn tokens_use_the_jwt_scheme() {
        let client = Client::new();
        let session = Session::from_payload(AuthPayload {
            token: "abc".to_owned(),
            user: None,
        });
        let request = authorize(client.get("http://localhost/"), &session)
            .build()
            .expect("request builds");
        assert_eq!(
            request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok()),
            Some("JWT abc")
        );
    }
}
