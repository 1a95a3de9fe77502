//! Backend proxy
//!
//! Forwards same-origin `/api/*` calls from the browser to the external
//! authentication backend:
//! - ANY /api/{*path} -> {CRMS_BACKEND_URL}/api/{path}?{query}
//!
//! Status, body and any `Set-Cookie` headers come back untouched. Only
//! transport failures are answered locally, with the `{error, code}` JSON body.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderName, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
    routing::any,
};

use crate::core::ApiError;
use crate::core::config::Config;

/// Largest request body forwarded upstream
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Request headers passed through to the backend
const FORWARDED_HEADERS: [HeaderName; 4] = [
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::AUTHORIZATION,
    header::COOKIE,
];

/// Proxy error types
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Authentication backend is not configured")]
    NotConfigured,

    #[error("Authentication backend is unreachable")]
    Unreachable(#[source] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ProxyError::NotConfigured => (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE"),
            ProxyError::Unreachable(_) => (StatusCode::BAD_GATEWAY, "BACKEND_UNREACHABLE"),
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Proxy state: a pooled HTTP client and the backend base URL
#[derive(Clone)]
pub struct ProxyState {
    client: reqwest::Client,
    backend_url: Option<Arc<str>>,
}

impl ProxyState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.backend_timeout())
            .build()?;

        Ok(Self {
            client,
            backend_url: config.backend_url.as_deref().map(Arc::from),
        })
    }
}

/// Create the proxy router
pub fn proxy_router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/{*path}", any(forward))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Join the backend base URL with the incoming path and query
pub fn upstream_url(base: &str, path: &str, query: Option<&str>) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

async fn forward(
    State(state): State<ProxyState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let base = state.backend_url.as_deref().ok_or_else(|| {
        tracing::warn!("Rejecting {} {}: no backend configured", method, uri.path());
        ProxyError::NotConfigured
    })?;

    let url = upstream_url(base, uri.path(), uri.query());
    tracing::debug!("Forwarding {} {}", method, url);

    let mut request = state.client.request(method, &url).body(body);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }

    let upstream = request.send().await.map_err(|e| {
        tracing::error!("Backend request to {} failed: {}", url, e);
        ProxyError::Unreachable(e)
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let cookies: Vec<_> = upstream
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .cloned()
        .collect();
    let bytes = upstream.bytes().await.map_err(|e| {
        tracing::error!("Reading backend response from {} failed: {}", url, e);
        ProxyError::Unreachable(e)
    })?;

    let mut response = (status, bytes).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    for cookie in cookies {
        response.headers_mut().append(header::SET_COOKIE, cookie);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::AppendHeaders, routing::post};
    use tower::ServiceExt;

    fn proxy_app(backend_url: Option<String>) -> Router {
        let config = Config::from_vars(backend_url, Some("2".to_string()));
        proxy_router(ProxyState::from_config(&config).unwrap())
    }

    /// Fake backend that rejects every login and echoes what it received.
    /// `/api/auth/session` echoes the cookie and sets two new ones.
    async fn spawn_backend() -> String {
        let backend = Router::new()
            .route(
                "/api/auth/login",
                post(|headers: HeaderMap, uri: Uri, body: String| async move {
                    let content_type = headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(serde_json::json!({
                            "error": "Invalid credentials",
                            "code": "INVALID_CREDENTIALS",
                            "echo": body,
                            "content_type": content_type,
                            "query": uri.query(),
                        })),
                    )
                }),
            )
            .route(
                "/api/auth/session",
                axum::routing::get(|headers: HeaderMap| async move {
                    let cookie = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    (
                        AppendHeaders([
                            (header::SET_COOKIE, "session=renewed; HttpOnly; Path=/"),
                            (header::SET_COOKIE, "csrf=abc; Path=/"),
                        ]),
                        Json(serde_json::json!({ "cookie": cookie })),
                    )
                }),
            )
            .route(
                "/api/departments",
                axum::routing::get(|| async {
                    Json(serde_json::json!([{ "id": "cse", "name": "CSE" }]))
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });

        format!("http://{}/", addr)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ========================================================================
    // URL Tests
    // ========================================================================

    #[test]
    fn test_upstream_url_joins_slashes() {
        assert_eq!(
            upstream_url("http://backend:8080/", "/api/auth/login", None),
            "http://backend:8080/api/auth/login"
        );
        assert_eq!(
            upstream_url("http://backend:8080", "/api/auth/login", None),
            "http://backend:8080/api/auth/login"
        );
    }

    #[test]
    fn test_upstream_url_keeps_query() {
        assert_eq!(
            upstream_url("http://backend", "/api/departments", Some("faculty=eng")),
            "http://backend/api/departments?faculty=eng"
        );
        assert_eq!(
            upstream_url("http://backend", "/api/departments", Some("")),
            "http://backend/api/departments"
        );
    }

    // ========================================================================
    // Forwarding Tests
    // ========================================================================

    #[tokio::test]
    async fn test_unconfigured_backend_returns_503() {
        let app = proxy_app(None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BACKEND_UNAVAILABLE");
        assert_eq!(body["error"], "Authentication backend is not configured");
    }

    #[tokio::test]
    async fn test_unreachable_backend_returns_502() {
        let app = proxy_app(Some("http://127.0.0.1:1".to_string()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/departments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["code"], "BACKEND_UNREACHABLE");
    }

    #[tokio::test]
    async fn test_forwards_body_headers_and_status() {
        let app = proxy_app(Some(spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/login?next=%2F")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["echo"], r#"{"email":"a@b.com","password":"x"}"#);
        assert_eq!(body["content_type"], "application/json");
        assert_eq!(body["query"], "next=%2F");
    }

    #[tokio::test]
    async fn test_forwards_get() {
        let app = proxy_app(Some(spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/departments")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["id"], "cse");
    }

    #[tokio::test]
    async fn test_cookies_pass_both_ways() {
        let app = proxy_app(Some(spawn_backend().await));

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/auth/session")
                    .header("Cookie", "session=old")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookies: Vec<_> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(
            set_cookies,
            vec!["session=renewed; HttpOnly; Path=/", "csrf=abc; Path=/"]
        );

        let body = body_json(response).await;
        assert_eq!(body["cookie"], "session=old");
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let app = proxy_app(None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/register")
                    .body(Body::from(vec![b'a'; MAX_BODY_BYTES + 1]))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
