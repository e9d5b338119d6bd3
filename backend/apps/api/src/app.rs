//! Router Assembly
//!
//! Mounts every feature router on one store and wraps the result in the
//! shared HTTP middleware stack.

use std::sync::Arc;
use std::time::Duration;

use auth::{AuthAppState, AuthMiddlewareState, auth_router};
use axum::{
    Json, Router,
    body::Body,
    http::{HeaderValue, Method, Request, StatusCode, header},
    routing::get,
};
use kernel::error::app_error::AppError;
use link::{LinkAppState, links_router, redirect_router};
use serde::Serialize;
use store::{LinkRepository, UserRepository};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Upper bound on the time spent serving one request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn build_router<R>(store: Arc<R>, config: &ApiConfig) -> Router
where
    R: UserRepository + LinkRepository + Clone + Send + Sync + 'static,
{
    let auth_state = AuthAppState::new(store.clone(), Arc::new(config.auth.clone()));
    let auth_middleware = AuthMiddlewareState::from(&auth_state);

    let link_state = LinkAppState {
        repo: store,
        config: Arc::new(config.link.clone()),
    };

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(&config.frontend_origins))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ));

    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api", auth_router(auth_state))
        .merge(links_router(link_state.clone(), auth_middleware))
        .merge(redirect_router(link_state))
        .fallback(fallback)
        .layer(middleware)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn fallback() -> AppError {
    AppError::not_found("Route not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;
    use auth::AuthConfig;
    use axum::http::Response;
    use chrono::{TimeDelta, Utc};
    use http_body_util::BodyExt;
    use link::LinkConfig;
    use serde_json::{Value, json};
    use store::{Link, MemoryStore};
    use tower::ServiceExt;

    fn test_config() -> ApiConfig {
        ApiConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            store: StoreBackend::Memory,
            database: crate::config::DatabaseConfig {
                url: None,
                max_connections: 1,
                min_connections: 0,
                idle_timeout: Duration::from_secs(1),
                query_timeout: Duration::from_secs(1),
            },
            auth: AuthConfig::development(),
            link: LinkConfig::default(),
            frontend_origins: vec!["http://localhost:3000".to_string()],
        }
    }

    struct TestServer {
        router: Router,
        store: Arc<MemoryStore>,
    }

    impl TestServer {
        fn new() -> Self {
            let store = Arc::new(MemoryStore::new());
            let router = build_router(store.clone(), &test_config());
            Self { router, store }
        }

        async fn call(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> Response<Body> {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string())),
                None => builder.body(Body::empty()),
            };

            self.router.clone().oneshot(request.unwrap()).await.unwrap()
        }

        async fn register_and_login(&self, username: &str, email: &str) -> String {
            let registered = self
                .call(
                    Method::POST,
                    "/api/register",
                    None,
                    Some(json!({"username": username, "email": email, "password": "password1"})),
                )
                .await;
            assert_eq!(registered.status(), StatusCode::CREATED);

            let login = self
                .call(
                    Method::POST,
                    "/api/login",
                    None,
                    Some(json!({"email": email, "password": "password1"})),
                )
                .await;
            assert_eq!(login.status(), StatusCode::OK);
            assert!(login.headers().contains_key(header::SET_COOKIE));

            json_body(login).await["token"]
                .as_str()
                .unwrap()
                .to_string()
        }
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let server = TestServer::new();
        let response = server.call(Method::GET, "/healthz", None, None).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_request_id_is_set() {
        let server = TestServer::new();
        let response = server.call(Method::GET, "/healthz", None, None).await;

        let request_id = response.headers().get("x-request-id").unwrap();
        assert_eq!(request_id.to_str().unwrap().len(), 36);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let server = TestServer::new();
        let response = server.call(Method::GET, "/a/b/c", None, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["status"], 404);
    }

    #[tokio::test]
    async fn test_register_login_create_redirect() {
        let server = TestServer::new();
        let token = server.register_and_login("alice", "alice@example.com").await;

        let created = server
            .call(
                Method::POST,
                "/api/links",
                Some(&token),
                Some(json!({"slug": "docs", "original_url": "https://docs.rs"})),
            )
            .await;
        assert_eq!(created.status(), StatusCode::CREATED);

        let redirect = server.call(Method::GET, "/docs", None, None).await;
        assert_eq!(redirect.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(redirect.headers()[header::LOCATION], "https://docs.rs");

        let users = server.call(Method::GET, "/api/user", None, None).await;
        let users = json_body(users).await;
        assert_eq!(users[0]["email"], "alice@example.com");
        assert_eq!(users[0]["link_count"], 1);
        assert!(users[0].get("password").is_none());
    }

    #[tokio::test]
    async fn test_expired_link_refresh_cycle() {
        let server = TestServer::new();
        let token = server.register_and_login("alice", "alice@example.com").await;

        let stale = Link::new_at("old", "https://example.com", Utc::now() - TimeDelta::days(31));
        server
            .store
            .create_link("alice@example.com", &stale)
            .await
            .unwrap();

        let gone = server.call(Method::GET, "/old", None, None).await;
        assert_eq!(gone.status(), StatusCode::GONE);

        let refreshed = server
            .call(Method::GET, "/api/links/refresh/old", Some(&token), None)
            .await;
        assert_eq!(refreshed.status(), StatusCode::OK);

        let live = server.call(Method::GET, "/old", None, None).await;
        assert_eq!(live.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn test_links_are_owner_scoped() {
        let server = TestServer::new();
        let alice = server.register_and_login("alice", "alice@example.com").await;
        let bob = server.register_and_login("bob", "bob@example.com").await;

        server
            .call(
                Method::POST,
                "/api/links",
                Some(&alice),
                Some(json!({"slug": "mine", "original_url": "https://example.com"})),
            )
            .await;

        let deleted = server
            .call(Method::DELETE, "/api/links/mine", Some(&bob), None)
            .await;
        assert_eq!(deleted.status(), StatusCode::NOT_FOUND);

        let bob_links = server.call(Method::GET, "/api/links", Some(&bob), None).await;
        assert_eq!(json_body(bob_links).await, json!([]));

        let still_there = server.call(Method::GET, "/mine", None, None).await;
        assert_eq!(still_there.status(), StatusCode::MOVED_PERMANENTLY);
    }

    #[tokio::test]
    async fn test_protected_routes_reject_garbage_token() {
        let server = TestServer::new();
        let response = server
            .call(Method::GET, "/api/links", Some("not-a-token"), None)
            .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["detail"], "Unauthorized");
    }
}
