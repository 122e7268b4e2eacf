// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_session, AuthErrorBody},
    gallery::{PhotographerEntry, ASSETS_URL_PREFIX},
    state::AppState,
};

pub mod health;
pub mod pages;
pub mod verify;

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.assets_dir);

    let app_routes = Router::new()
        .route("/", get(pages::landing))
        .route("/verify", post(verify::verify_passphrase))
        .route("/api/verify-passphrase", post(verify::verify_passphrase))
        .route("/photographers", get(pages::photographers))
        .route("/photographer/{slug}", get(pages::photographer_gallery))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest_service(ASSETS_URL_PREFIX, assets)
        .with_state(state);

    Router::new()
        .merge(app_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(pages::not_found)
        .layer(middleware::from_fn(require_session))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        verify::verify_passphrase,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            verify::VerifyRequest,
            verify::VerifyResponse,
            AuthErrorBody,
            PhotographerEntry,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Access", description = "Shared passphrase verification"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::passphrase::tests::test_hash;
    use crate::auth::{PassphraseVerifier, SessionPolicy};
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
            Request, Response, StatusCode,
        },
    };
    use cookie::{Cookie, SameSite};
    use std::time::Duration;
    use tower::ServiceExt;

    const PASSPHRASE: &str = "say grace and cheese";

    fn configured_state() -> AppState {
        let verifier = PassphraseVerifier::new(Some(test_hash(PASSPHRASE))).unwrap();
        AppState::default().with_verifier(verifier)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    fn verify_request(path: &str, body: &str) -> Request<Body> {
        Request::post(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response<Body>) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn text_body(response: Response<Body>) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn session_cookie(response: &Response<Body>) -> Cookie<'static> {
        let header = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        Cookie::parse(header).unwrap()
    }

    #[tokio::test]
    async fn correct_passphrase_grants_a_session() {
        let app = router(configured_state());
        let body = format!(r#"{{"passphrase":"{PASSPHRASE}"}}"#);

        let response = send(&app, verify_request("/verify", &body)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = session_cookie(&response);
        assert_eq!(cookie.name(), "authenticated");
        assert_eq!(cookie.value(), "true");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.max_age().unwrap().whole_seconds(), 7 * 24 * 60 * 60);

        assert_eq!(json_body(response).await["success"], true);
    }

    #[tokio::test]
    async fn alias_route_behaves_the_same() {
        let app = router(configured_state());
        let body = format!(r#"{{"passphrase":"{PASSPHRASE}"}}"#);
        let response = send(&app, verify_request("/api/verify-passphrase", &body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(SET_COOKIE));
    }

    #[tokio::test]
    async fn wrong_passphrase_is_rejected_without_cookie() {
        let app = router(configured_state());
        let response = send(&app, verify_request("/verify", r#"{"passphrase":"wrong"}"#)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(!response.headers().contains_key(SET_COOKIE));

        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid passphrase");
        assert_eq!(body["error_code"], "invalid_passphrase");
    }

    #[tokio::test]
    async fn empty_or_missing_passphrase_is_400_even_when_unconfigured() {
        for state in [configured_state(), AppState::default()] {
            let app = router(state);
            for body in [r#"{"passphrase":""}"#, "{}", "not json", r#"{"passphrase":42}"#] {
                let response = send(&app, verify_request("/verify", body)).await;
                assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
                assert!(!response.headers().contains_key(SET_COOKIE));
                assert_eq!(json_body(response).await["error"], "Passphrase required");
            }
        }
    }

    #[tokio::test]
    async fn unconfigured_hash_is_a_server_error() {
        let app = router(AppState::default());
        let response = send(&app, verify_request("/verify", r#"{"passphrase":"anything"}"#)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.headers().contains_key(SET_COOKIE));
        assert_eq!(json_body(response).await["error"], "Server configuration error");
    }

    #[tokio::test]
    async fn gallery_redirects_without_session() {
        let app = router(configured_state());
        for path in ["/photographers", "/photographer/cindy", "/photographer/nobody"] {
            let response = send(&app, get_request(path, None)).await;
            assert_eq!(response.status(), StatusCode::FOUND, "path: {path}");
            assert_eq!(response.headers()[LOCATION], "/");
        }

        let response = send(&app, get_request("/photographer/cindy", Some("authenticated=false"))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
    }

    #[tokio::test]
    async fn gallery_is_served_with_session() {
        let app = router(configured_state());

        let response = send(&app, get_request("/photographers", Some("authenticated=true"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = text_body(response).await;
        assert!(page.contains(r#"href="/photographer/may-hwee""#));

        let response = send(&app, get_request("/photographer/cindy", Some("authenticated=true"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = text_body(response).await;
        assert!(page.contains("Cindy&#39;s Gallery"));
        assert!(page.contains("/assets/cindy/"));
    }

    #[tokio::test]
    async fn unknown_photographer_is_404_after_the_guard() {
        let app = router(configured_state());
        let response = send(&app, get_request("/photographer/nobody", Some("authenticated=true"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(text_body(response).await.contains("Photographer not found"));
    }

    #[tokio::test]
    async fn photographer_without_photos_renders_placeholder() {
        let app = router(configured_state());
        let response = send(&app, get_request("/photographer/yy", Some("authenticated=true"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(text_body(response).await.contains("No photos available"));
    }

    #[tokio::test]
    async fn landing_page_is_public() {
        let app = router(configured_state());
        let response = send(&app, get_request("/", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = text_body(response).await;
        assert!(page.contains("Say Grace and Cheese"));
        assert!(page.contains("/verify"));
    }

    #[tokio::test]
    async fn session_cookie_expires_after_its_max_age() {
        let ttl = Duration::from_secs(60 * 60);
        let mut state = configured_state();
        state.session = SessionPolicy::new(ttl, false);
        let app = router(state);

        let body = format!(r#"{{"passphrase":"{PASSPHRASE}"}}"#);
        let response = send(&app, verify_request("/verify", &body)).await;
        let cookie = session_cookie(&response);
        let lifetime = cookie.max_age().unwrap().whole_seconds();
        assert_eq!(lifetime, 3600);

        // A browser keeps sending the cookie until issued_at + Max-Age.
        let cookie_header = format!("{}={}", cookie.name(), cookie.value());
        let browser_cookie = |elapsed: i64| (elapsed < lifetime).then_some(cookie_header.as_str());

        let response = send(&app, get_request("/photographers", browser_cookie(lifetime - 1))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_request("/photographers", browser_cookie(lifetime + 1))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/");
    }

    #[tokio::test]
    async fn assets_are_served_from_the_configured_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cindy")).unwrap();
        std::fs::write(dir.path().join("cindy").join("photo1.jpg"), b"jpeg bytes").unwrap();

        let app = router(configured_state().with_assets_dir(dir.path().to_path_buf()));
        let response = send(&app, get_request("/assets/cindy/photo1.jpg", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text_body(response).await, "jpeg bytes");
    }

    #[tokio::test]
    async fn health_reports_missing_configuration() {
        let app = router(AppState::default());
        let response = send(&app, get_request("/health", None)).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["passphrase"], "missing");
    }

    #[tokio::test]
    async fn health_is_ok_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let app = router(configured_state().with_assets_dir(dir.path().to_path_buf()));

        let response = send(&app, get_request("/health/ready", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["checks"]["assets_dir"], "ok");

        let response = send(&app, get_request("/health/live", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let app = router(configured_state());
        let response = send(&app, get_request("/health/live", None)).await;
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn unknown_routes_render_not_found_page() {
        let app = router(configured_state());
        let response = send(&app, get_request("/nope", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(text_body(response).await.contains("Page not found"));
    }

    #[test]
    fn openapi_documents_the_verify_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/verify"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
