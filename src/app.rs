use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::{
    handlers::pages::not_found,
    routes::{api_routes, common_routes, page_routes},
    state::AppState,
};

/// JSON and form bodies above this are rejected before reaching a handler.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(page_routes(state.clone()))
        .nest("/api", api_routes(state.clone()))
        .merge(Router::new().fallback(not_found).with_state(state))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::contact::ContactNotifier;
    use crate::error::AppError;
    use crate::store::Db;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ContactNotifier for RecordingNotifier {
        async fn notify(&self, text: &str) -> Result<(), AppError> {
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn app() -> Router {
        create_app(AppState::new(Db::unconfigured(), Config::default(), None))
    }

    fn app_with_token(token: &str) -> Router {
        let config = Config {
            admin_token: Some(token.to_string()),
            ..Config::default()
        };
        create_app(AppState::new(Db::unconfigured(), config, None))
    }

    async fn send(app: Router, req: Request<Body>) -> Response {
        app.oneshot(req).await.unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_list_without_database_is_empty() {
        let response = send(app(), get("/api/services")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"], json!([]));
        assert_eq!(json["meta"]["count"], 0);
    }

    #[tokio::test]
    async fn test_unknown_resource_is_not_found() {
        let response = send(app(), get("/api/machines")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_read_missing_row_is_not_found() {
        let response = send(app(), get("/api/projects/7")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_id_is_bad_request() {
        let response = send(app(), get("/api/projects/abc")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_validates_before_touching_database() {
        let response = send(app(), json_request("POST", "/api/services", json!({ "description": "x" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(app(), json_request("POST", "/api/services", json!({ "title": "Kazı İşleri" }))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_slugs_without_url_safe_characters_are_rejected() {
        let response = send(app(), json_request("PUT", "/api/services/1", json!({ "slug": "!!!" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            app(),
            json_request("POST", "/api/services", json!({ "title": "???", "slug": "§§ / ??" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_values_outside_column_range_are_bad_requests() {
        let body = json!({ "title": "Kazı", "display_order": 3_000_000_000i64 });
        let response = send(app(), json_request("POST", "/api/services", body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        for uri in ["/api/projects?region_id=99999999999", "/api/projects?completed_at=abc"] {
            let response = send(app(), get(uri)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_query_token_is_url_decoded() {
        let response = send(app_with_token("a+b/c="), get("/admin?token=a%2Bb%2Fc%3D")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/faqs")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(app(), req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_page_content_routes_win_over_generic() {
        let response = send(app(), get("/api/page-content?page=home")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            app(),
            json_request("POST", "/api/page-content", json!({ "page": "home", "section": "", "key": "t" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_writes_require_admin_token_when_configured() {
        let body = json!({ "question": "Hafriyat ruhsatı gerekir mi?", "answer": "Evet." });

        let response = send(app_with_token("k"), json_request("POST", "/api/faqs", body.clone())).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut req = json_request("POST", "/api/faqs", body);
        req.headers_mut()
            .insert(header::AUTHORIZATION, "Bearer k".parse().unwrap());
        let response = send(app_with_token("k"), req).await;
        // authorized, but there is no database to write to
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = send(app_with_token("k"), get("/api/faqs")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_contact_forwards_to_notifier() {
        let notifier = Arc::new(RecordingNotifier::default());
        let shared: Arc<dyn ContactNotifier> = notifier.clone();
        let state = AppState::new(Db::unconfigured(), Config::default(), Some(shared));
        let body = json!({
            "name": "Ayşe",
            "email": "ayse@ornek.com",
            "service": "Kazı",
            "message": "Bodrum kazısı için fiyat alabilir miyim?"
        });
        let response = send(create_app(state), json_request("POST", "/api/contact", body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "success": true }));

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("Ayşe"));
        assert!(sent[0].contains("<b>Hizmet:</b> Kazı"));
    }

    #[tokio::test]
    async fn test_contact_rejects_invalid_and_unconfigured() {
        let notifier = Arc::new(RecordingNotifier::default());
        let shared: Arc<dyn ContactNotifier> = notifier.clone();
        let state = AppState::new(Db::unconfigured(), Config::default(), Some(shared));
        let bad = json!({ "name": "Ayşe", "email": "ayse", "message": "Merhaba" });
        let response = send(create_app(state), json_request("POST", "/api/contact", bad)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(notifier.sent.lock().unwrap().is_empty());

        let good = json!({ "name": "Ayşe", "email": "ayse@ornek.com", "message": "Merhaba" });
        let response = send(app(), json_request("POST", "/api/contact", good)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_contact_is_open_when_admin_token_is_set() {
        let good = json!({ "name": "Ayşe", "email": "ayse@ornek.com", "message": "Merhaba" });
        let response = send(app_with_token("k"), json_request("POST", "/api/contact", good)).await;
        // no bot configured, but the admin guard did not intercept
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_pages_render_without_database() {
        for uri in ["/", "/hizmetler", "/projeler", "/bolgeler", "/blog", "/hakkimizda", "/iletisim"] {
            let response = send(app(), get(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let html = body_text(response).await;
            assert!(html.contains("application/ld+json"), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_slug_and_path_render_not_found() {
        for uri in ["/hizmetler/yok", "/blog/yok", "/bolgeler/yok", "/projeler/yok", "/boyle-bir-sayfa-yok"] {
            let response = send(app(), get(uri)).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_dashboard_requires_token() {
        let response = send(app_with_token("k"), get("/admin")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = send(app_with_token("k"), get("/admin?token=k")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("/api/hero-carousel"));
        assert!(html.contains("/api/page-content"));
    }

    #[tokio::test]
    async fn test_sitemap_and_robots() {
        let response = send(app(), get("/sitemap.xml")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/xml"));
        let xml = body_text(response).await;
        assert!(xml.contains("/hizmetler</loc>"));

        let response = send(app(), get("/robots.txt")).await;
        assert!(body_text(response).await.contains("Sitemap:"));
    }

    #[tokio::test]
    async fn test_ready_reports_missing_database() {
        let response = send(app(), get("/ready")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_json(response).await["database"], "unconfigured");
    }
}
