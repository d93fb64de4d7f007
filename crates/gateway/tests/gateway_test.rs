use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use recetario_core::mocks::MockProvider;
use recetario_gateway::server::PROVIDER_HEADER;
use recetario_gateway::{GatewayConfig, GatewayServer, TranslateService};
use recetario_translate::ProviderEntry;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const TIMEOUT: Duration = Duration::from_millis(200);

fn server_with(providers: Vec<Arc<MockProvider>>) -> GatewayServer {
    let entries = providers
        .into_iter()
        .map(|client| {
            ProviderEntry::new(
                client as Arc<dyn recetario_core::TranslationProvider>,
                Duration::from_secs(60),
            )
        })
        .collect();
    let translator = Arc::new(TranslateService::new(entries, 100, TIMEOUT));
    GatewayServer::new(GatewayConfig::default(), translator)
}

fn translate_request(body: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = server_with(vec![Arc::new(MockProvider::translating("primary", "es"))]);
    let app = server.build_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_wrong_method_is_405_with_allow_header() {
    let server = server_with(vec![Arc::new(MockProvider::translating("primary", "es"))]);
    let app = server.build_router();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/translate")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let allow = response
        .headers()
        .get("allow")
        .expect("allow header")
        .to_str()
        .unwrap();
    assert!(allow.contains("POST"));
}

#[tokio::test]
async fn test_empty_inputs_return_empty_translations() {
    let provider = Arc::new(MockProvider::translating("primary", "es"));
    let server = server_with(vec![provider.clone()]);
    let app = server.build_router();

    for body in ["{}", r#"{"texts":[]}"#] {
        let response = app
            .clone()
            .oneshot(translate_request(body, "/api/translate"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(PROVIDER_HEADER).unwrap(),
            "empty"
        );
        let json = body_json(response).await;
        assert_eq!(json["translations"], json!([]));
    }
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_fail_soft() {
    let server = server_with(vec![Arc::new(MockProvider::translating("primary", "es"))]);
    let app = server.build_router();

    let response = app
        .oneshot(translate_request("this is not json", "/api/translate"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["translations"], json!([]));
}

#[tokio::test]
async fn test_translate_then_repeat_hits_cache() {
    let provider = Arc::new(MockProvider::scripted(
        "primary",
        vec![vec!["Hola".into(), "Mundo".into()]],
    ));
    let server = server_with(vec![provider.clone()]);
    let app = server.build_router();

    let body = json!({"texts": ["Hello", "World"], "target": "es"}).to_string();

    let first = app
        .clone()
        .oneshot(translate_request(&body, "/api/translate"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers().get(PROVIDER_HEADER).unwrap(), "primary");
    let json_body = body_json(first).await;
    assert_eq!(json_body["translations"], json!(["Hola", "Mundo"]));

    let second = app
        .oneshot(translate_request(&body, "/api/translate"))
        .await
        .unwrap();
    assert_eq!(second.headers().get(PROVIDER_HEADER).unwrap(), "cache");
    let json_body = body_json(second).await;
    assert_eq!(json_body["translations"], json!(["Hola", "Mundo"]));

    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_single_text_form() {
    let server = server_with(vec![Arc::new(MockProvider::translating("primary", "es"))]);
    let app = server.build_router();

    let response = app
        .oneshot(translate_request(
            &json!({"text": "Hello", "target": "es"}).to_string(),
            "/api/translate",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json_body = body_json(response).await;
    assert_eq!(json_body["translations"], json!(["es:Hello"]));
}

#[tokio::test]
async fn test_all_providers_failing_yields_identity() {
    let server = server_with(vec![
        Arc::new(MockProvider::failing("primary")),
        Arc::new(MockProvider::failing("backup")),
    ]);
    let app = server.build_router();

    let response = app
        .oneshot(translate_request(
            &json!({"texts": ["Hello", "World"], "target": "es"}).to_string(),
            "/api/translate",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(PROVIDER_HEADER).unwrap(), "identity");
    let json_body = body_json(response).await;
    assert_eq!(json_body["translations"], json!(["Hello", "World"]));
}

#[tokio::test]
async fn test_quota_failure_falls_through_to_next_provider() {
    let exhausted = Arc::new(MockProvider::new(
        "primary",
        recetario_core::mocks::MockBehavior::QuotaExhausted,
    ));
    let backup = Arc::new(MockProvider::translating("backup", "b"));
    let server = server_with(vec![exhausted, backup]);
    let app = server.build_router();

    let response = app
        .oneshot(translate_request(
            &json!({"texts": ["Hello"], "target": "es"}).to_string(),
            "/api/translate",
        ))
        .await
        .unwrap();

    assert_eq!(response.headers().get(PROVIDER_HEADER).unwrap(), "backup");
}

#[tokio::test]
async fn test_bypass_cache_query_forces_provider_call() {
    let provider = Arc::new(MockProvider::scripted(
        "primary",
        vec![vec!["Hola".into()], vec!["Hola!".into()]],
    ));
    let server = server_with(vec![provider.clone()]);
    let app = server.build_router();

    let body = json!({"texts": ["Hello"], "target": "es"}).to_string();

    app.clone()
        .oneshot(translate_request(&body, "/api/translate"))
        .await
        .unwrap();

    let bypassed = app
        .oneshot(translate_request(&body, "/api/translate?bypassCache=1"))
        .await
        .unwrap();

    assert_eq!(bypassed.headers().get(PROVIDER_HEADER).unwrap(), "primary");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_bypass_cache_header_forces_provider_call() {
    let provider = Arc::new(MockProvider::scripted(
        "primary",
        vec![vec!["Hola".into()], vec!["Hola!".into()]],
    ));
    let server = server_with(vec![provider.clone()]);
    let app = server.build_router();

    let body = json!({"texts": ["Hello"], "target": "es"}).to_string();

    app.clone()
        .oneshot(translate_request(&body, "/api/translate"))
        .await
        .unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/api/translate")
        .header("Content-Type", "application/json")
        .header("X-Bypass-Cache", "1")
        .body(Body::from(body))
        .unwrap();
    let bypassed = app.oneshot(request).await.unwrap();

    assert_eq!(bypassed.headers().get(PROVIDER_HEADER).unwrap(), "primary");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_provider_query_overrides_chain_order() {
    let primary = Arc::new(MockProvider::translating("primary", "p"));
    let backup = Arc::new(MockProvider::translating("backup", "b"));
    let server = server_with(vec![primary.clone(), backup]);
    let app = server.build_router();

    let response = app
        .oneshot(translate_request(
            &json!({"texts": ["Hello"], "target": "es"}).to_string(),
            "/api/translate?provider=backup",
        ))
        .await
        .unwrap();

    assert_eq!(response.headers().get(PROVIDER_HEADER).unwrap(), "backup");
    let json_body = body_json(response).await;
    assert_eq!(json_body["translations"], json!(["b:Hello"]));
    assert_eq!(primary.call_count(), 0);
}

#[tokio::test]
async fn test_recipes_without_credentials_is_500() {
    let server = server_with(vec![Arc::new(MockProvider::translating("primary", "es"))]);
    let app = server.build_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/recipes?q=tortilla")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json_body = body_json(response).await;
    assert!(json_body["error"].is_string());
}
