use super::*;
use axum::{body, body::Body, http::Request};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

async fn test_app() -> (Router, Storage) {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let api = ApiContext::new(storage.clone());
    let app = build_router(Arc::new(AppState { api }));
    (app, storage)
}

async fn read_json<T: DeserializeOwned>(response: axum::response::Response) -> T {
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json body")
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn healthz_reports_ok_when_storage_is_ready() {
    let (app, _storage) = test_app().await;
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn create_then_list_returns_wire_shape() {
    let (app, _storage) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/produtos",
            serde_json::json!({"nome": "Cabo HDMI", "quantidade": 3}),
        ))
        .await
        .expect("create response");
    assert_eq!(response.status(), StatusCode::OK);
    let created: serde_json::Value = read_json(response).await;
    assert_eq!(created["nome"], "Cabo HDMI");
    assert_eq!(created["quantidade"], 3);
    assert_eq!(created["status"], "Baixo Estoque");
    assert!(created["id"].as_i64().expect("id") > 0);

    let response = app
        .oneshot(Request::get("/produtos").body(Body::empty()).expect("request"))
        .await
        .expect("list response");
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Vec<serde_json::Value> = read_json(response).await;
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn put_updates_quantity_and_status() {
    let (app, storage) = test_app().await;
    let created = storage
        .create_product("Mouse", 2, "Baixo Estoque")
        .await
        .expect("seed");

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/produtos/{}", created.product_id.0),
            serde_json::json!({"quantidade": 8}),
        ))
        .await
        .expect("update response");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = read_json(response).await;
    assert_eq!(updated.id, created.product_id);
    assert_eq!(updated.quantity, 8);
    assert_eq!(updated.status, "Em Estoque");
}

#[tokio::test]
async fn put_negative_quantity_is_unprocessable() {
    let (app, storage) = test_app().await;
    let created = storage
        .create_product("Mouse", 2, "Baixo Estoque")
        .await
        .expect("seed");

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/produtos/{}", created.product_id.0),
            serde_json::json!({"quantidade": -1}),
        ))
        .await
        .expect("update response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let err: ApiError = read_json(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn delete_removes_product_and_reports_message() {
    let (app, storage) = test_app().await;
    let created = storage
        .create_product("Webcam", 6, "Em Estoque")
        .await
        .expect("seed");

    let uri = format!("/produtos/{}", created.product_id.0);
    let response = app
        .clone()
        .oneshot(
            Request::delete(uri.as_str())
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("delete response");
    assert_eq!(response.status(), StatusCode::OK);
    let body: DeleteProductResponse = read_json(response).await;
    assert_eq!(body.message, "Produto removido!");
    assert!(storage.list_products().await.expect("list").is_empty());

    let response = app
        .oneshot(
            Request::delete(uri.as_str())
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("second delete response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let err: ApiError = read_json(response).await;
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let (app, _storage) = test_app().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/produtos")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .expect("allow origin header"),
        "*"
    );
}
