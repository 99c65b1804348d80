use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use server_api::ApiContext;
use shared::{
    domain::ProductId,
    error::{ApiError, ErrorCode},
    protocol::{DeleteProductResponse, NewProduct, Product, QuantityUpdate, PRODUCTS_PATH},
};
use storage::Storage;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::{load_settings, normalize_database_url};

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = load_settings();
    let database_url = normalize_database_url(&settings.database_url);
    let storage = Storage::new(&database_url).await.map_err(|error| {
        error!(
            %database_url,
            %error,
            "failed to open SQLite database; verify parent directory exists and permissions are correct"
        );
        error
    })?;
    let mut api = ApiContext::new(storage);
    api.low_stock_threshold = settings.low_stock_threshold;

    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, low_stock_threshold = settings.low_stock_threshold, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route(PRODUCTS_PATH, get(http_list_products).post(http_create_product))
        .route(
            "/produtos/:product_id",
            put(http_update_quantity).delete(http_delete_product),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_failure(err: ApiError) -> (StatusCode, Json<ApiError>) {
    if err.code == ErrorCode::Internal {
        error!(message = %err.message, "request failed");
    }
    (status_for(err.code), Json(err))
}

async fn healthz(State(state): State<Arc<AppState>>) -> Result<&'static str, StatusCode> {
    state.api.storage.health_check().await.map_err(|error| {
        error!(%error, "health check failed");
        StatusCode::SERVICE_UNAVAILABLE
    })?;
    Ok("ok")
}

async fn http_list_products(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Product>> {
    let products = server_api::list_products(&state.api)
        .await
        .map_err(api_failure)?;
    Ok(Json(products))
}

async fn http_create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewProduct>,
) -> ApiResult<Product> {
    let product = server_api::create_product(&state.api, req)
        .await
        .map_err(api_failure)?;
    Ok(Json(product))
}

async fn http_update_quantity(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    Json(req): Json<QuantityUpdate>,
) -> ApiResult<Product> {
    let product = server_api::update_quantity(&state.api, ProductId(product_id), req)
        .await
        .map_err(api_failure)?;
    Ok(Json(product))
}

async fn http_delete_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
) -> ApiResult<DeleteProductResponse> {
    let response = server_api::delete_product(&state.api, ProductId(product_id))
        .await
        .map_err(api_failure)?;
    Ok(Json(response))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
