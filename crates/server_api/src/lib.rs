use shared::{
    domain::{ProductId, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD},
    error::{ApiError, ErrorCode},
    protocol::{DeleteProductResponse, NewProduct, Product, QuantityUpdate},
};
use storage::Storage;
use tracing::info;

pub const PRODUCT_REMOVED_MESSAGE: &str = "Produto removido!";

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
    pub low_stock_threshold: i64,
}

impl ApiContext {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    pub fn stock_status(&self, quantity: i64) -> StockStatus {
        StockStatus::for_quantity(quantity, self.low_stock_threshold)
    }
}

pub async fn list_products(ctx: &ApiContext) -> Result<Vec<Product>, ApiError> {
    let products = ctx.storage.list_products().await.map_err(internal)?;
    Ok(products.into_iter().map(Product::from).collect())
}

pub async fn create_product(ctx: &ApiContext, req: NewProduct) -> Result<Product, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "product name cannot be empty",
        ));
    }
    ensure_non_negative(req.quantity)?;

    let status = ctx.stock_status(req.quantity);
    let created = ctx
        .storage
        .create_product(&req.name, req.quantity, status.label())
        .await
        .map_err(internal)?;
    info!(
        product_id = %created.product_id,
        quantity = created.quantity,
        %status,
        "product created"
    );
    Ok(created.into())
}

/// Sets the quantity and recomputes the status from it.
pub async fn update_quantity(
    ctx: &ApiContext,
    product_id: ProductId,
    req: QuantityUpdate,
) -> Result<Product, ApiError> {
    ensure_non_negative(req.quantity)?;

    let status = ctx.stock_status(req.quantity);
    let updated = ctx
        .storage
        .update_product_quantity(product_id, req.quantity, status.label())
        .await
        .map_err(internal)?
        .ok_or_else(product_not_found)?;
    info!(%product_id, quantity = updated.quantity, %status, "product quantity updated");
    Ok(updated.into())
}

pub async fn delete_product(
    ctx: &ApiContext,
    product_id: ProductId,
) -> Result<DeleteProductResponse, ApiError> {
    let deleted = ctx
        .storage
        .delete_product(product_id)
        .await
        .map_err(internal)?;
    if !deleted {
        return Err(product_not_found());
    }
    info!(%product_id, "product removed");
    Ok(DeleteProductResponse {
        message: PRODUCT_REMOVED_MESSAGE.to_string(),
    })
}

fn ensure_non_negative(quantity: i64) -> Result<(), ApiError> {
    if quantity < 0 {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "quantity cannot be negative",
        ));
    }
    Ok(())
}

fn product_not_found() -> ApiError {
    ApiError::new(ErrorCode::NotFound, "product not found")
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}
