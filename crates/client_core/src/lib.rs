//! Client side of TechStock: the REST transport and the controller that keeps
//! a local product list in step with the server.

use async_trait::async_trait;
use shared::{
    domain::ProductId,
    protocol::{NewProduct, Product, QuantityUpdate},
};

mod controller;
pub mod error;
pub mod transport;

pub use controller::{
    LoadState, ProductDraft, ProductListController, ProductListState, ADD_FAILED_MESSAGE,
    INVALID_QUANTITY_MESSAGE, LOAD_FAILED_MESSAGE, REMOVE_FAILED_MESSAGE, UPDATE_FAILED_MESSAGE,
};
pub use error::ClientError;
pub use transport::{HttpInventoryApi, DEFAULT_SERVER_URL};

/// The four product operations exposed by the backend.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError>;
    async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError>;
    async fn delete_product(&self, product_id: ProductId) -> Result<(), ClientError>;
    async fn update_quantity(
        &self,
        product_id: ProductId,
        update: QuantityUpdate,
    ) -> Result<Product, ClientError>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
