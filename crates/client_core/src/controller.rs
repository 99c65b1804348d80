use std::sync::Arc;

use shared::{
    domain::ProductId,
    protocol::{NewProduct, Product, QuantityUpdate},
};
use tracing::{debug, info, warn};

use crate::{error::ClientError, InventoryApi};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load products.";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add product.";
pub const REMOVE_FAILED_MESSAGE: &str = "Failed to remove product.";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update product quantity.";
pub const INVALID_QUANTITY_MESSAGE: &str = "Quantity must be a whole number of zero or more.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed,
}

/// Text typed into the "new product" inputs, kept verbatim until a create succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub quantity: String,
}

impl ProductDraft {
    pub fn clear(&mut self) {
        self.name.clear();
        self.quantity.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListState {
    pub products: Vec<Product>,
    pub load_state: LoadState,
    pub error: Option<String>,
    pub draft: ProductDraft,
}

/// Owns the rendered product list and applies server responses to it.
///
/// Local state only changes after the server confirms an operation. Failed
/// requests leave the list untouched and set a user-facing error message.
pub struct ProductListController {
    api: Arc<dyn InventoryApi>,
    state: ProductListState,
}

impl ProductListController {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self {
            api,
            state: ProductListState::default(),
        }
    }

    pub fn state(&self) -> &ProductListState {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn load_state(&self) -> LoadState {
        self.state.load_state
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.state.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.state.draft
    }

    pub fn dismiss_error(&mut self) {
        self.state.error = None;
        if self.state.load_state == LoadState::Failed {
            self.state.load_state = LoadState::Idle;
        }
    }

    /// Replaces the whole list with the server's collection.
    ///
    /// On failure the previous list is kept.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        self.state.load_state = LoadState::Loading;
        match self.api.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "product list loaded");
                self.state.products = products;
                self.state.load_state = LoadState::Idle;
                self.state.error = None;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to load products");
                self.state.load_state = LoadState::Failed;
                self.state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Creates a product from raw input text.
    ///
    /// Returns `Ok(None)` without contacting the server when either input is
    /// empty. On success the created product is appended and the draft cleared.
    pub async fn add(
        &mut self,
        name: &str,
        quantity_text: &str,
    ) -> Result<Option<Product>, ClientError> {
        if name.is_empty() || quantity_text.is_empty() {
            debug!("ignoring add with empty input");
            return Ok(None);
        }

        let quantity = match quantity_text.trim().parse::<i64>() {
            Ok(quantity) if quantity >= 0 => quantity,
            _ => {
                self.state.error = Some(INVALID_QUANTITY_MESSAGE.to_string());
                return Err(ClientError::InvalidQuantity(quantity_text.to_string()));
            }
        };

        let request = NewProduct {
            name: name.to_string(),
            quantity,
        };
        match self.api.create_product(&request).await {
            Ok(product) => {
                info!(product_id = %product.id, name = %product.name, "product added");
                self.state.products.push(product.clone());
                self.state.draft.clear();
                Ok(Some(product))
            }
            Err(err) => {
                warn!(error = %err, name, "failed to add product");
                self.state.error = Some(ADD_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Runs [`Self::add`] with the current draft inputs.
    pub async fn submit_draft(&mut self) -> Result<Option<Product>, ClientError> {
        let ProductDraft { name, quantity } = self.state.draft.clone();
        self.add(&name, &quantity).await
    }

    pub async fn remove(&mut self, product_id: ProductId) -> Result<(), ClientError> {
        match self.api.delete_product(product_id).await {
            Ok(()) => {
                info!(%product_id, "product removed");
                self.state.products.retain(|product| product.id != product_id);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, %product_id, "failed to remove product");
                self.state.error = Some(REMOVE_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Sends `current_quantity + delta` as the new quantity.
    ///
    /// A result below zero is never sent; the call returns `Ok(None)` instead.
    /// On success the matching entry is replaced by the server's copy.
    pub async fn adjust_quantity(
        &mut self,
        product_id: ProductId,
        current_quantity: i64,
        delta: i64,
    ) -> Result<Option<Product>, ClientError> {
        let Some(candidate) = current_quantity
            .checked_add(delta)
            .filter(|quantity| *quantity >= 0)
        else {
            debug!(%product_id, current_quantity, delta, "refusing quantity below zero");
            return Ok(None);
        };

        let update = QuantityUpdate {
            quantity: candidate,
        };
        match self.api.update_quantity(product_id, update).await {
            Ok(updated) => {
                info!(
                    %product_id,
                    quantity = updated.quantity,
                    status = %updated.status,
                    "product quantity updated"
                );
                for product in &mut self.state.products {
                    if product.id == product_id {
                        *product = updated.clone();
                    }
                }
                Ok(Some(updated))
            }
            Err(err) => {
                warn!(error = %err, %product_id, "failed to update product quantity");
                self.state.error = Some(UPDATE_FAILED_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Adjusts against the quantity currently held in the list rather than a
    /// snapshot taken by the caller, so queued clicks compound instead of
    /// overwriting each other.
    pub async fn adjust_by(
        &mut self,
        product_id: ProductId,
        delta: i64,
    ) -> Result<Option<Product>, ClientError> {
        let current_quantity = self
            .state
            .products
            .iter()
            .find(|product| product.id == product_id)
            .map(|product| product.quantity)
            .ok_or(ClientError::UnknownProduct(product_id))?;
        self.adjust_quantity(product_id, current_quantity, delta).await
    }

    pub async fn increment(
        &mut self,
        product_id: ProductId,
    ) -> Result<Option<Product>, ClientError> {
        self.adjust_by(product_id, 1).await
    }

    pub async fn decrement(
        &mut self,
        product_id: ProductId,
    ) -> Result<Option<Product>, ClientError> {
        self.adjust_by(product_id, -1).await
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
