//! Backend commands queued from UI to backend worker.

use shared::domain::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Reload,
    AddProduct { name: String, quantity: String },
    RemoveProduct { product_id: ProductId },
    /// Resolved against the worker's current list, not the quantity shown when clicked.
    AdjustQuantity { product_id: ProductId, delta: i64 },
    DismissError,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reload => "reload",
            Self::AddProduct { .. } => "add_product",
            Self::RemoveProduct { .. } => "remove_product",
            Self::AdjustQuantity { .. } => "adjust_quantity",
            Self::DismissError => "dismiss_error",
        }
    }
}
