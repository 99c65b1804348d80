//! JSON bodies exchanged on the `/produtos` routes.
//!
//! Field names on the wire are Portuguese (`nome`, `quantidade`, `mensagem`)
//! and are mapped onto English Rust names with `serde(rename)`.

use serde::{Deserialize, Serialize};

use crate::domain::ProductId;

pub const PRODUCTS_PATH: &str = "/produtos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdate {
    #[serde(rename = "quantidade")]
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteProductResponse {
    #[serde(rename = "mensagem")]
    pub message: String,
}

pub fn product_path(id: ProductId) -> String {
    format!("{PRODUCTS_PATH}/{}", id.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_uses_wire_field_names() {
        let product = Product {
            id: ProductId(1),
            name: "Cable".to_string(),
            quantity: 10,
            status: "OK".to_string(),
        };
        let value = serde_json::to_value(&product).expect("json");
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "nome": "Cable", "quantidade": 10, "status": "OK"})
        );
    }

    #[test]
    fn quantity_update_body_only_carries_quantity() {
        let body = serde_json::to_string(&QuantityUpdate { quantity: 4 }).expect("json");
        assert_eq!(body, r#"{"quantidade":4}"#);
    }

    #[test]
    fn product_path_appends_id() {
        assert_eq!(product_path(ProductId(42)), "/produtos/42");
    }
}
