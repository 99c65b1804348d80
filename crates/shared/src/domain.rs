use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_newtype!(ProductId);

/// Quantities strictly below this are reported as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

pub const STATUS_IN_STOCK: &str = "Em Estoque";
pub const STATUS_LOW_STOCK: &str = "Baixo Estoque";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    InStock,
    LowStock,
}

impl StockStatus {
    pub fn for_quantity(quantity: i64, low_stock_threshold: i64) -> Self {
        if quantity < low_stock_threshold {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InStock => STATUS_IN_STOCK,
            Self::LowStock => STATUS_LOW_STOCK,
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
