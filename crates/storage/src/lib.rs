use anyhow::{Context, Result};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::{domain::ProductId, protocol::Product};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredProduct {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub status: String,
}

impl From<StoredProduct> for Product {
    fn from(value: StoredProduct) -> Self {
        Self {
            id: value.product_id,
            name: value.name,
            quantity: value.quantity,
            status: value.status,
        }
    }
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        debug!(%database_url, "product storage ready");
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    /// Lists every product in insertion order.
    pub async fn list_products(&self) -> Result<Vec<StoredProduct>> {
        let rows = sqlx::query("SELECT id, name, quantity, status FROM products ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(product_from_row).collect())
    }

    pub async fn create_product(
        &self,
        name: &str,
        quantity: i64,
        status: &str,
    ) -> Result<StoredProduct> {
        let row = sqlx::query(
            "INSERT INTO products (name, quantity, status) VALUES (?, ?, ?)
             RETURNING id, name, quantity, status",
        )
        .bind(name)
        .bind(quantity)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("failed to insert product '{name}'"))?;
        Ok(product_from_row(&row))
    }

    /// Returns `None` when no product has the given id.
    pub async fn update_product_quantity(
        &self,
        product_id: ProductId,
        quantity: i64,
        status: &str,
    ) -> Result<Option<StoredProduct>> {
        let row = sqlx::query(
            "UPDATE products
             SET quantity = ?, status = ?, updated_at = CURRENT_TIMESTAMP
             WHERE id = ?
             RETURNING id, name, quantity, status",
        )
        .bind(quantity)
        .bind(status)
        .bind(product_id.0)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("failed to update product {product_id}"))?;
        Ok(row.as_ref().map(product_from_row))
    }

    /// Returns whether a row was actually removed.
    pub async fn delete_product(&self, product_id: ProductId) -> Result<bool> {
        let deleted = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product_id.0)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete product {product_id}"))?
            .rows_affected();
        Ok(deleted > 0)
    }
}

fn product_from_row(row: &SqliteRow) -> StoredProduct {
    StoredProduct {
        product_id: ProductId(row.get::<i64, _>(0)),
        name: row.get::<String, _>(1),
        quantity: row.get::<i64, _>(2),
        status: row.get::<String, _>(3),
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
