use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ProductId,
    error::{ApiError, ApiException, ErrorCode},
    protocol::{product_path, NewProduct, Product, QuantityUpdate, PRODUCTS_PATH},
};
use tracing::debug;
use url::Url;

use crate::{error::ClientError, InventoryApi};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// `InventoryApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpInventoryApi {
    http: Client,
    server_url: String,
}

impl HttpInventoryApi {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, ClientError> {
        let trimmed = server_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|source| ClientError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })?;
        Ok(Self {
            http,
            server_url: trimmed.to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

async fn ensure_success(path: &str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let source = match serde_json::from_str::<ApiError>(&body) {
        Ok(api_error) => ApiException::from(api_error),
        Err(_) => ApiException::new(ErrorCode::Internal, body),
    };
    Err(ClientError::Rejected {
        path: path.to_string(),
        status: status.as_u16(),
        source,
    })
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ClientError> {
    let response = ensure_success(path, response).await?;
    let bytes = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport {
            path: path.to_string(),
            source,
        })?;
    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

fn transport(path: &str) -> impl FnOnce(reqwest::Error) -> ClientError + '_ {
    move |source| ClientError::Transport {
        path: path.to_string(),
        source,
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        let response = self
            .http
            .get(self.url(PRODUCTS_PATH))
            .send()
            .await
            .map_err(transport(PRODUCTS_PATH))?;
        let products: Vec<Product> = decode(PRODUCTS_PATH, response).await?;
        debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ClientError> {
        let response = self
            .http
            .post(self.url(PRODUCTS_PATH))
            .json(product)
            .send()
            .await
            .map_err(transport(PRODUCTS_PATH))?;
        decode(PRODUCTS_PATH, response).await
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<(), ClientError> {
        let path = product_path(product_id);
        let response = self
            .http
            .delete(self.url(&path))
            .send()
            .await
            .map_err(transport(&path))?;
        // The confirmation body carries nothing the client needs.
        ensure_success(&path, response).await?;
        Ok(())
    }

    async fn update_quantity(
        &self,
        product_id: ProductId,
        update: QuantityUpdate,
    ) -> Result<Product, ClientError> {
        let path = product_path(product_id);
        let response = self
            .http
            .put(self.url(&path))
            .json(&update)
            .send()
            .await
            .map_err(transport(&path))?;
        decode(&path, response).await
    }
}
