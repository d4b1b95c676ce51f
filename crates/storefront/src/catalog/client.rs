//! HTTP client for the remote catalog API.
//!
//! Wraps `reqwest` with catalog-specific error handling and a `moka` cache
//! (5-minute TTL) on fetches. List responses are decoded leniently: each
//! record is converted individually, and a record that does not match the
//! expected shape is dropped with a `debug!` instead of failing the request.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::CatalogError;

const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

/// A product record as served by the remote catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProduct {
    /// Remote id, in the remote API's own id space.
    pub id: i64,
    /// Original (untranslated) title.
    pub title: String,
    /// Fractional price in the source currency.
    pub price: Decimal,
    /// Remote category name.
    pub category: String,
    /// Original description.
    pub description: String,
    /// Image URL.
    pub image: String,
}

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<RemoteProduct>>),
    Product(Arc<RemoteProduct>),
}

/// Client for the remote catalog API.
///
/// Cheaply cloneable; fetches are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a client pointed at the production catalog API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (tests, mirrors).
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Fetch the full remote product list.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Http`] on transport failure, [`CatalogError::Status`]
    /// on a non-2xx response, [`CatalogError::Parse`] if the body is not a
    /// JSON array.
    pub async fn fetch_products(&self) -> Result<Vec<RemoteProduct>, CatalogError> {
        let cache_key = "products".to_string();
        if let Some(CacheValue::Products(records)) = self.inner.cache.get(&cache_key).await {
            debug!("cache hit for product list");
            return Ok(records.as_ref().clone());
        }

        let records = self.get_records("/products").await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::new(records.clone())))
            .await;
        Ok(records)
    }

    /// Fetch all products in one remote category.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogClient::fetch_products`].
    pub async fn fetch_category(&self, category: &str) -> Result<Vec<RemoteProduct>, CatalogError> {
        let cache_key = format!("category:{category}");
        if let Some(CacheValue::Products(records)) = self.inner.cache.get(&cache_key).await {
            debug!(category, "cache hit for category");
            return Ok(records.as_ref().clone());
        }

        let records = self
            .get_records(&format!("/products/category/{category}"))
            .await?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(Arc::new(records.clone())))
            .await;
        Ok(records)
    }

    /// Fetch a single product by remote id.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Http`]/[`CatalogError::Status`] as above, or
    /// [`CatalogError::Parse`] if the record does not match the expected
    /// shape.
    pub async fn fetch_product(&self, id: i64) -> Result<RemoteProduct, CatalogError> {
        let cache_key = format!("product:{id}");
        if let Some(CacheValue::Product(record)) = self.inner.cache.get(&cache_key).await {
            debug!(id, "cache hit for product");
            return Ok(record.as_ref().clone());
        }

        let body = self.get_json(&format!("/products/{id}")).await?;
        let record: RemoteProduct = serde_json::from_value(body)?;
        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Arc::new(record.clone())))
            .await;
        Ok(record)
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn get_records(&self, path: &str) -> Result<Vec<RemoteProduct>, CatalogError> {
        let body = self.get_json(path).await?;
        let raw: Vec<serde_json::Value> = serde_json::from_value(body)?;
        Ok(decode_records(raw))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode records one by one, dropping the malformed ones.
fn decode_records(raw: Vec<serde_json::Value>) -> Vec<RemoteProduct> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<RemoteProduct>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "dropping malformed catalog record");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_records_drops_malformed_entries() {
        let raw = vec![
            json!({
                "id": 9,
                "title": "USB hub",
                "price": 64.0,
                "category": "electronics",
                "description": "4-port hub",
                "image": "https://img.example/9.jpg",
            }),
            // No price; dropped, not fatal.
            json!({
                "id": 10,
                "title": "Broken record",
                "category": "electronics",
                "description": "",
                "image": "",
            }),
            json!("not even an object"),
        ];

        let records = decode_records(raw);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 9);
        assert_eq!(records[0].price, Decimal::new(64, 0));
    }
}
