//! Catalog import: remote fetch, relevance filtering, and merge with the
//! default catalog.
//!
//! The session catalog is `defaults ++ filtered-imported`: the static
//! default products first, then remote records that pass the relevance
//! filter, adapted to the local schema. Remote ordering is preserved and the
//! imported tail is capped by [`ImportConfig::limit`]. The merge is
//! deterministic for a fixed remote snapshot and config; network variance is
//! the only source of differences between sessions.
//!
//! A failed fetch is not fatal: the import degrades to the defaults and
//! carries the error as a warning for the presentation layer to surface.

pub mod client;
mod conversions;
mod defaults;

pub use client::{CatalogClient, RemoteProduct};
pub use defaults::default_catalog;

use matech_core::{Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use conversions::adapt_remote_product;

/// A purchasable product in the merged catalog.
///
/// Immutable once the catalog is built for a session; cart lines snapshot
/// the fields they need instead of referencing catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique id within the catalog.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price in pesos, minor units.
    pub price: Price,
    /// Image URL or local path.
    pub image: String,
    /// Store category.
    pub category: String,
    /// Display description.
    pub description: String,
}

/// Errors that can occur when talking to the remote catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog endpoint answered with a non-success status.
    #[error("catalog endpoint returned HTTP {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for selecting which remote products are worth importing.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Remote categories imported wholesale.
    pub relevant_categories: Vec<String>,
    /// Remote ids known to be useful regardless of category or keywords.
    pub allowed_ids: Vec<i64>,
    /// Substrings matched case-insensitively against title plus description.
    pub keywords: Vec<String>,
    /// Inclusive lower price bound, in the source currency.
    pub price_min: Decimal,
    /// Inclusive upper price bound, in the source currency.
    pub price_max: Decimal,
    /// Maximum number of imported products appended to the defaults.
    pub limit: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            relevant_categories: vec!["electronics".to_string()],
            allowed_ids: vec![12, 13, 14],
            keywords: [
                "electronic",
                "digital",
                "monitor",
                "device",
                "sensor",
                "meter",
                "wireless",
                "portable",
                "precision",
                "measurement",
                "data",
                "smart",
                "cable",
                "adapter",
                "charger",
                "battery",
                "power",
                "usb",
                "bluetooth",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            price_min: Decimal::from(100),
            price_max: Decimal::from(1000),
            limit: 3,
        }
    }
}

/// Outcome of a catalog import.
#[derive(Debug)]
pub struct CatalogImport {
    /// Defaults followed by the adapted remote products.
    pub products: Vec<Product>,
    /// How many remote products made it through the filter.
    pub imported: usize,
    /// Set when the remote fetch failed and only defaults are available.
    pub warning: Option<CatalogError>,
}

/// Build the session catalog.
///
/// Fetches the remote product list, keeps the relevant records, and appends
/// them (adapted) to `defaults`. A failed fetch degrades to the defaults;
/// the error travels in [`CatalogImport::warning`] so the caller can show a
/// non-fatal notice.
pub async fn import_catalog(
    client: &CatalogClient,
    defaults: Vec<Product>,
    config: &ImportConfig,
) -> CatalogImport {
    let records = match client.fetch_products().await {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "catalog import degraded to defaults");
            return CatalogImport {
                products: defaults,
                imported: 0,
                warning: Some(e),
            };
        }
    };

    let imported = select_and_adapt(records, config);
    info!(count = imported.len(), "imported remote catalog products");

    let imported_count = imported.len();
    let mut products = defaults;
    products.extend(imported);

    CatalogImport {
        products,
        imported: imported_count,
        warning: None,
    }
}

/// Import every product of one remote category, unfiltered.
///
/// # Errors
///
/// Propagates the fetch failure; there is no default to degrade to for a
/// single category.
pub async fn import_category(
    client: &CatalogClient,
    category: &str,
) -> Result<Vec<Product>, CatalogError> {
    let records = client.fetch_category(category).await?;
    Ok(records.into_iter().map(adapt_remote_product).collect())
}

/// Import specific products by remote id, skipping ids that fail to fetch
/// or parse.
pub async fn import_products(client: &CatalogClient, ids: &[i64]) -> Vec<Product> {
    let mut products = Vec::with_capacity(ids.len());
    for &id in ids {
        match client.fetch_product(id).await {
            Ok(record) => products.push(adapt_remote_product(record)),
            Err(e) => debug!(id, error = %e, "skipping unavailable product"),
        }
    }
    products
}

/// The pure import pipeline: relevance filter, price band, cap, adapt.
fn select_and_adapt(records: Vec<RemoteProduct>, config: &ImportConfig) -> Vec<Product> {
    records
        .into_iter()
        .filter(|record| is_relevant(record, config))
        .filter(|record| within_price_band(record, config))
        .take(config.limit)
        .map(adapt_remote_product)
        .collect()
}

/// Whether a remote record is worth importing: relevant category, explicitly
/// allowed id, or a keyword hit in title/description.
fn is_relevant(record: &RemoteProduct, config: &ImportConfig) -> bool {
    if config
        .relevant_categories
        .iter()
        .any(|category| category == &record.category)
    {
        return true;
    }
    if config.allowed_ids.contains(&record.id) {
        return true;
    }
    let haystack = format!("{} {}", record.title, record.description).to_lowercase();
    config
        .keywords
        .iter()
        .any(|keyword| haystack.contains(&keyword.to_lowercase()))
}

/// The price band applies to the source-currency amount, before conversion.
fn within_price_band(record: &RemoteProduct, config: &ImportConfig) -> bool {
    record.price >= config.price_min && record.price <= config.price_max
}
