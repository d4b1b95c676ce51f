//! Catalog display command.

use matech_storefront::catalog::{self, CatalogClient};
use matech_storefront::config::StoreConfig;

/// Fetch, merge, and print the session catalog.
pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let client = CatalogClient::with_base_url(&config.catalog_base_url);

    let import =
        catalog::import_catalog(&client, catalog::default_catalog(), &config.import).await;

    if import.warning.is_some() {
        println!("Some products could not be loaded; showing available products.\n");
    }

    for product in &import.products {
        println!("[{}] {} - ${}", product.id, product.title, product.price);
        println!("      {} | {}", product.category, product.description);
    }
    println!(
        "\n{} products ({} imported)",
        import.products.len(),
        import.imported
    );

    Ok(())
}
