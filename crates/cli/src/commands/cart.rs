//! Cart management commands.

use matech_core::ProductId;
use matech_storefront::cart::{
    self, CartEngine, CartError, CartEvent, CartObserver, CartSnapshot,
};
use matech_storefront::catalog::{self, CatalogClient};
use matech_storefront::config::StoreConfig;
use matech_storefront::storage::{CartStore, FileStore};

/// Prints a one-line summary after every committed mutation, the way the
/// web widget refreshes its cart badge.
struct BadgeRenderer;

impl CartObserver for BadgeRenderer {
    fn cart_changed(&self, _event: &CartEvent, cart: &CartSnapshot<'_>) {
        println!("Cart: {} item(s), total ${}", cart.item_count, cart.total);
    }
}

fn open_engine(config: &StoreConfig) -> CartEngine {
    let store = CartStore::new(Box::new(FileStore::new(config.data_dir.clone())));
    let mut engine = CartEngine::restore_or_empty(store);
    engine.subscribe(Box::new(BadgeRenderer));
    engine
}

fn parse_id(raw: &str) -> Result<ProductId, Box<dyn std::error::Error>> {
    raw.parse::<ProductId>()
        .map_err(|_| format!("'{raw}' is not a valid product id").into())
}

/// Print the cart contents and total.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let engine = CartEngine::restore_or_empty(CartStore::new(Box::new(FileStore::new(
        config.data_dir.clone(),
    ))));

    if engine.is_empty() {
        println!("The cart is empty");
        return Ok(());
    }

    for item in engine.items() {
        println!(
            "[{}] {} x{} - ${}",
            item.id,
            item.title,
            item.quantity,
            item.price.times(item.quantity)
        );
    }
    println!("Total: ${}", engine.total());

    Ok(())
}

/// Add one unit of a catalog product to the cart.
pub async fn add(raw_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let id = parse_id(raw_id)?;

    let client = CatalogClient::with_base_url(&config.catalog_base_url);
    let import =
        catalog::import_catalog(&client, catalog::default_catalog(), &config.import).await;
    let product = import
        .products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| format!("no product with id {id} in the catalog"))?;

    let mut engine = open_engine(&config);
    engine.add_item(product)?;
    println!("{} added to cart", product.title);

    Ok(())
}

/// Remove a cart line by product id.
pub fn remove(raw_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let id = parse_id(raw_id)?;

    let mut engine = open_engine(&config);
    if engine.remove_item(id)? {
        println!("Product {id} removed from cart");
    } else {
        println!("Product {id} is not in the cart");
    }

    Ok(())
}

/// Set the quantity of a cart line.
pub fn set(raw_id: &str, raw_quantity: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let id = parse_id(raw_id)?;
    let Some(quantity) = cart::parse_quantity_input(raw_quantity) else {
        return Err(format!("'{raw_quantity}' is not a valid quantity").into());
    };

    let mut engine = open_engine(&config);
    if engine.set_quantity(id, quantity)? {
        println!("Quantity updated");
    } else {
        println!("No change: the line does not exist or the quantity is not positive");
    }

    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let mut engine = open_engine(&config);
    engine.clear()?;
    println!("Cart emptied");

    Ok(())
}

/// Finalize the purchase: print the receipt the external order handoff
/// would receive, and leave the cart empty.
pub fn checkout() -> Result<(), Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;
    let mut engine = open_engine(&config);

    match engine.checkout() {
        Ok(receipt) => {
            println!(
                "Purchase complete: {} item(s), total ${}",
                receipt.item_count, receipt.total
            );
        }
        Err(CartError::EmptyCart) => println!("The cart is empty"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
