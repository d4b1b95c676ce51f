//! Adaptation of remote catalog records to the local product schema.
//!
//! Remote records arrive in the remote API's id space, currency, and
//! language; this module maps them into the store's own. The mapping is
//! deterministic: the same record always adapts to the same product.

use matech_core::{Price, ProductId};
use rust_decimal::Decimal;

use super::Product;
use super::client::RemoteProduct;

/// Offset added to remote ids so they cannot collide with default catalog
/// ids.
pub(crate) const IMPORTED_ID_OFFSET: i64 = 1000;

/// Pesos per source-currency unit.
pub(crate) const EXCHANGE_RATE: i64 = 850;

/// Curated technical titles for known remote products. Exact match only;
/// unknown titles pass through unchanged.
fn curated_title(title: &str) -> Option<&'static str> {
    match title {
        "WD 2TB Elements Portable External Hard Drive - USB 3.0" => {
            Some("Disco duro portátil para almacenamiento de datos")
        }
        "SanDisk SSD PLUS 1TB Internal SSD - SATA III 6 Gb/s" => {
            Some("SSD interno para sistemas de medición")
        }
        "Silicon Power 256GB SSD 3D NAND A55 SLC Cache Performance Boost SATA III 2.5" => {
            Some("SSD de alto rendimiento para dataloggers")
        }
        "WD 4TB Gaming Drive Works with Playstation 4 Portable External Hard Drive" => {
            Some("Disco externo para respaldo de mediciones")
        }
        "Acer SB220Q bi 21.5 inches Full HD (1920 x 1080) IPS Ultra-Thin" => {
            Some("Monitor LCD para visualización de datos")
        }
        "Samsung 49-Inch CHG90 QLED Gaming Monitor" => {
            Some("Monitor curvo para análisis de datos")
        }
        _ => None,
    }
}

/// Remote "electronics" maps to the store's equipment category; everything
/// else lands in generic accessories.
fn map_category(remote: &str) -> &'static str {
    if remote == "electronics" {
        "equipos-electronicos"
    } else {
        "accesorios-electronicos"
    }
}

/// Map a remote record into the local product schema.
pub(crate) fn adapt_remote_product(record: RemoteProduct) -> Product {
    let title = curated_title(&record.title).map_or(record.title, ToString::to_string);
    Product {
        id: ProductId::new(record.id + IMPORTED_ID_OFFSET),
        title,
        price: Price::from_source(record.price, Decimal::from(EXCHANGE_RATE)),
        image: record.image,
        category: map_category(&record.category).to_string(),
        description: record.description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, title: &str, price: Decimal, category: &str) -> RemoteProduct {
        RemoteProduct {
            id,
            title: title.to_string(),
            price,
            category: category.to_string(),
            description: "A portable storage device".to_string(),
            image: "https://img.example/p.jpg".to_string(),
        }
    }

    #[test]
    fn test_adapt_offsets_id_and_converts_price() {
        let product = adapt_remote_product(record(
            9,
            "Some USB hub",
            Decimal::new(10_995, 2), // 109.95
            "electronics",
        ));

        assert_eq!(product.id, ProductId::new(1009));
        // 109.95 * 850 = 93457.5, rounded half up
        assert_eq!(product.price, Price::new(93_458));
        assert_eq!(product.category, "equipos-electronicos");
        assert_eq!(product.title, "Some USB hub");
    }

    #[test]
    fn test_adapt_uses_curated_title_on_exact_match() {
        let product = adapt_remote_product(record(
            1,
            "Samsung 49-Inch CHG90 QLED Gaming Monitor",
            Decimal::from(999),
            "electronics",
        ));

        assert_eq!(product.title, "Monitor curvo para análisis de datos");
    }

    #[test]
    fn test_adapt_maps_unknown_categories_to_accessories() {
        let product = adapt_remote_product(record(2, "Gold ring", Decimal::from(168), "jewelery"));
        assert_eq!(product.category, "accesorios-electronicos");
    }
}
