//! The static default catalog.

use matech_core::{Price, ProductId};

use super::Product;

/// The built-in product list, shown even when the remote import fails.
#[must_use]
pub fn default_catalog() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            title: "Datalogger de condiciones ambientales".to_string(),
            price: Price::new(300_000),
            image: "./images/datalogger.png".to_string(),
            category: "dataloggers".to_string(),
            description: "Dispositivo para monitoreo de temperatura, humedad y presión \
                          atmosférica con conectividad WiFi."
                .to_string(),
        },
        Product {
            id: ProductId::new(2),
            title: "Dataloggers de variables eléctricas".to_string(),
            price: Price::new(300_000),
            image: "./images/datalogger.png".to_string(),
            category: "dataloggers".to_string(),
            description: "Equipo especializado para medición de voltaje, corriente y potencia \
                          en tiempo real."
                .to_string(),
        },
        Product {
            id: ProductId::new(3),
            title: "Calibración de datalogger".to_string(),
            price: Price::new(50_000),
            image: "./images/datalogger.png".to_string(),
            category: "servicios".to_string(),
            description: "Servicio profesional de calibración para mantener la precisión de \
                          tus equipos."
                .to_string(),
        },
    ]
}
