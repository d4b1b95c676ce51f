//! MATech Core - Shared types library.
//!
//! This crate provides common types used across all MATech store components:
//! - `storefront` - Catalog import, cart engine, and persistence core
//! - `cli` - Command-line front end for browsing and cart management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and minor-unit prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
