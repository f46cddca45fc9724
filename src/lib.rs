//! Deterministic SQL seed data for an e-commerce test database.
//!
//! Generates products, product views, orders and order items, and writes
//! them as a MySQL script of `INSERT` statements.
//!
//! # Example
//!
//! ```rust
//! use shop_seed::config::{parse_datetime, SeedConfig};
//! use shop_seed::generator::Generator;
//!
//! let mut config = SeedConfig::default();
//! config.products.count = 10;
//! config.orders.count = 3;
//!
//! let anchor = parse_datetime("2025-01-31 12:00:00").unwrap();
//! let data = Generator::new(&config, 42, anchor).unwrap().generate();
//! assert_eq!(data.orders.len(), 3);
//! ```

pub mod config;
pub mod fake;
pub mod generator;
pub mod model;
pub mod render;
pub mod runner;
pub mod script;
pub mod writer;
