//! Inventory and sales tracking for a small shop
//!
//! The catalog and the sales log each live in a comma-delimited file that
//! is read once at startup and rewritten after every change. `ShopSystem`
//! drives both through an interactive text menu.

pub mod config;
pub mod error;
pub mod inventory;
pub mod sales;
pub mod shop;
pub mod store;

pub use config::Config;
pub use error::{ShopError, ShopResult};
pub use inventory::{Inventory, Product};
pub use sales::{LineItem, Sale, SaleRecord, SalesManager};
pub use shop::{MenuChoice, ShopSystem};
pub use store::CsvStore;

#[cfg(test)]
mod tests;
