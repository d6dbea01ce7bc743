// Error handling module for the shop ledger
// Provides the crate-wide error type and its fatal/recoverable split

use tracing::{debug, error};

/// Main error type for the shop ledger
/// All inventory, sales and session operations return `ShopResult<T>`
///
/// Lookup misses and stock shortfalls are reported to the operator and the
/// session carries on. Everything else ends the session.
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    /// Reading or rewriting a data file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row in a data file could not be parsed or written
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Operator typed something that is not a number where one was expected
    #[error("Invalid {field}: '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Not enough stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i32,
        available: i32,
    },

    /// Restocking would push the quantity past what an `i32` can hold
    #[error("Quantity for {product_id} cannot change by {delta}")]
    QuantityOverflow { product_id: String, delta: i32 },

    /// A line subtotal or sale total is larger than a `Decimal` can hold
    #[error("Amount too large: {quantity} x {unit_price} added to {total}")]
    AmountOverflow {
        quantity: i32,
        unit_price: rust_decimal::Decimal,
        total: rust_decimal::Decimal,
    },

    /// Standard input ended while a prompt was waiting for an answer
    #[error("Input closed while waiting for {0}")]
    InputClosed(&'static str),
}

/// Result alias used across the crate
pub type ShopResult<T> = Result<T, ShopError>;

impl ShopError {
    /// Whether the session can continue after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ShopError::ProductNotFound(_)
                | ShopError::InsufficientStock { .. }
                | ShopError::QuantityOverflow { .. }
                | ShopError::AmountOverflow { .. }
        )
    }

    /// Log the error at a level matching its severity
    ///
    /// - debug!: expected operator mistakes (unknown id, short stock, overflow)
    /// - error!: anything that terminates the session
    pub fn log(&self) {
        if self.is_recoverable() {
            debug!("Recoverable error: {}", self);
        } else {
            error!("Fatal error: {}", self);
        }
    }
}
