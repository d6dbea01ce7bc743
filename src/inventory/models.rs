use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ShopError, ShopResult};
use crate::store::{decimal_text, Record};

/// A catalog item held in the inventory
///
/// The field order matches the product store columns:
/// `product_id,product_name,price,quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    /// Unit price
    #[serde(with = "crate::store::decimal_text")]
    pub price: Decimal,
    /// Units on hand, never driven below zero by `update_quantity`
    pub quantity: i32,
}

impl Record for Product {
    const HEADERS: &'static [&'static str] = &["product_id", "product_name", "price", "quantity"];
}

impl Product {
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        price: Decimal,
        quantity: i32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            price,
            quantity,
        }
    }

    /// Take `delta` units out of stock; a negative delta restocks
    ///
    /// # Errors
    /// - `ShopError::InsufficientStock` if the result would fall below zero
    /// - `ShopError::QuantityOverflow` if the result does not fit in an `i32`
    ///
    /// The quantity is left untouched on error.
    pub fn update_quantity(&mut self, delta: i32) -> ShopResult<i32> {
        match self.quantity.checked_sub(delta) {
            Some(remaining) if remaining >= 0 => {
                self.quantity = remaining;
                Ok(remaining)
            }
            Some(_) => Err(ShopError::InsufficientStock {
                product_id: self.product_id.clone(),
                requested: delta,
                available: self.quantity,
            }),
            None => Err(ShopError::QuantityOverflow {
                product_id: self.product_id.clone(),
                delta,
            }),
        }
    }

    /// Replace the unit price
    pub fn update_price(&mut self, price: Decimal) {
        self.price = price;
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.product_id, self.product_name, self.price, self.quantity
        )
    }
}

/// Parse a price typed by the operator
///
/// Accepts plain decimals ("9.99") and scientific notation ("1e2").
pub fn parse_price(value: &str) -> ShopResult<Decimal> {
    decimal_text::parse(value).map_err(|_| ShopError::InvalidNumber {
        field: "price",
        value: value.to_string(),
    })
}

/// Parse a whole-number quantity; `field` names the prompt in the error
pub fn parse_quantity(field: &'static str, value: &str) -> ShopResult<i32> {
    value.trim().parse::<i32>().map_err(|_| ShopError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
