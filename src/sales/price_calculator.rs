use rust_decimal::Decimal;

use crate::error::{ShopError, ShopResult};

/// Arithmetic for line-item subtotals and sale totals
pub struct PriceCalculator;

impl PriceCalculator {
    /// Calculate the subtotal for one line item
    ///
    /// # Arguments
    /// * `quantity` - Number of units sold
    /// * `unit_price` - Price per unit when the item was sold
    ///
    /// # Returns
    /// `unit_price * quantity`, or `ShopError::AmountOverflow` when the
    /// product does not fit in a `Decimal`
    pub fn calculate_subtotal(quantity: i32, unit_price: Decimal) -> ShopResult<Decimal> {
        Decimal::from(quantity)
            .checked_mul(unit_price)
            .ok_or(ShopError::AmountOverflow {
                quantity,
                unit_price,
                total: Decimal::ZERO,
            })
    }

    /// Calculate the running total after one more line item
    ///
    /// # Arguments
    /// * `total` - Sale total so far
    /// * `quantity` - Number of units in the new line item
    /// * `unit_price` - Price per unit of the new line item
    ///
    /// # Returns
    /// `total + unit_price * quantity`, or `ShopError::AmountOverflow` when
    /// either step overflows
    pub fn add_to_total(total: Decimal, quantity: i32, unit_price: Decimal) -> ShopResult<Decimal> {
        let overflow = || ShopError::AmountOverflow {
            quantity,
            unit_price,
            total,
        };
        let subtotal = Self::calculate_subtotal(quantity, unit_price).map_err(|_| overflow())?;
        total.checked_add(subtotal).ok_or_else(overflow)
    }
}
