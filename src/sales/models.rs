use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ShopResult;
use crate::inventory::Product;
use crate::sales::PriceCalculator;
use crate::store::Record;

/// One product sold within a sale, copied from the catalog at sale time
///
/// Later catalog changes do not reach a recorded line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    /// Price per unit when the item was sold
    /// `None` for line items restored from the sales log, which only stores
    /// the sale total
    pub unit_price: Option<Decimal>,
}

impl LineItem {
    /// Capture id, name and current price of `product`
    pub fn snapshot(product: &Product, quantity: i32) -> Self {
        Self {
            product_id: product.product_id.clone(),
            product_name: product.product_name.clone(),
            quantity,
            unit_price: Some(product.price),
        }
    }

    pub fn subtotal(&self) -> Option<Decimal> {
        self.unit_price
            .and_then(|price| PriceCalculator::calculate_subtotal(self.quantity, price).ok())
    }
}

/// A sale transaction: an id plus the line items sold together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    sale_id: String,
    line_items: Vec<LineItem>,
    total_price: Decimal,
}

impl Sale {
    /// Start an empty sale
    pub fn new(sale_id: impl Into<String>) -> Self {
        Self {
            sale_id: sale_id.into(),
            line_items: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }

    /// Total this sale would have after adding `quantity` units of `product`
    ///
    /// # Arguments
    /// * `product` - Catalog entry being sold, priced at its current unit price
    /// * `quantity` - Number of units
    ///
    /// # Returns
    /// The new total, or `ShopError::AmountOverflow`. The sale is not changed.
    pub fn total_with(&self, product: &Product, quantity: i32) -> ShopResult<Decimal> {
        PriceCalculator::add_to_total(self.total_price, quantity, product.price)
    }

    /// Add `quantity` units of `product`, priced at its current unit price
    ///
    /// # Errors
    /// `ShopError::AmountOverflow` if the total no longer fits; the sale is
    /// left unchanged.
    pub fn add_line_item(&mut self, product: &Product, quantity: i32) -> ShopResult<()> {
        self.total_price = self.total_with(product, quantity)?;
        self.line_items.push(LineItem::snapshot(product, quantity));
        Ok(())
    }

    /// Running total accumulated by `add_line_item`
    pub fn calculate_total(&self) -> Decimal {
        self.total_price
    }

    pub fn sale_id(&self) -> &str {
        &self.sale_id
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Rebuild a single-item sale from one log row
    ///
    /// The row's `total_price` becomes the sale total as stored.
    pub fn from_record(record: SaleRecord) -> Self {
        Self {
            sale_id: record.sale_id,
            line_items: vec![LineItem {
                product_id: record.product_id,
                product_name: record.product_name,
                quantity: record.quantity_sold,
                unit_price: None,
            }],
            total_price: record.total_price,
        }
    }

    /// One log row per line item, each carrying the whole-sale total
    pub fn to_records(&self) -> Vec<SaleRecord> {
        self.line_items
            .iter()
            .map(|item| SaleRecord {
                sale_id: self.sale_id.clone(),
                product_id: item.product_id.clone(),
                product_name: item.product_name.clone(),
                quantity_sold: item.quantity,
                total_price: self.total_price,
            })
            .collect()
    }
}

/// One row of the sales log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sale_id: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity_sold: i32,
    /// Total of the whole sale, repeated on each of its rows
    #[serde(with = "crate::store::decimal_text")]
    pub total_price: Decimal,
}

impl Record for SaleRecord {
    const HEADERS: &'static [&'static str] = &[
        "sale_id",
        "product_id",
        "product_name",
        "quantity_sold",
        "total_price",
    ];
}
