use std::io::{self, Write};

use crate::error::ShopResult;
use crate::sales::{Sale, SaleRecord};
use crate::store::CsvStore;

/// Recorded sales and the sales log they are persisted to
///
/// The log has one row per line item. Reloading it yields one single-item
/// `Sale` per row, so a multi-item sale comes back as several sales sharing
/// its id.
#[derive(Debug)]
pub struct SalesManager {
    sales: Vec<Sale>,
    store: CsvStore,
}

impl SalesManager {
    /// Load prior sales from `store`; a missing log means no sales yet
    ///
    /// # Arguments
    /// * `store` - CSV sales log with one row per line item
    ///
    /// # Returns
    /// The manager holding one single-item sale per logged row
    pub fn load(store: CsvStore) -> ShopResult<Self> {
        let records: Vec<SaleRecord> = store.load()?;
        let sales: Vec<Sale> = records.into_iter().map(Sale::from_record).collect();

        tracing::debug!("Sales log loaded with {} sales", sales.len());
        Ok(Self { sales, store })
    }

    /// Append a completed sale and rewrite the log
    ///
    /// # Arguments
    /// * `sale` - Finished sale; an empty one is kept in memory but adds no rows
    ///
    /// # Returns
    /// `Ok(())` once the log has been rewritten
    pub fn record_sale(&mut self, sale: Sale) -> ShopResult<()> {
        tracing::info!(
            "Recording sale {} with {} line items, total {}",
            sale.sale_id(),
            sale.line_items().len(),
            sale.calculate_total()
        );
        if sale.is_empty() {
            tracing::warn!("Sale {} has no line items and adds no log rows", sale.sale_id());
        }

        self.sales.push(sale);
        self.save()
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Render one row per line item, each showing its sale's total
    ///
    /// # Arguments
    /// * `out` - Writer receiving the report
    pub fn display_sales_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<10}{:<15}{:<20}{:<15}{:<10}",
            "Sale ID", "Product ID", "Product Name", "Quantity Sold", "Total Price"
        )?;
        for sale in &self.sales {
            let total = sale.calculate_total().to_string();
            for item in sale.line_items() {
                writeln!(
                    out,
                    "{:<10}{:<15}{:<20}{:<15}{:<10}",
                    sale.sale_id(),
                    item.product_id,
                    item.product_name,
                    item.quantity,
                    total
                )?;
            }
        }
        Ok(())
    }

    fn save(&self) -> ShopResult<()> {
        let records: Vec<SaleRecord> = self.sales.iter().flat_map(Sale::to_records).collect();
        self.store.save(&records)
    }
}
