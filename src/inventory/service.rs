use std::collections::HashMap;
use std::io::{self, Write};

use crate::error::{ShopError, ShopResult};
use crate::inventory::Product;
use crate::store::CsvStore;

/// The product catalog and its backing store
///
/// Products are kept in insertion order for display and persistence, with
/// an id index pointing at the first product carrying each id. Ids are not
/// required to be unique.
#[derive(Debug)]
pub struct Inventory {
    products: Vec<Product>,
    index: HashMap<String, usize>,
    store: CsvStore,
}

impl Inventory {
    /// Load the catalog from `store`; a missing store is an empty catalog
    ///
    /// # Arguments
    /// * `store` - CSV file holding one product per row
    ///
    /// # Returns
    /// The loaded inventory, or `ShopError::Csv` / `ShopError::Io` when the
    /// file exists but cannot be read
    pub fn load(store: CsvStore) -> ShopResult<Self> {
        let products: Vec<Product> = store.load()?;
        let mut inventory = Self {
            products: Vec::with_capacity(products.len()),
            index: HashMap::new(),
            store,
        };
        for product in products {
            inventory.push(product);
        }

        tracing::debug!("Inventory loaded with {} products", inventory.products.len());
        Ok(inventory)
    }

    /// Append a product and rewrite the store
    ///
    /// # Arguments
    /// * `product` - Product to add; a repeated id is kept but never looked up
    ///
    /// # Returns
    /// `Ok(())` once the store has been rewritten
    pub fn add_product(&mut self, product: Product) -> ShopResult<()> {
        tracing::debug!("Adding product {}", product.product_id);
        if self.index.contains_key(&product.product_id) {
            tracing::warn!(
                "Product id {} already present; lookups keep returning the first entry",
                product.product_id
            );
        }

        self.push(product);
        self.save()
    }

    /// Take `delta` units of the first product matching `product_id` out of
    /// stock and rewrite the store
    ///
    /// # Arguments
    /// * `product_id` - Id of the product to change
    /// * `delta` - Units to remove; negative restocks
    ///
    /// # Returns
    /// The updated product
    ///
    /// # Errors
    /// - `ShopError::ProductNotFound` if no product has that id
    /// - `ShopError::InsufficientStock` if stock would go below zero
    /// - `ShopError::QuantityOverflow` if a restock would exceed `i32::MAX`
    ///
    /// Nothing is mutated or written in either case.
    pub fn update_product(&mut self, product_id: &str, delta: i32) -> ShopResult<&Product> {
        let position = *self
            .index
            .get(product_id)
            .ok_or_else(|| {
                tracing::debug!("Product {} not found for update", product_id);
                ShopError::ProductNotFound(product_id.to_string())
            })?;

        let remaining = self.products[position].update_quantity(delta)?;
        self.save()?;

        tracing::info!("Product {} quantity now {}", product_id, remaining);
        Ok(&self.products[position])
    }

    /// First product with the given id, if any
    ///
    /// # Arguments
    /// * `product_id` - Id to look up, matched exactly
    ///
    /// # Returns
    /// The first product added with that id, or `None`
    pub fn get_product_by_id(&self, product_id: &str) -> Option<&Product> {
        self.index
            .get(product_id)
            .map(|&position| &self.products[position])
    }

    /// All products in insertion order
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Render the catalog as a fixed-width table
    ///
    /// # Arguments
    /// * `out` - Writer receiving the header row and one row per product
    pub fn display_inventory<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<15}{:<20}{:<10}{:<10}",
            "Product ID", "Product Name", "Price", "Quantity"
        )?;
        for product in &self.products {
            writeln!(
                out,
                "{:<15}{:<20}{:<10}{:<10}",
                product.product_id,
                product.product_name,
                product.price.to_string(),
                product.quantity
            )?;
        }
        Ok(())
    }

    fn push(&mut self, product: Product) {
        let position = self.products.len();
        self.index
            .entry(product.product_id.clone())
            .or_insert(position);
        self.products.push(product);
    }

    fn save(&self) -> ShopResult<()> {
        self.store.save(&self.products)
    }
}
