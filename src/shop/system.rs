use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::{ShopError, ShopResult};
use crate::inventory::{Inventory, Product};
use crate::sales::{Sale, SalesManager};
use crate::shop::{MenuChoice, Prompter};
use crate::store::CsvStore;

/// Answer that ends the product loop of a sale, matched case-insensitively
pub const DONE_SENTINEL: &str = "done";

/// Interactive front end tying the inventory and the sales log together
#[derive(Debug)]
pub struct ShopSystem {
    inventory: Inventory,
    sales_manager: SalesManager,
}

impl ShopSystem {
    /// Load both data files named by `config`
    pub fn new(config: &Config) -> ShopResult<Self> {
        let inventory = Inventory::load(CsvStore::new(&config.inventory_path))?;
        let sales_manager = SalesManager::load(CsvStore::new(&config.sales_path))?;

        tracing::info!(
            "Shop ready: {} products, {} sales",
            inventory.len(),
            sales_manager.sales().len()
        );
        Ok(Self::from_parts(inventory, sales_manager))
    }

    pub fn from_parts(inventory: Inventory, sales_manager: SalesManager) -> Self {
        Self {
            inventory,
            sales_manager,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn sales_manager(&self) -> &SalesManager {
        &self.sales_manager
    }

    /// Run the menu loop until the operator exits or input runs out
    ///
    /// # Errors
    /// Any non-recoverable `ShopError` (bad number, I/O failure, input
    /// closed mid-prompt) ends the session and is returned.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: W) -> ShopResult<()> {
        let mut prompter = Prompter::new(input, output);

        loop {
            Self::display_menu(&mut prompter)?;
            let Some(answer) = prompter.read_line("Enter your choice: ")? else {
                tracing::info!("Input closed at the menu, ending session");
                break;
            };

            match MenuChoice::from_input(&answer) {
                Some(choice) if choice.is_terminal() => break,
                Some(choice) => self.handle(choice, &mut prompter)?,
                None => {
                    tracing::debug!("Invalid menu choice: {:?}", answer);
                    prompter.say("Invalid choice. Please try again.")?;
                }
            }
        }

        tracing::info!("Session ended");
        Ok(())
    }

    fn display_menu<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> ShopResult<()> {
        prompter.say("")?;
        for choice in MenuChoice::ALL {
            prompter.say(choice)?;
        }
        Ok(())
    }

    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        prompter: &mut Prompter<R, W>,
    ) -> ShopResult<()> {
        match choice {
            MenuChoice::ViewInventory => self.inventory.display_inventory(prompter.output())?,
            MenuChoice::AddProduct => self.add_product_to_inventory(prompter)?,
            MenuChoice::UpdateProduct => self.update_product_in_inventory(prompter)?,
            MenuChoice::MakeSale => self.make_sale(prompter)?,
            MenuChoice::ViewSales => self
                .sales_manager
                .display_sales_report(prompter.output())?,
            MenuChoice::Exit => {}
        }
        Ok(())
    }

    fn add_product_to_inventory<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> ShopResult<()> {
        let product_id = prompter.ask("Enter product ID: ", "product ID")?;
        let product_name = prompter.ask("Enter product name: ", "product name")?;
        let price = prompter.ask_price("Enter product price: ")?;
        let quantity = prompter.ask_quantity("Enter product quantity: ")?;

        self.inventory
            .add_product(Product::new(product_id, product_name, price, quantity))?;
        prompter.say("Product added to inventory.")
    }

    fn update_product_in_inventory<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> ShopResult<()> {
        let product_id = prompter.ask("Enter product ID to update: ", "product ID")?;
        let delta = prompter.ask_quantity("Enter quantity to update: ")?;

        match self.inventory.update_product(&product_id, delta) {
            Ok(_) => prompter.say("Product updated."),
            Err(ShopError::ProductNotFound(_)) => prompter.say("Product not found."),
            Err(err) if err.is_recoverable() => {
                err.log();
                prompter.say(format!("Update rejected: {err}"))
            }
            Err(err) => Err(err),
        }
    }

    fn make_sale<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> ShopResult<()> {
        let sale_id = prompter.ask("Enter sale ID: ", "sale ID")?;
        let mut sale = Sale::new(sale_id);

        loop {
            let product_id =
                prompter.ask("Enter product ID to sell (or 'done' to finish): ", "product ID")?;
            if product_id.eq_ignore_ascii_case(DONE_SENTINEL) {
                break;
            }
            let quantity = prompter.ask_quantity("Enter quantity: ")?;

            match self.sell(&mut sale, &product_id, quantity) {
                Ok(product_name) => {
                    prompter.say(format!("Added {quantity} of {product_name} to sale."))?
                }
                Err(err @ ShopError::AmountOverflow { .. }) => {
                    tracing::warn!("Sale {} line rejected: {}", sale.sale_id(), err);
                    prompter.say(format!("Line rejected: {err}"))?;
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!("Sale {} line rejected: {}", sale.sale_id(), err);
                    prompter.say("Not enough stock or invalid product ID.")?;
                }
                Err(err) => return Err(err),
            }
        }

        let total = sale.calculate_total();
        self.sales_manager.record_sale(sale)?;
        prompter.say(format!("Sale recorded with total price: {total}"))
    }

    /// Take `quantity` of `product_id` out of stock and add it to `sale`
    ///
    /// The new sale total is checked before any stock changes, so a line
    /// that cannot be priced leaves the inventory and its store untouched.
    ///
    /// # Returns
    /// Name of the product sold
    fn sell(&mut self, sale: &mut Sale, product_id: &str, quantity: i32) -> ShopResult<String> {
        let product = self
            .inventory
            .get_product_by_id(product_id)
            .ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;
        sale.total_with(product, quantity)?;

        let product = self.inventory.update_product(product_id, quantity)?;
        sale.add_line_item(product, quantity)?;
        Ok(product.product_name.clone())
    }
}
