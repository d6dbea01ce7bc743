// Session tests for the shop ledger
// Drive ShopSystem::run with scripted operator input against temp data files

use super::*;
use rust_decimal_macros::dec;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

const MENU: &str = "\n1. View Inventory\n2. Add Product to Inventory\n3. Update Product in Inventory\n4. Make a Sale\n5. View Sales Report\n6. Exit\nEnter your choice: ";
const INVENTORY_HEADER: &str = "product_id,product_name,price,quantity\n";
const SALES_HEADER: &str = "sale_id,product_id,product_name,quantity_sold,total_price\n";

fn config_in(dir: &TempDir) -> Config {
    Config {
        inventory_path: dir.path().join("inventory.csv"),
        sales_path: dir.path().join("sales.csv"),
    }
}

fn open_shop(dir: &TempDir) -> ShopSystem {
    ShopSystem::new(&config_in(dir)).expect("Failed to open shop")
}

/// Run one session and return its transcript alongside the outcome
fn session(shop: &mut ShopSystem, script: &str) -> (ShopResult<()>, String) {
    let mut out = Vec::new();
    let result = shop.run(script.as_bytes(), &mut out);
    (result, String::from_utf8(out).expect("Transcript is not UTF-8"))
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).expect("Failed to read data file")
}

fn seed_widget(dir: &TempDir) {
    std::fs::write(
        dir.path().join("inventory.csv"),
        format!("{INVENTORY_HEADER}P1,Widget,9.99,10\nP2,Gadget,4.50,3\n"),
    )
    .expect("Failed to seed inventory");
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[test]
fn test_add_update_and_sell_widget() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let script = concat!(
        "2\nP1\nWidget\n9.99\n10\n",
        "3\nP1\n3\n",
        "4\nS1\nP1\n2\nP1\n100\ndone\n",
        "6\n",
    );
    let (result, transcript) = session(&mut shop, script);

    assert!(result.is_ok());
    assert!(transcript.contains("Product added to inventory.\n"));
    assert!(transcript.contains("Product updated.\n"));
    assert!(transcript.contains("Added 2 of Widget to sale.\n"));
    assert!(transcript.contains("Not enough stock or invalid product ID.\n"));
    assert!(transcript.contains("Sale recorded with total price: 19.98\n"));

    let widget = shop.inventory().get_product_by_id("P1").unwrap();
    assert_eq!(widget.quantity, 5);
    assert_eq!(shop.sales_manager().sales()[0].calculate_total(), dec!(19.98));

    assert_eq!(read(&dir, "inventory.csv"), format!("{INVENTORY_HEADER}P1,Widget,9.99,5\n"));
    assert_eq!(read(&dir, "sales.csv"), format!("{SALES_HEADER}S1,P1,Widget,2,19.98\n"));

    let reloaded = open_shop(&dir);
    let sales = reloaded.sales_manager().sales();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].sale_id(), "S1");
    assert_eq!(sales[0].line_items()[0].quantity, 2);
}

#[test]
fn test_fresh_start_shows_empty_views() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "1\n5\n6\n");

    assert!(result.is_ok());
    assert!(transcript.starts_with(MENU));
    assert!(transcript.contains("Product ID     Product Name        Price     Quantity  \n"));
    assert!(transcript
        .contains("Sale ID   Product ID     Product Name        Quantity Sold  Total Price\n"));
    assert!(!dir.path().join("inventory.csv").exists());
    assert!(!dir.path().join("sales.csv").exists());
}

#[test]
fn test_exit_ends_session_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "6\n1\n");

    assert!(result.is_ok());
    assert_eq!(transcript, MENU);
}

#[test]
fn test_end_of_input_at_menu_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "");

    assert!(result.is_ok());
    assert_eq!(transcript, MENU);
}

#[test]
fn test_invalid_choice_redisplays_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "9\n6\n");

    assert!(result.is_ok());
    assert_eq!(
        transcript,
        format!("{MENU}Invalid choice. Please try again.\n{MENU}")
    );
}

// ============================================================================
// Inventory menu options
// ============================================================================

#[test]
fn test_view_inventory_lists_seeded_products() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (_, transcript) = session(&mut shop, "1\n6\n");

    assert!(transcript.contains("P1             Widget              9.99      10        \n"));
    assert!(transcript.contains("P2             Gadget              4.50      3         \n"));
}

#[test]
fn test_update_unknown_product_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "3\nP9\n1\n6\n");

    assert!(result.is_ok());
    assert!(transcript.contains("Product not found.\n"));
    assert_eq!(
        read(&dir, "inventory.csv"),
        format!("{INVENTORY_HEADER}P1,Widget,9.99,10\nP2,Gadget,4.50,3\n")
    );
}

#[test]
fn test_update_below_zero_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "3\nP2\n4\n6\n");

    assert!(result.is_ok());
    assert!(transcript.contains("Update rejected: Not enough stock for P2"));
    assert_eq!(shop.inventory().get_product_by_id("P2").unwrap().quantity, 3);
}

#[test]
fn test_negative_update_restocks() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (result, _) = session(&mut shop, "3\nP2\n-7\n6\n");

    assert!(result.is_ok());
    assert_eq!(open_shop(&dir).inventory().get_product_by_id("P2").unwrap().quantity, 10);
}

#[test]
fn test_non_numeric_price_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "2\nP1\nWidget\ncheap\n10\n6\n");

    let err = result.unwrap_err();
    assert!(matches!(err, ShopError::InvalidNumber { field: "price", .. }));
    assert!(transcript.ends_with("Enter product price: "));
    assert!(shop.inventory().is_empty());
    assert!(!dir.path().join("inventory.csv").exists());
}

#[test]
fn test_restock_past_quantity_limit_keeps_session_alive() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("inventory.csv"),
        format!("{INVENTORY_HEADER}P1,Widget,9.99,2147483647\n"),
    )
    .unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "3\nP1\n-1\n1\n6\n");

    assert!(result.is_ok());
    assert!(transcript.contains("Update rejected: Quantity for P1 cannot change by -1\n"));
    assert!(transcript.contains("Widget              9.99      2147483647"));
    assert_eq!(shop.inventory().get_product_by_id("P1").unwrap().quantity, i32::MAX);
}

// ============================================================================
// Sales
// ============================================================================

#[test]
fn test_multi_item_sale_and_report() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "4\nS2\nP1\n1\nP2\n2\nDone\n5\n6\n");

    assert!(result.is_ok());
    assert!(transcript.contains("Sale recorded with total price: 18.99\n"));
    assert!(transcript
        .contains("S2        P1             Widget              1              18.99     \n"));
    assert!(transcript
        .contains("S2        P2             Gadget              2              18.99     \n"));
    assert_eq!(
        read(&dir, "sales.csv"),
        format!("{SALES_HEADER}S2,P1,Widget,1,18.99\nS2,P2,Gadget,2,18.99\n")
    );

    // The log has no grouping, so each row reloads as its own sale
    let reloaded = open_shop(&dir);
    let sales = reloaded.sales_manager().sales();
    assert_eq!(sales.len(), 2);
    assert!(sales.iter().all(|sale| sale.sale_id() == "S2" && sale.line_items().len() == 1));
}

#[test]
fn test_unknown_product_in_sale_keeps_loop_going() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "4\nS3\nNOPE\n1\nP2\n3\ndone\n6\n");

    assert!(result.is_ok());
    assert!(transcript.contains("Not enough stock or invalid product ID.\n"));
    assert!(transcript.contains("Added 3 of Gadget to sale.\n"));
    assert!(transcript.contains("Sale recorded with total price: 13.50\n"));
    assert_eq!(shop.inventory().get_product_by_id("P2").unwrap().quantity, 0);
}

#[test]
fn test_empty_sale_is_recorded_with_zero_total() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let (result, transcript) = session(&mut shop, "4\nS0\ndone\n6\n");

    assert!(result.is_ok());
    assert!(transcript.contains("Sale recorded with total price: 0\n"));
    assert_eq!(read(&dir, "sales.csv"), SALES_HEADER);
}

#[test]
fn test_overflowing_sale_line_leaves_stock_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut shop = open_shop(&dir);

    let script = concat!(
        "2\nP1\nGold\n79228162514264337593543950335\n10\n",
        "4\nS1\nP1\n2\ndone\n6\n",
    );
    let (result, transcript) = session(&mut shop, script);

    assert!(result.is_ok());
    assert!(transcript.contains("Line rejected: Amount too large"));
    assert!(transcript.contains("Sale recorded with total price: 0\n"));
    assert_eq!(shop.inventory().get_product_by_id("P1").unwrap().quantity, 10);
    assert_eq!(
        read(&dir, "inventory.csv"),
        format!("{INVENTORY_HEADER}P1,Gold,79228162514264337593543950335,10\n")
    );
    assert_eq!(read(&dir, "sales.csv"), SALES_HEADER);
}

#[test]
fn test_store_with_spaced_header_and_float_prices_loads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("inventory.csv"),
        "product_id, product_name, price, quantity\nP1,Widget,9.99,10\nP2,Dust,1e-05,3\n",
    )
    .unwrap();

    let shop = open_shop(&dir);

    assert_eq!(shop.inventory().len(), 2);
    assert_eq!(shop.inventory().get_product_by_id("P1").unwrap().price, dec!(9.99));
    assert_eq!(shop.inventory().get_product_by_id("P2").unwrap().price, dec!(0.00001));
}

#[test]
fn test_input_closed_mid_sale_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    seed_widget(&dir);
    let mut shop = open_shop(&dir);

    let (result, _) = session(&mut shop, "4\nS5\nP1\n");

    assert!(matches!(result, Err(ShopError::InputClosed("quantity"))));
    assert!(!dir.path().join("sales.csv").exists());
}

#[test]
fn test_corrupt_sales_log_fails_startup() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("sales.csv"),
        format!("{SALES_HEADER}S1,P1,Widget,2,lots\n"),
    )
    .unwrap();

    let result = ShopSystem::new(&config_in(&dir));
    assert!(matches!(result, Err(ShopError::Csv(_))));
}
