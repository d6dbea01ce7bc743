use std::path::PathBuf;

/// Default location of the product store, relative to the working directory
pub const DEFAULT_INVENTORY_PATH: &str = "inventory.csv";
/// Default location of the sales log, relative to the working directory
pub const DEFAULT_SALES_PATH: &str = "sales.csv";

/// Runtime configuration
///
/// Read from the environment (after `.env` has been loaded by `main`):
/// - `SHOP_INVENTORY_PATH`: product store file
/// - `SHOP_SALES_PATH`: sales log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub inventory_path: PathBuf,
    pub sales_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            sales_path: PathBuf::from(DEFAULT_SALES_PATH),
        }
    }
}

impl Config {
    /// Build configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let inventory_path = lookup("SHOP_INVENTORY_PATH")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_INVENTORY_PATH.to_string());
        let sales_path = lookup("SHOP_SALES_PATH")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SALES_PATH.to_string());

        tracing::debug!(
            "Using inventory store {} and sales log {}",
            inventory_path,
            sales_path
        );

        Self {
            inventory_path: PathBuf::from(inventory_path),
            sales_path: PathBuf::from(sales_path),
        }
    }
}
