use shop_ledger::{Config, ShopResult, ShopSystem};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Logs go to stderr so they stay out of the menu transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env();
    tracing::info!(
        "Shop ledger starting with {} and {}",
        config.inventory_path.display(),
        config.sales_path.display()
    );

    if let Err(err) = run(&config) {
        err.log();
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> ShopResult<()> {
    let mut shop = ShopSystem::new(config)?;
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    shop.run(stdin.lock(), stdout.lock())
}
