pub mod models;
pub mod price_calculator;
pub mod service;

pub use models::*;
pub use price_calculator::*;
pub use service::*;
