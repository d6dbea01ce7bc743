pub mod menu;
pub mod prompt;
pub mod system;

pub use menu::*;
pub use prompt::*;
pub use system::*;
