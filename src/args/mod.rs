//! Command-line argument parsing and handling.

pub mod definition;
pub mod resolve;
pub mod utils;

// Re-export commonly used items
pub use definition::Args;
pub use resolve::handle_resolve;
pub use utils::determine_log_level;
