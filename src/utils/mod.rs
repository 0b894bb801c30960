pub mod health_check;
pub mod logger;
pub mod units;

// Re-export commonly used items
pub use health_check::{log_health_check, perform_health_check};
pub use logger::Logger;
pub use units::{format_base_units, parse_amount, to_base_units};
