pub mod approval;
pub mod pool;
pub mod supply;
pub mod swap;

pub use approval::{approve_base_units, approve_token, build_approval};
pub use pool::resolve_pool;
pub use supply::{build_deposit, supply_to_pool};
pub use swap::{build_swap, build_swap_params, execute_swap};
