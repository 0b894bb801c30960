pub mod chain;
pub mod config;
pub mod interfaces;
pub mod services;
pub mod utils;
pub mod workflow;
