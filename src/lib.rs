pub mod api;
pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::LoyaltyError;
pub use crate::core::services::LoyaltyService;

#[cfg(test)]
mod tests;
