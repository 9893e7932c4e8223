pub mod audit;
pub mod category;
pub mod transaction;
pub mod user;
