//! Cart and order rules that do not touch the database.

pub mod cart;
pub mod order;
pub mod status;

pub use status::OrderStatusTitle;
