pub mod addresses;
pub mod auth;
pub mod cart;
pub mod cities;
pub mod orders;
pub mod products;
