pub mod addresses;
pub mod categories;
pub mod cities;
pub mod items;
pub mod order_items;
pub mod order_statuses;
pub mod orders;
pub mod product_sizes;
pub mod products;
pub mod users;
pub mod vendors;

pub use addresses::Entity as Addresses;
pub use categories::Entity as Categories;
pub use cities::Entity as Cities;
pub use items::Entity as Items;
pub use order_items::Entity as OrderItems;
pub use order_statuses::Entity as OrderStatuses;
pub use orders::Entity as Orders;
pub use product_sizes::Entity as ProductSizes;
pub use products::Entity as Products;
pub use users::Entity as Users;
pub use vendors::Entity as Vendors;
