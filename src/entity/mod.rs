pub mod categories;
pub mod products;
pub mod profiles;
pub mod supermarkets;

pub use categories::Entity as Categories;
pub use products::Entity as Products;
pub use profiles::Entity as Profiles;
pub use supermarkets::Entity as Supermarkets;
