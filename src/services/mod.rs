pub mod cart_service;
pub mod catalog_service;
pub mod profile_service;
pub mod store_service;
pub mod vendor_service;
