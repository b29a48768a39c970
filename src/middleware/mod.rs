pub mod auth;
pub mod guest;
pub mod vendor_gate;
