//! Login backend: credential validation and token issuance

pub mod handlers;

pub use handlers::configure;
