//! Dashboard backend: role-scoped menu catalog and search

pub mod catalog;
pub mod handlers;

pub use catalog::{menu_for, MenuItem};
pub use handlers::configure;
