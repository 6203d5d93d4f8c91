//! Tests backend: in-memory scenarios, templates and execution history

pub mod handlers;
pub mod store;

pub use handlers::configure;
pub use store::{TestHistoryEntry, TestScenario, TestStore, TestTemplate};
