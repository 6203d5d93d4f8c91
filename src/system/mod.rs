//! System backend: host metrics, module registry and simulated control

pub mod handlers;
pub mod metrics;
pub mod registry;

pub use handlers::configure;
pub use metrics::MetricsSampler;
pub use registry::{ModuleRegistry, SystemModule};
