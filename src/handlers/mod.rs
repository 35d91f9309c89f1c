mod health;
mod metrics;
mod diagnose;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use diagnose::diagnose_handler;
