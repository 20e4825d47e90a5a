pub mod cache;
pub mod config;
pub mod handlers;
pub mod health;
pub mod middleware;
pub mod observability;
pub mod server;

pub use cache::{MembershipCache, RefreshStats};
pub use config::{AppConfig, FeedsConfig, LoggingConfig, ServerConfig};
pub use health::{CheckOutcome, HealthReporter, ReadinessStatus};
pub use observability::{init_tracing, apply_logging_level};
pub use server::{AppState, RosterServer, ServerBuilder, build_app, build_state};
