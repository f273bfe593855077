//! Fleet health verification for netboot deployments.
//!
//! The verifier:
//! - Derives the endpoints each node must expose from its roles
//! - Probes every endpoint concurrently under one timeout and a concurrency cap
//! - Reports malformed identities instead of probing them
//! - Redacts every diagnostic before it reaches a log or a summary

pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod report;
pub mod shutdown;
pub mod targets;
pub mod tracing_spans;
pub mod verifier;

pub use config::{HealthConfig, DEFAULT_MAX_IN_FLIGHT};
pub use error::HealthError;
pub use loader::{addresses_from_json_str, load_addresses};
pub use metrics::HealthMetrics;
pub use report::{EndpointStatus, HealthReport};
pub use shutdown::{ShutdownController, ShutdownSignal};
pub use targets::{HostMap, PortMap};
pub use verifier::{verify, Check, HealthVerifier, Plan};
