//! Reachability probing for netboot health checks.
//!
//! One probe is one timed TCP connection attempt. Probes never fail: every
//! error becomes a `false` result, with the cause available separately.

pub mod probe;

pub use probe::{probe, probe_outcome, Probe, ProbeOutcome, TcpProbe, DEFAULT_TIMEOUT};
