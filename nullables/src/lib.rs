//! Nullable infrastructure for deterministic testing.
//!
//! External dependencies are abstracted behind traits; this crate provides
//! test-friendly implementations that:
//! - Return scripted values
//! - Record how they were called
//! - Never touch the network
//!
//! Usage: hand a [`NullProbe`] to the health verifier in place of `TcpProbe`.

pub mod probe;

pub use probe::{NullProbe, ProbeCall};
