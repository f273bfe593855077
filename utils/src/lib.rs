//! Shared utilities for netboot: secret redaction and logging setup.

pub mod logging;
pub mod redact;

pub use logging::{init_logging, LogFormat, RedactingMakeWriter, RedactingWriter};
pub use redact::{redact, Redactor, PLACEHOLDER};
