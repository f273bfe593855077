//! Pre-built [`tracing::Span`] constructors for health verification.
//!
//! Consistent span names and field sets make it easy to filter a run's
//! probes out of a busy log stream.

use tracing::{debug_span, info_span, Span};

use netboot_types::{EndpointKind, TargetId};
use netboot_utils::redact;

/// Span covering one full verification run.
pub fn verify_span(checks: usize, malformed: usize) -> Span {
    info_span!("verify", checks = checks, malformed = malformed)
}

/// Span covering a single reachability probe. Names and hosts come from
/// deployment data and are redacted.
pub fn probe_span(target: &TargetId, endpoint: EndpointKind, host: &str, port: u16) -> Span {
    debug_span!(
        "probe",
        id = %redact(&target.to_string()),
        endpoint = %endpoint,
        host = %redact(host),
        port = port
    )
}
