//! Timed TCP reachability probes.
//!
//! A probe resolves `host:port`, attempts a TCP handshake against each
//! resolved address in turn and reports whether one completed before the
//! timeout. Every failure collapses to `false`; [`ProbeOutcome`] keeps the
//! cause for diagnostics only. The stream is owned by the probe future, so
//! it is closed on every exit path, including when the future is dropped.

use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::net::{lookup_host, TcpStream};

use netboot_utils::redact;

/// Timeout applied when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Result of one probe, with the failure cause kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    Up,
    /// The host answered with an explicit refusal.
    Refused,
    TimedOut,
    /// Name resolution failed or produced no addresses.
    Unresolvable,
    /// Any other connect error (no route, reset, ...).
    Unreachable,
}

impl ProbeOutcome {
    pub fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Refused => "refused",
            Self::TimedOut => "timed out",
            Self::Unresolvable => "unresolvable",
            Self::Unreachable => "unreachable",
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can check whether `host:port` accepts connections.
///
/// Implementations must never block past `timeout` and must release any
/// resource they acquire when the returned future completes or is dropped.
pub trait Probe: Send + Sync + 'static {
    fn probe_outcome(
        &self,
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> impl Future<Output = ProbeOutcome> + Send;
}

/// The real probe: a TCP handshake through the tokio reactor.
#[derive(Clone, Copy, Debug, Default)]
pub struct TcpProbe;

impl Probe for TcpProbe {
    async fn probe_outcome(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
        probe_outcome(host, port, timeout).await
    }
}

/// Probe `host:port`, returning the cause on failure.
pub async fn probe_outcome(host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
    let outcome = bounded(timeout, connect(host, port)).await;
    tracing::trace!(host = %redact(host), port, %outcome, "probe finished");
    outcome
}

async fn bounded(timeout: Duration, attempt: impl Future<Output = ProbeOutcome>) -> ProbeOutcome {
    tokio::time::timeout(timeout, attempt)
        .await
        .unwrap_or(ProbeOutcome::TimedOut)
}

/// Probe `host:port`. `None` uses [`DEFAULT_TIMEOUT`].
pub async fn probe(host: &str, port: u16, timeout: Option<Duration>) -> bool {
    probe_outcome(host, port, timeout.unwrap_or(DEFAULT_TIMEOUT))
        .await
        .is_up()
}

async fn connect(host: &str, port: u16) -> ProbeOutcome {
    let addrs: Vec<_> = match lookup_host((host, port)).await {
        Ok(addrs) => addrs.collect(),
        Err(e) => {
            tracing::debug!(host = %redact(host), error = %e, "probe target did not resolve");
            return ProbeOutcome::Unresolvable;
        }
    };
    if addrs.is_empty() {
        return ProbeOutcome::Unresolvable;
    }

    let mut outcome = ProbeOutcome::Unreachable;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                drop(stream);
                return ProbeOutcome::Up;
            }
            Err(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                outcome = ProbeOutcome::Refused;
            }
            Err(e) => {
                tracing::debug!(%addr, error = %e, "probe connect failed");
            }
        }
    }
    outcome
}
