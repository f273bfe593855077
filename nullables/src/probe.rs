//! Nullable probe: scripted reachability without sockets.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use netboot_network::{Probe, ProbeOutcome};

/// One recorded probe invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeCall {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

/// A probe that answers from a script instead of the network.
///
/// Unscripted targets get the default outcome. An optional delay simulates
/// slow hosts: a probe whose delay reaches its timeout reports `TimedOut`
/// after sleeping exactly the timeout.
pub struct NullProbe {
    default: ProbeOutcome,
    scripted: HashMap<(String, u16), ProbeOutcome>,
    delay: Duration,
    calls: Mutex<Vec<ProbeCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl NullProbe {
    /// Every target answers `default`.
    pub fn new(default: ProbeOutcome) -> Self {
        Self {
            default,
            scripted: HashMap::new(),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn all_up() -> Self {
        Self::new(ProbeOutcome::Up)
    }

    pub fn all_refused() -> Self {
        Self::new(ProbeOutcome::Refused)
    }

    /// Script the outcome for one `host:port`.
    pub fn with(mut self, host: &str, port: u16, outcome: ProbeOutcome) -> Self {
        self.scripted.insert((host.to_string(), port), outcome);
        self
    }

    /// Make every probe take `delay` (capped by its timeout).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// All calls made so far, in call order.
    pub fn calls(&self) -> Vec<ProbeCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    /// Highest number of probes observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, host: &str, port: u16, timeout: Duration) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(ProbeCall {
                host: host.to_string(),
                port,
                timeout,
            });
        }
    }
}

impl Probe for NullProbe {
    async fn probe_outcome(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
        self.record(host, port, timeout);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let outcome = if self.delay >= timeout {
            tokio::time::sleep(timeout).await;
            ProbeOutcome::TimedOut
        } else {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.scripted
                .get(&(host.to_string(), port))
                .copied()
                .unwrap_or(self.default)
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_outcome_overrides_default() {
        let probe = NullProbe::all_refused().with("api-0", 3000, ProbeOutcome::Up);
        let timeout = Duration::from_millis(100);

        assert_eq!(
            probe.probe_outcome("api-0", 3000, timeout).await,
            ProbeOutcome::Up
        );
        assert_eq!(
            probe.probe_outcome("api-0", 7900, timeout).await,
            ProbeOutcome::Refused
        );
        assert_eq!(probe.call_count(), 2);
        assert_eq!(probe.calls()[1].port, 7900);
    }

    #[tokio::test(start_paused = true)]
    async fn delay_past_timeout_times_out() {
        let probe = NullProbe::all_up().with_delay(Duration::from_secs(5));
        let outcome = probe
            .probe_outcome("slow", 1, Duration::from_millis(250))
            .await;
        assert_eq!(outcome, ProbeOutcome::TimedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn short_delay_still_answers() {
        let probe = NullProbe::all_up().with_delay(Duration::from_millis(10));
        let outcome = probe.probe_outcome("fast", 1, Duration::from_secs(1)).await;
        assert_eq!(outcome, ProbeOutcome::Up);
        assert_eq!(probe.max_in_flight(), 1);
    }
}
