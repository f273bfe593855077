//! Fleet-wide reachability verification.
//!
//! A run first turns the deployment into a flat worklist of
//! `(target, endpoint, host, port)` checks. Every configuration problem is
//! found at this stage, before a single probe is dispatched. The checks
//! then run as independent tasks on a [`JoinSet`], capped by a semaphore,
//! and the report is assembled once every probe has settled. The whole run
//! shares one deadline, so a check still queued behind the cap when it
//! passes is reported as timed out.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time;
use tracing::Instrument;

use netboot_network::{Probe, ProbeOutcome, TcpProbe, DEFAULT_TIMEOUT};
use netboot_types::{
    required_endpoints, Addresses, EndpointKind, MalformedIdentity, TargetId,
};
use netboot_utils::redact;

use crate::config::{HealthConfig, DEFAULT_MAX_IN_FLIGHT};
use crate::metrics::HealthMetrics;
use crate::report::{EndpointStatus, HealthReport};
use crate::shutdown::ShutdownSignal;
use crate::targets::{HostMap, PortMap};
use crate::tracing_spans::{probe_span, verify_span};
use crate::HealthError;

/// One endpoint to probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Check {
    pub target: TargetId,
    pub endpoint: EndpointKind,
    pub host: String,
    pub port: u16,
}

/// The resolved worklist of a run.
#[derive(Clone, Debug, Default)]
pub struct Plan {
    pub checks: Vec<Check>,
    /// Nodes whose keys do not match their roles. None of their endpoints
    /// are probed.
    pub malformed: BTreeMap<TargetId, MalformedIdentity>,
}

/// Verifies that every endpoint a deployment should expose is reachable.
pub struct HealthVerifier<P: Probe = TcpProbe> {
    probe: Arc<P>,
    ports: PortMap,
    timeout: Duration,
    max_in_flight: usize,
    metrics: Option<Arc<HealthMetrics>>,
}

impl HealthVerifier<TcpProbe> {
    /// A verifier that probes over real TCP with the default timeout.
    pub fn new(ports: PortMap) -> Self {
        Self::with_probe(TcpProbe, ports)
    }

    pub fn from_config(config: &HealthConfig) -> Self {
        Self::new(config.ports.clone())
            .with_timeout(config.timeout())
            .with_max_in_flight(config.max_in_flight)
    }
}

impl<P: Probe> HealthVerifier<P> {
    pub fn with_probe(probe: P, ports: PortMap) -> Self {
        Self::with_shared_probe(Arc::new(probe), ports)
    }

    /// Use a probe the caller keeps a handle to.
    pub fn with_shared_probe(probe: Arc<P>, ports: PortMap) -> Self {
        Self {
            probe,
            ports,
            timeout: DEFAULT_TIMEOUT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            metrics: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cap on concurrently running probes. Zero is treated as one.
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.max_in_flight = max_in_flight.max(1);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<HealthMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    pub fn ports(&self) -> &PortMap {
        &self.ports
    }

    /// Build the worklist for `addresses`.
    ///
    /// Fails on duplicate or reserved node names, or when a required endpoint has no
    /// port or a probed target has no host.
    pub fn plan(&self, addresses: &Addresses, hosts: &HostMap) -> Result<Plan, HealthError> {
        addresses.check_names()?;
        let mut plan = Plan::default();

        for node in &addresses.nodes {
            let target = TargetId::Node(node.name.clone());
            let endpoints = match required_endpoints(node) {
                Ok(endpoints) => endpoints,
                Err(reason) => {
                    plan.malformed.insert(target, reason);
                    continue;
                }
            };
            let host = hosts.require(&target)?;
            for endpoint in endpoints {
                plan.checks.push(Check {
                    target: target.clone(),
                    endpoint,
                    host: host.to_string(),
                    port: self.ports.require(endpoint)?,
                });
            }
        }

        for index in 0..addresses.gateways.len() {
            let target = TargetId::Gateway(index);
            let host = hosts.require(&target)?;
            plan.checks.push(Check {
                host: host.to_string(),
                port: self.ports.require(EndpointKind::Api)?,
                target,
                endpoint: EndpointKind::Api,
            });
        }

        Ok(plan)
    }

    /// Probe every required endpoint of the deployment.
    ///
    /// Network failures never surface as errors; they are recorded in the
    /// report. Only configuration problems fail the call.
    pub async fn verify(
        &self,
        addresses: &Addresses,
        hosts: &HostMap,
    ) -> Result<HealthReport, HealthError> {
        let started = Instant::now();
        let plan = self.plan(addresses, hosts)?;
        let span = verify_span(plan.checks.len(), plan.malformed.len());
        let report = self.run(plan).instrument(span).await;

        if let Some(metrics) = &self.metrics {
            metrics.observe_report(&report, started.elapsed().as_secs_f64() * 1000.0);
        }
        Ok(report)
    }

    /// Like [`verify`](Self::verify), but gives up with
    /// [`HealthError::Cancelled`] as soon as `shutdown` fires. Outstanding
    /// probes are aborted and their sockets released.
    pub async fn verify_until_shutdown(
        &self,
        addresses: &Addresses,
        hosts: &HostMap,
        mut shutdown: ShutdownSignal,
    ) -> Result<HealthReport, HealthError> {
        if shutdown.is_fired() {
            return Err(HealthError::Cancelled);
        }
        tokio::select! {
            result = self.verify(addresses, hosts) => result,
            _ = shutdown.fired() => {
                tracing::info!("shutdown requested, abandoning outstanding probes");
                Err(HealthError::Cancelled)
            }
        }
    }

    async fn run(&self, plan: Plan) -> HealthReport {
        // Anything that never reports back counts as down.
        let mut endpoints: BTreeMap<(TargetId, EndpointKind), EndpointStatus> = plan
            .checks
            .iter()
            .map(|c| ((c.target.clone(), c.endpoint), ProbeOutcome::Unreachable.into()))
            .collect();

        // One deadline for the whole run: queueing for a permit counts
        // against the same timeout as the connection attempt.
        let deadline = time::Instant::now() + self.timeout;
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();
        for check in plan.checks {
            let probe = Arc::clone(&self.probe);
            let semaphore = Arc::clone(&semaphore);
            let span = probe_span(&check.target, check.endpoint, &check.host, check.port);
            tasks.spawn(
                async move {
                    let attempt = async {
                        let Ok(_permit) = semaphore.acquire_owned().await else {
                            return ProbeOutcome::Unreachable;
                        };
                        let remaining = deadline.saturating_duration_since(time::Instant::now());
                        probe.probe_outcome(&check.host, check.port, remaining).await
                    };
                    let outcome = time::timeout_at(deadline, attempt)
                        .await
                        .unwrap_or(ProbeOutcome::TimedOut);
                    (check.target, check.endpoint, outcome)
                }
                .instrument(span),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((target, endpoint, outcome)) => {
                    endpoints.insert((target, endpoint), outcome.into());
                }
                Err(e) => tracing::warn!(error = %e, "probe task failed"),
            }
        }

        let report = HealthReport::new(endpoints, plan.malformed);
        for (target, endpoint, status) in report.down() {
            let cause = status.cause.unwrap_or(ProbeOutcome::Unreachable);
            tracing::warn!(
                id = %redact(&target.to_string()),
                endpoint = %endpoint,
                cause = %cause,
                "endpoint down"
            );
        }
        for (target, reason) in report.malformed() {
            tracing::warn!(
                id = %redact(&target.to_string()),
                reason = %reason,
                "target skipped: malformed identity"
            );
        }
        tracing::info!(
            endpoints = report.len(),
            down = report.down().len(),
            malformed = report.malformed().len(),
            all_up = report.all_up(),
            "health verification finished"
        );
        report
    }
}

/// Probe `addresses` over TCP with explicit ports, hosts and timeout.
pub async fn verify(
    addresses: &Addresses,
    ports: &PortMap,
    hosts: &HostMap,
    timeout: Duration,
) -> Result<HealthReport, HealthError> {
    HealthVerifier::new(ports.clone())
        .with_timeout(timeout)
        .verify(addresses, hosts)
        .await
}
