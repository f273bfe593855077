//! Aggregated result of a verification run.

use serde::ser::Serializer;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use netboot_network::ProbeOutcome;
use netboot_types::{EndpointKind, MalformedIdentity, TargetId};
use netboot_utils::redact;

/// Up/down status of one endpoint, with the failure cause when down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EndpointStatus {
    pub up: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<ProbeOutcome>,
}

impl From<ProbeOutcome> for EndpointStatus {
    fn from(outcome: ProbeOutcome) -> Self {
        let up = outcome.is_up();
        Self {
            up,
            cause: (!up).then_some(outcome),
        }
    }
}

type EndpointKey = (TargetId, EndpointKind);

/// Pass/fail status for every probed endpoint of a deployment.
///
/// Content depends only on probe results, never on completion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    #[serde(serialize_with = "serialize_endpoints")]
    endpoints: BTreeMap<EndpointKey, EndpointStatus>,
    #[serde(serialize_with = "serialize_malformed")]
    malformed: BTreeMap<TargetId, MalformedIdentity>,
    all_up: bool,
}

impl HealthReport {
    pub fn new(
        endpoints: BTreeMap<EndpointKey, EndpointStatus>,
        malformed: BTreeMap<TargetId, MalformedIdentity>,
    ) -> Self {
        let all_up = malformed.is_empty() && endpoints.values().all(|s| s.up);
        Self {
            endpoints,
            malformed,
            all_up,
        }
    }

    /// True iff every probed endpoint is up and no target was malformed.
    pub fn all_up(&self) -> bool {
        self.all_up
    }

    pub fn status(&self, target: &TargetId, endpoint: EndpointKind) -> Option<EndpointStatus> {
        self.endpoints.get(&(target.clone(), endpoint)).copied()
    }

    pub fn is_up(&self, target: &TargetId, endpoint: EndpointKind) -> Option<bool> {
        self.status(target, endpoint).map(|s| s.up)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = (&TargetId, EndpointKind, EndpointStatus)> {
        self.endpoints
            .iter()
            .map(|((target, endpoint), status)| (target, *endpoint, *status))
    }

    /// Endpoints that were probed and found down.
    pub fn down(&self) -> Vec<(&TargetId, EndpointKind, EndpointStatus)> {
        self.endpoints().filter(|(_, _, s)| !s.up).collect()
    }

    /// Targets with at least one down endpoint.
    pub fn targets_down(&self) -> BTreeSet<&TargetId> {
        self.down().into_iter().map(|(target, _, _)| target).collect()
    }

    /// Targets skipped because their keys do not match their roles.
    pub fn malformed(&self) -> &BTreeMap<TargetId, MalformedIdentity> {
        &self.malformed
    }

    /// Number of probed endpoints.
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty() && self.malformed.is_empty()
    }

    /// One redacted line per endpoint and per malformed target.
    pub fn summary_lines(&self) -> Vec<String> {
        let endpoints = self.endpoints().map(|(target, endpoint, status)| match status.cause {
            None => format!("{target} {endpoint} up"),
            Some(cause) => format!("{target} {endpoint} down ({cause})"),
        });
        let malformed = self
            .malformed
            .iter()
            .map(|(target, reason)| format!("{target} malformed: {reason}"));
        endpoints.chain(malformed).map(|line| redact(&line)).collect()
    }
}

#[derive(Serialize)]
struct EndpointEntry<'a> {
    target: &'a TargetId,
    endpoint: EndpointKind,
    #[serde(flatten)]
    status: EndpointStatus,
}

#[derive(Serialize)]
struct MalformedEntry<'a> {
    target: &'a TargetId,
    reason: String,
}

fn serialize_endpoints<S: Serializer>(
    endpoints: &BTreeMap<EndpointKey, EndpointStatus>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(
        endpoints
            .iter()
            .map(|((target, endpoint), status)| EndpointEntry {
                target,
                endpoint: *endpoint,
                status: *status,
            }),
    )
}

fn serialize_malformed<S: Serializer>(
    malformed: &BTreeMap<TargetId, MalformedIdentity>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(malformed.iter().map(|(target, reason)| MalformedEntry {
        target,
        reason: redact(&reason.to_string()),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use netboot_types::{KeySlot, NodeRole};

    fn node(name: &str) -> TargetId {
        TargetId::Node(name.into())
    }

    fn sample() -> HealthReport {
        let mut endpoints = BTreeMap::new();
        endpoints.insert((node("peer-0"), EndpointKind::Ssl), ProbeOutcome::Up.into());
        endpoints.insert(
            (node("peer-0"), EndpointKind::Peer),
            ProbeOutcome::Refused.into(),
        );
        endpoints.insert((TargetId::Gateway(0), EndpointKind::Api), ProbeOutcome::Up.into());
        HealthReport::new(endpoints, BTreeMap::new())
    }

    #[test]
    fn one_down_endpoint_fails_the_report() {
        let report = sample();
        assert!(!report.all_up());
        assert_eq!(report.len(), 3);
        assert_eq!(report.is_up(&node("peer-0"), EndpointKind::Ssl), Some(true));
        assert_eq!(
            report.status(&node("peer-0"), EndpointKind::Peer),
            Some(EndpointStatus {
                up: false,
                cause: Some(ProbeOutcome::Refused)
            })
        );
        assert_eq!(report.is_up(&node("peer-0"), EndpointKind::Voting), None);
        assert_eq!(report.targets_down().len(), 1);
    }

    #[test]
    fn malformed_target_fails_the_report() {
        let mut endpoints = BTreeMap::new();
        endpoints.insert((node("api-0"), EndpointKind::Api), ProbeOutcome::Up.into());
        let mut malformed = BTreeMap::new();
        malformed.insert(
            node("voter"),
            MalformedIdentity::MissingKey {
                slot: KeySlot::Voting,
                role: NodeRole::Voting,
            },
        );
        let report = HealthReport::new(endpoints, malformed);
        assert!(!report.all_up());
        assert!(report.down().is_empty());
        assert_eq!(report.malformed().len(), 1);
    }

    #[test]
    fn empty_report_is_vacuously_up() {
        let report = HealthReport::new(BTreeMap::new(), BTreeMap::new());
        assert!(report.all_up());
        assert!(report.is_empty());
    }

    #[test]
    fn summary_lines_name_cause() {
        let lines = sample().summary_lines();
        assert!(lines.contains(&"peer-0 peer down (refused)".to_string()));
        assert!(lines.contains(&"gateway-0 api up".to_string()));
    }

    #[test]
    fn serializes_as_entry_list() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["allUp"], false);
        let entries = json["endpoints"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        let refused = entries
            .iter()
            .find(|e| e["cause"] == "refused")
            .expect("refused entry");
        assert_eq!(refused["endpoint"], "peer");
        assert_eq!(refused["up"], false);
    }
}
