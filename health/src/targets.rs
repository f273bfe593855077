//! Where each target lives: ports per endpoint kind, hosts per target.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use netboot_types::{Addresses, EndpointKind, TargetId};

use crate::HealthError;

/// Concrete port for each endpoint kind in a deployment.
///
/// Kinds left unset are a configuration error as soon as some target needs
/// them; no default port is guessed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting: Option<u16>,
}

impl PortMap {
    pub fn get(&self, kind: EndpointKind) -> Option<u16> {
        match kind {
            EndpointKind::Ssl => self.ssl,
            EndpointKind::Peer => self.peer,
            EndpointKind::Api => self.api,
            EndpointKind::Voting => self.voting,
        }
    }

    pub fn set(&mut self, kind: EndpointKind, port: u16) {
        let slot = match kind {
            EndpointKind::Ssl => &mut self.ssl,
            EndpointKind::Peer => &mut self.peer,
            EndpointKind::Api => &mut self.api,
            EndpointKind::Voting => &mut self.voting,
        };
        *slot = Some(port);
    }

    pub fn with(mut self, kind: EndpointKind, port: u16) -> Self {
        self.set(kind, port);
        self
    }

    pub fn require(&self, kind: EndpointKind) -> Result<u16, HealthError> {
        self.get(kind).ok_or(HealthError::MissingPort(kind))
    }
}

/// Host or service alias per target, keyed by the target's display name
/// (`node name` or `gateway-<index>`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostMap(BTreeMap<String, String>);

impl HostMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every target reachable under its own name, the usual compose setup.
    pub fn from_names(addresses: &Addresses) -> Self {
        Self(
            addresses
                .targets()
                .into_iter()
                .map(|target| {
                    let name = target.to_string();
                    (name.clone(), name)
                })
                .collect(),
        )
    }

    /// Every target reachable on one host, e.g. `127.0.0.1`.
    pub fn uniform(addresses: &Addresses, host: &str) -> Self {
        Self(
            addresses
                .targets()
                .into_iter()
                .map(|target| (target.to_string(), host.to_string()))
                .collect(),
        )
    }

    pub fn insert(&mut self, target: impl Into<String>, host: impl Into<String>) {
        self.0.insert(target.into(), host.into());
    }

    pub fn get(&self, target: &TargetId) -> Option<&str> {
        self.0.get(&target.to_string()).map(String::as_str)
    }

    pub fn require(&self, target: &TargetId) -> Result<&str, HealthError> {
        self.get(target)
            .ok_or_else(|| HealthError::MissingHost(target.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
