//! Per-node identity and the role-derived key/endpoint rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::keys::{CertificatePair, ConfigAccount};
use crate::role::{EndpointKind, KeySlot, NodeRole};
use crate::MalformedIdentity;

/// Identity of one network node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeAccount {
    pub name: String,
    pub friendly_name: String,
    pub roles: BTreeSet<NodeRole>,
    /// Transport identity, always present.
    pub ssl: CertificatePair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing: Option<ConfigAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vrf: Option<ConfigAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting: Option<ConfigAccount>,
}

/// Outcome of checking a node's keys against its roles.
#[derive(Debug)]
pub enum Identity<'a> {
    Valid(&'a NodeAccount),
    Malformed(&'a NodeAccount, MalformedIdentity),
}

impl NodeAccount {
    pub fn has_role(&self, role: NodeRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn key(&self, slot: KeySlot) -> Option<&ConfigAccount> {
        match slot {
            KeySlot::Signing => self.signing.as_ref(),
            KeySlot::Vrf => self.vrf.as_ref(),
            KeySlot::Voting => self.voting.as_ref(),
        }
    }

    /// The first role (in role order) that requires `slot`, if any.
    fn role_requiring(&self, slot: KeySlot) -> Option<NodeRole> {
        self.roles
            .iter()
            .copied()
            .find(|role| role.required_keys().contains(&slot))
    }

    /// Check that key presence matches exactly what the roles require.
    pub fn validate(&self) -> Result<(), MalformedIdentity> {
        if self.roles.is_empty() {
            return Err(MalformedIdentity::NoRoles);
        }
        for slot in KeySlot::ALL {
            match (self.role_requiring(slot), self.key(slot)) {
                (Some(role), None) => return Err(MalformedIdentity::MissingKey { slot, role }),
                (None, Some(_)) => return Err(MalformedIdentity::UnexpectedKey { slot }),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn classify(&self) -> Identity<'_> {
        match self.validate() {
            Ok(()) => Identity::Valid(self),
            Err(reason) => Identity::Malformed(self, reason),
        }
    }
}

/// Endpoints `node` must expose: `ssl` always, plus one per role.
///
/// Fails if the node's keys do not match its roles.
pub fn required_endpoints(node: &NodeAccount) -> Result<BTreeSet<EndpointKind>, MalformedIdentity> {
    node.validate()?;
    let mut endpoints = BTreeSet::from([EndpointKind::Ssl]);
    endpoints.extend(node.roles.iter().map(NodeRole::endpoint));
    Ok(endpoints)
}
