//! Node roles, the endpoints they expose, and the key slots they require.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A capability tag held by a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Peer,
    Api,
    Voting,
}

impl NodeRole {
    pub const ALL: [NodeRole; 3] = [Self::Peer, Self::Api, Self::Voting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Peer => "peer",
            Self::Api => "api",
            Self::Voting => "voting",
        }
    }

    /// The endpoint a node must expose because it holds this role.
    pub fn endpoint(&self) -> EndpointKind {
        match self {
            Self::Peer => EndpointKind::Peer,
            Self::Api => EndpointKind::Api,
            Self::Voting => EndpointKind::Voting,
        }
    }

    /// Key slots that must be filled for this role.
    pub fn required_keys(&self) -> &'static [KeySlot] {
        match self {
            Self::Peer => &[KeySlot::Signing, KeySlot::Vrf],
            Self::Api => &[],
            Self::Voting => &[KeySlot::Signing, KeySlot::Voting],
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A class of network-exposed service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    Ssl,
    Peer,
    Api,
    Voting,
}

impl EndpointKind {
    pub const ALL: [EndpointKind; 4] = [Self::Ssl, Self::Peer, Self::Api, Self::Voting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssl => "ssl",
            Self::Peer => "peer",
            Self::Api => "api",
            Self::Voting => "voting",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An optional key held by a node account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeySlot {
    Signing,
    Vrf,
    Voting,
}

impl KeySlot {
    pub const ALL: [KeySlot; 3] = [Self::Signing, Self::Vrf, Self::Voting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signing => "signing",
            Self::Vrf => "vrf",
            Self::Voting => "voting",
        }
    }
}

impl fmt::Display for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
