//! Network identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ModelError;

/// Identifies which network a deployment belongs to.
///
/// Persisted as its numeric identifier, which is also the leading byte of
/// every encoded address on that network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NetworkType {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
}

impl NetworkType {
    /// Numeric identifier of this network.
    pub fn id(&self) -> u8 {
        match self {
            Self::Mainnet => 104,
            Self::Testnet => 152,
        }
    }

    /// First character of every address on this network.
    pub fn address_prefix(&self) -> char {
        match self {
            Self::Mainnet => 'N',
            Self::Testnet => 'T',
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl TryFrom<u8> for NetworkType {
    type Error = ModelError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            104 => Ok(Self::Mainnet),
            152 => Ok(Self::Testnet),
            other => Err(ModelError::UnknownNetwork(other)),
        }
    }
}

impl From<NetworkType> for u8 {
    fn from(network: NetworkType) -> Self {
        network.id()
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
