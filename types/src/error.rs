//! Identity model errors.

use thiserror::Error;

use crate::role::{KeySlot, NodeRole};

/// A node account whose key material does not match its roles.
///
/// Reported per target; never aborts a whole verification run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedIdentity {
    #[error("node has no roles")]
    NoRoles,

    #[error("{slot} key is required by the {role} role but is missing")]
    MissingKey { slot: KeySlot, role: NodeRole },

    #[error("{slot} key is present but no role requires it")]
    UnexpectedKey { slot: KeySlot },
}

/// Structural problems in a deployment's identity data.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate node name: {0}")]
    DuplicateName(String),

    #[error("duplicate friendly name: {0}")]
    DuplicateFriendlyName(String),

    #[error("node name {0} is reserved for gateways")]
    ReservedName(String),

    #[error("unknown network type: {0}")]
    UnknownNetwork(u8),
}
