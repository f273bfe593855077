//! Identity model for netboot deployments.
//!
//! This crate defines the data every other crate in the workspace consumes:
//! key pairs and accounts, node roles and the endpoints they imply, network
//! types, and the per-deployment `Addresses` aggregate. Role-to-key rules are
//! checked here so that consumers only ever see `Valid` or `Malformed` nodes.

pub mod addresses;
pub mod error;
pub mod keys;
pub mod network;
pub mod node;
pub mod role;

pub use addresses::{Addresses, TargetId};
pub use error::{MalformedIdentity, ModelError};
pub use keys::{CertificatePair, ConfigAccount};
pub use network::NetworkType;
pub use node::{required_endpoints, Identity, NodeAccount};
pub use role::{EndpointKind, KeySlot, NodeRole};
