//! Loading persisted deployment identities.
//!
//! The addresses file is written by the generation step; it is parsed and
//! structurally checked once here, then only read.

use std::path::Path;

use netboot_types::Addresses;

use crate::HealthError;

/// Parse and check an addresses document.
pub fn addresses_from_json_str(s: &str) -> Result<Addresses, HealthError> {
    let addresses: Addresses = serde_json::from_str(s)?;
    addresses.check_names()?;
    tracing::debug!(
        network = %addresses.network_type,
        nodes = addresses.nodes.len(),
        gateways = addresses.gateways.len(),
        "loaded addresses"
    );
    Ok(addresses)
}

/// Read, parse and check an addresses file.
pub fn load_addresses(path: impl AsRef<Path>) -> Result<Addresses, HealthError> {
    let content = std::fs::read_to_string(path)?;
    addresses_from_json_str(&content)
}
