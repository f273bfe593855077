//! The per-deployment identity aggregate.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::keys::ConfigAccount;
use crate::network::NetworkType;
use crate::node::NodeAccount;
use crate::ModelError;

/// Every identity generated for one deployment.
///
/// Written once by the generation step and only ever read afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addresses {
    pub network_type: NetworkType,
    #[serde(default)]
    pub nodes: Vec<NodeAccount>,
    /// REST gateway identities. Gateways hold no roles.
    #[serde(default)]
    pub gateways: Vec<ConfigAccount>,
    pub nemesis_generation_hash_seed: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nemesis_signer: Option<ConfigAccount>,
    #[serde(default)]
    pub mosaics: BTreeMap<String, Vec<ConfigAccount>>,
}

/// A health-check target within a deployment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "id")]
pub enum TargetId {
    Node(String),
    Gateway(usize),
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(name) => f.write_str(name),
            Self::Gateway(index) => write!(f, "gateway-{index}"),
        }
    }
}

impl Addresses {
    /// Reject deployments where two nodes share a name or friendly name, or
    /// a node takes a gateway's `gateway-<n>` identifier.
    pub fn check_names(&self) -> Result<(), ModelError> {
        let mut names = HashSet::new();
        let mut friendly = HashSet::new();
        for node in &self.nodes {
            if is_gateway_name(&node.name) {
                return Err(ModelError::ReservedName(node.name.clone()));
            }
            if !names.insert(node.name.as_str()) {
                return Err(ModelError::DuplicateName(node.name.clone()));
            }
            if !friendly.insert(node.friendly_name.as_str()) {
                return Err(ModelError::DuplicateFriendlyName(node.friendly_name.clone()));
            }
        }
        Ok(())
    }

    /// All targets in deployment order: nodes first, then gateways.
    pub fn targets(&self) -> Vec<TargetId> {
        self.nodes
            .iter()
            .map(|n| TargetId::Node(n.name.clone()))
            .chain((0..self.gateways.len()).map(TargetId::Gateway))
            .collect()
    }

    /// Every account in the deployment, including nemesis and mosaic owners.
    pub fn accounts(&self) -> impl Iterator<Item = &ConfigAccount> {
        let node_keys = self
            .nodes
            .iter()
            .flat_map(|n| [n.signing.as_ref(), n.vrf.as_ref(), n.voting.as_ref()])
            .flatten();
        node_keys
            .chain(self.gateways.iter())
            .chain(self.nemesis_signer.iter())
            .chain(self.mosaics.values().flatten())
    }
}

fn is_gateway_name(name: &str) -> bool {
    name.strip_prefix("gateway-")
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::CertificatePair;
    use crate::role::NodeRole;

    fn api_node(name: &str, friendly: &str) -> NodeAccount {
        NodeAccount {
            name: name.into(),
            friendly_name: friendly.into(),
            roles: [NodeRole::Api].into(),
            ssl: CertificatePair::new("p", "q"),
            signing: None,
            vrf: None,
            voting: None,
        }
    }

    fn gateway() -> ConfigAccount {
        ConfigAccount::new(CertificatePair::new("g", "h"), "TGATEWAY")
    }

    fn addresses(nodes: Vec<NodeAccount>) -> Addresses {
        Addresses {
            network_type: NetworkType::Testnet,
            nodes,
            gateways: vec![gateway(), gateway()],
            nemesis_generation_hash_seed: "57F7DA20".into(),
            nemesis_signer: None,
            mosaics: BTreeMap::new(),
        }
    }

    #[test]
    fn duplicate_names_rejected() {
        let a = addresses(vec![api_node("a", "A"), api_node("a", "B")]);
        assert!(matches!(a.check_names(), Err(ModelError::DuplicateName(n)) if n == "a"));

        let b = addresses(vec![api_node("a", "A"), api_node("b", "A")]);
        assert!(matches!(
            b.check_names(),
            Err(ModelError::DuplicateFriendlyName(n)) if n == "A"
        ));
    }

    #[test]
    fn gateway_identifiers_reserved() {
        for name in ["gateway-0", "gateway-17"] {
            let a = addresses(vec![api_node(name, "Gw")]);
            assert!(matches!(a.check_names(), Err(ModelError::ReservedName(n)) if n == name));
        }
        for name in ["gateway-", "gateway-x", "gateway-1a", "my-gateway-0"] {
            assert!(addresses(vec![api_node(name, "Gw")]).check_names().is_ok());
        }
    }

    #[test]
    fn targets_list_nodes_then_gateways() {
        let a = addresses(vec![api_node("api-0", "Api 0")]);
        let targets = a.targets();
        assert_eq!(
            targets,
            vec![
                TargetId::Node("api-0".into()),
                TargetId::Gateway(0),
                TargetId::Gateway(1)
            ]
        );
        assert_eq!(targets[2].to_string(), "gateway-1");
    }

    #[test]
    fn accounts_cover_gateways_and_mosaics() {
        let mut a = addresses(vec![api_node("a", "A")]);
        a.mosaics.insert("currency".into(), vec![gateway()]);
        a.nemesis_signer = Some(gateway());
        assert_eq!(a.accounts().count(), 4);
    }

    #[test]
    fn json_roundtrip_keeps_camel_case() {
        let a = addresses(vec![api_node("a", "A")]);
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["networkType"], 152);
        assert_eq!(json["nemesisGenerationHashSeed"], "57F7DA20");
        let back: Addresses = serde_json::from_value(json).unwrap();
        assert_eq!(back, a);
    }
}
