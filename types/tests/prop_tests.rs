use proptest::prelude::*;
use std::collections::BTreeSet;

use netboot_types::{
    required_endpoints, CertificatePair, ConfigAccount, EndpointKind, KeySlot, NodeAccount,
    NodeRole,
};

fn account() -> ConfigAccount {
    ConfigAccount::new(CertificatePair::new("00", "11"), "TACCOUNT")
}

fn build(roles: BTreeSet<NodeRole>, signing: bool, vrf: bool, voting: bool) -> NodeAccount {
    NodeAccount {
        name: "n".into(),
        friendly_name: "N".into(),
        roles,
        ssl: CertificatePair::new("22", "33"),
        signing: signing.then(account),
        vrf: vrf.then(account),
        voting: voting.then(account),
    }
}

fn roles_strategy() -> impl Strategy<Value = BTreeSet<NodeRole>> {
    prop::collection::btree_set(prop::sample::select(NodeRole::ALL.to_vec()), 0..=3)
}

proptest! {
    /// A node is valid exactly when each key is present iff some role needs it.
    #[test]
    fn validity_matches_role_requirements(
        roles in roles_strategy(),
        signing in any::<bool>(),
        vrf in any::<bool>(),
        voting in any::<bool>(),
    ) {
        let node = build(roles.clone(), signing, vrf, voting);
        let needs = |slot: KeySlot| roles.iter().any(|r| r.required_keys().contains(&slot));
        let expected = !roles.is_empty()
            && signing == needs(KeySlot::Signing)
            && vrf == needs(KeySlot::Vrf)
            && voting == needs(KeySlot::Voting);
        prop_assert_eq!(node.validate().is_ok(), expected);
    }

    /// Valid nodes expose ssl plus one endpoint per role, nothing else.
    #[test]
    fn endpoints_are_ssl_plus_roles(roles in roles_strategy()) {
        prop_assume!(!roles.is_empty());
        let needs = |slot: KeySlot| roles.iter().any(|r| r.required_keys().contains(&slot));
        let node = build(
            roles.clone(),
            needs(KeySlot::Signing),
            needs(KeySlot::Vrf),
            needs(KeySlot::Voting),
        );
        let endpoints = required_endpoints(&node).unwrap();
        prop_assert!(endpoints.contains(&EndpointKind::Ssl));
        prop_assert_eq!(endpoints.len(), roles.len() + 1);
        for role in &roles {
            prop_assert!(endpoints.contains(&role.endpoint()));
        }
    }
}
