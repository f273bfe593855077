//! Key material carried by node and gateway identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An asymmetric key pair, both halves hex encoded.
///
/// The pair is produced by the key-generation step; nothing here checks that
/// the two halves match (see `netboot_crypto::check_pair`). The private key
/// never appears in `Debug` output and is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePair {
    private_key: String,
    #[zeroize(skip)]
    pub public_key: String,
}

impl CertificatePair {
    pub fn new(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            public_key: public_key.into(),
        }
    }

    /// Raw access to the secret half. Callers must not log the result.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for CertificatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CertificatePair")
            .field("private_key", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// A key pair plus the address derived from its public half.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigAccount {
    #[serde(flatten)]
    pub pair: CertificatePair,
    pub address: String,
}

impl ConfigAccount {
    pub fn new(pair: CertificatePair, address: impl Into<String>) -> Self {
        Self {
            pair,
            address: address.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.pair.public_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroize_clears_only_the_private_half() {
        let mut pair = CertificatePair::new("9F9D35D4AA", "0011");
        pair.zeroize();
        assert!(pair.private_key().is_empty());
        assert_eq!(pair.public_key, "0011");
    }

    #[test]
    fn debug_never_shows_private_key() {
        let pair = CertificatePair::new("9F9D35D4AA", "0011");
        let account = ConfigAccount::new(pair, "TADDR");
        let debug = format!("{account:?}");
        assert!(!debug.contains("9F9D35D4AA"));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("0011"));
    }

    #[test]
    fn account_serializes_flat_camel_case() {
        let account = ConfigAccount::new(CertificatePair::new("AA", "BB"), "TADDR");
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["privateKey"], "AA");
        assert_eq!(json["publicKey"], "BB");
        assert_eq!(json["address"], "TADDR");
    }
}
