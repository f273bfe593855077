//! Ed25519 key pairs in the hex encoding used by persisted identities.

use ed25519_dalek::{SigningKey, VerifyingKey};
use netboot_types::CertificatePair;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::CryptoError;

/// Generate a new key pair from a secure random source.
pub fn generate_pair() -> CertificatePair {
    pair_from_signing_key(&SigningKey::generate(&mut OsRng))
}

/// Derive a key pair from a 32-byte seed (deterministic).
pub fn pair_from_seed(seed: &[u8; 32]) -> CertificatePair {
    pair_from_signing_key(&SigningKey::from_bytes(seed))
}

fn pair_from_signing_key(signing_key: &SigningKey) -> CertificatePair {
    let private = Zeroizing::new(hex::encode_upper(signing_key.to_bytes()));
    let public = hex::encode_upper(signing_key.verifying_key().to_bytes());
    CertificatePair::new(private.as_str(), public)
}

fn decode_32(field: &'static str, encoded: &str) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let bytes = Zeroizing::new(
        hex::decode(encoded).map_err(|source| CryptoError::InvalidHex { field, source })?,
    );
    if bytes.len() != 32 {
        return Err(CryptoError::InvalidLength {
            field,
            expected: 32,
            actual: bytes.len(),
        });
    }
    let mut out = Zeroizing::new([0u8; 32]);
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Decode a hex public key into raw bytes, checking it is a curve point.
pub fn decode_public(public_hex: &str) -> Result<[u8; 32], CryptoError> {
    let bytes = *decode_32("public key", public_hex)?;
    VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
    Ok(bytes)
}

/// Derive the hex public key from a hex private key.
pub fn public_from_private(private_hex: &str) -> Result<String, CryptoError> {
    let secret = decode_32("private key", private_hex)?;
    let signing_key = SigningKey::from_bytes(&secret);
    Ok(hex::encode_upper(signing_key.verifying_key().to_bytes()))
}

/// Check that the two halves of `pair` belong together.
pub fn check_pair(pair: &CertificatePair) -> Result<(), CryptoError> {
    let derived = public_from_private(pair.private_key())?;
    if derived.eq_ignore_ascii_case(&pair.public_key) {
        Ok(())
    } else {
        Err(CryptoError::PairMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pair_checks_out() {
        let pair = generate_pair();
        assert_eq!(pair.public_key.len(), 64);
        assert_eq!(pair.private_key().len(), 64);
        check_pair(&pair).unwrap();
    }

    #[test]
    fn seed_is_deterministic() {
        let a = pair_from_seed(&[42u8; 32]);
        let b = pair_from_seed(&[42u8; 32]);
        assert_eq!(a, b);
        assert_ne!(a.public_key, pair_from_seed(&[43u8; 32]).public_key);
    }

    #[test]
    fn lowercase_public_key_accepted() {
        let pair = pair_from_seed(&[1u8; 32]);
        let lower = CertificatePair::new(pair.private_key(), pair.public_key.to_lowercase());
        check_pair(&lower).unwrap();
    }

    #[test]
    fn mismatched_pair_rejected() {
        let a = pair_from_seed(&[1u8; 32]);
        let b = pair_from_seed(&[2u8; 32]);
        let mixed = CertificatePair::new(a.private_key(), b.public_key.clone());
        assert!(matches!(check_pair(&mixed), Err(CryptoError::PairMismatch)));
    }

    #[test]
    fn bad_hex_and_length_rejected() {
        assert!(matches!(
            public_from_private("zz"),
            Err(CryptoError::InvalidHex { .. })
        ));
        assert!(matches!(
            public_from_private("00AA"),
            Err(CryptoError::InvalidLength { actual: 2, .. })
        ));
    }
}
