use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid hex in {field}: {source}")]
    InvalidHex {
        field: &'static str,
        #[source]
        source: hex::FromHexError,
    },

    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("public key does not belong to the private key")]
    PairMismatch,

    #[error("public key is not a valid ed25519 point")]
    InvalidPublicKey,

    #[error("address {0} is not valid for this network")]
    InvalidAddress(String),

    #[error("address {address} does not match public key, expected {expected}")]
    AddressMismatch { address: String, expected: String },
}
