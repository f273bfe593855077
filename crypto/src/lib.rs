//! Key material helpers for netboot identities.
//!
//! - **Ed25519** key pairs, hex encoded the way identities are persisted
//! - **Blake2b** for the account identifier and address checksum
//! - Network-prefixed base32 addresses
//!
//! The health path never needs this crate; it exists for the generation step
//! and for deeper checks of persisted accounts.

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;

pub use address::{
    account_from_seed, check_account, derive_address, generate_account, validate_address,
    ADDRESS_LEN,
};
pub use error::CryptoError;
pub use hash::{blake2b_160, blake2b_256};
pub use keys::{check_pair, decode_public, generate_pair, pair_from_seed, public_from_private};
