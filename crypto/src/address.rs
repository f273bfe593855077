//! Account address derivation from public keys.
//!
//! Address layout (24 bytes, then base32):
//! `network id (1) ‖ Blake2b-160(public key) (20) ‖ checksum (3)`
//!
//! Checksum: first 3 bytes of Blake2b-256 over the first 21 bytes.
//! Base32 alphabet: RFC 4648 upper case, no padding, 39 characters. The
//! network id fixes the first character (`N` on mainnet, `T` on testnet).

use ed25519_dalek::SigningKey;
use netboot_types::{ConfigAccount, NetworkType};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::{blake2b_160, blake2b_256, decode_public, pair_from_seed, CryptoError};

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[BASE32_ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

const DECODED_LEN: usize = 24;
const CHECKSUM_LEN: usize = 3;
/// Encoded length: ceil(24 * 8 / 5).
pub const ADDRESS_LEN: usize = 39;

fn encode_base32(bytes: &[u8]) -> String {
    let mut result = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }
    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    (pos == N).then_some(result)
}

fn address_bytes(public_key: &[u8; 32], network: NetworkType) -> [u8; DECODED_LEN] {
    let mut raw = [0u8; DECODED_LEN];
    raw[0] = network.id();
    raw[1..21].copy_from_slice(&blake2b_160(public_key));
    let checksum = blake2b_256(&raw[..21]);
    raw[21..].copy_from_slice(&checksum[..CHECKSUM_LEN]);
    raw
}

/// Derive the address of a hex-encoded public key on `network`.
pub fn derive_address(public_hex: &str, network: NetworkType) -> Result<String, CryptoError> {
    let public = decode_public(public_hex)?;
    Ok(encode_base32(&address_bytes(&public, network)))
}

/// Whether `address` is a well-formed address on `network`.
///
/// Checks length, alphabet, network byte and checksum; canonical encoding
/// is enforced by re-encoding the decoded bytes.
pub fn validate_address(address: &str, network: NetworkType) -> bool {
    if address.len() != ADDRESS_LEN {
        return false;
    }
    let Some(raw) = decode_base32_fixed::<DECODED_LEN>(address) else {
        return false;
    };
    if raw[0] != network.id() {
        return false;
    }
    let checksum = blake2b_256(&raw[..21]);
    raw[21..] == checksum[..CHECKSUM_LEN] && encode_base32(&raw) == address
}

/// Build an account from a deterministic seed.
pub fn account_from_seed(seed: &[u8; 32], network: NetworkType) -> ConfigAccount {
    let pair = pair_from_seed(seed);
    let public = SigningKey::from_bytes(seed).verifying_key().to_bytes();
    ConfigAccount::new(pair, encode_base32(&address_bytes(&public, network)))
}

/// Build a fresh random account.
pub fn generate_account(network: NetworkType) -> ConfigAccount {
    let mut seed = Zeroizing::new([0u8; 32]);
    OsRng.fill_bytes(&mut seed[..]);
    account_from_seed(&seed, network)
}

/// Check an account end to end: pair matches and address derives from it.
pub fn check_account(account: &ConfigAccount, network: NetworkType) -> Result<(), CryptoError> {
    crate::check_pair(&account.pair)?;
    if !validate_address(&account.address, network) {
        return Err(CryptoError::InvalidAddress(account.address.clone()));
    }
    let expected = derive_address(account.public_key(), network)?;
    if expected != account.address {
        return Err(CryptoError::AddressMismatch {
            address: account.address.clone(),
            expected,
        });
    }
    Ok(())
}
