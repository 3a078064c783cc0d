//! Legacy write-protection password hashing
//!
//! Implements the ECMA-376 documentProtection scheme: the password is
//! folded into a 16-bit/16-bit combined key through the fixed xor
//! matrices, rendered as a byte-reversed hex string, then salted and
//! spun through SHA-1 with the iteration counter appended in
//! little-endian order. The initial salt + key hash does not count
//! toward the spin count.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha1::{Digest, Sha1};

const MAX_PASSWORD_LENGTH: usize = 15;

const INITIAL_CODES: [u16; 15] = [
    0xE1F0, 0x1D0F, 0xCC9C, 0x84C0, 0x110C, 0x0E10, 0xF1CE, 0x313E, 0x1872, 0xE139, 0xD40F,
    0x84F9, 0x280C, 0xA96A, 0x4EC3,
];

const ENCRYPTION_MATRIX: [[u16; 7]; 15] = [
    [0xAEFC, 0x4DD9, 0x9BB2, 0x2745, 0x4E8A, 0x9D14, 0x2A09],
    [0x7B61, 0xF6C2, 0xFDA5, 0xEB6B, 0xC6F7, 0x9DCF, 0x2BBF],
    [0x4563, 0x8AC6, 0x05AD, 0x0B5A, 0x16B4, 0x2D68, 0x5AD0],
    [0x0375, 0x06EA, 0x0DD4, 0x1BA8, 0x3750, 0x6EA0, 0xDD40],
    [0xD849, 0xA0B3, 0x5147, 0xA28E, 0x553D, 0xAA7A, 0x44D5],
    [0x6F45, 0xDE8A, 0xAD35, 0x4A4B, 0x9496, 0x390D, 0x721A],
    [0xEB23, 0xC667, 0x9CEF, 0x29FF, 0x53FE, 0xA7FC, 0x5FD9],
    [0x47D3, 0x8FA6, 0x0F6D, 0x1EDA, 0x3DB4, 0x7B68, 0xF6D0],
    [0xB861, 0x60E3, 0xC1C6, 0x93AD, 0x377B, 0x6EF6, 0xDDEC],
    [0x45A0, 0x8B40, 0x06A1, 0x0D42, 0x1A84, 0x3508, 0x6A10],
    [0xAA51, 0x4483, 0x8906, 0x022D, 0x045A, 0x08B4, 0x1168],
    [0x76B4, 0xED68, 0xCAF1, 0x85C3, 0x1BA7, 0x374E, 0x6E9C],
    [0x3730, 0x6E60, 0xDCC0, 0xA9A1, 0x4363, 0x86C6, 0x1DC7],
    [0x3A51, 0x74A2, 0xE544, 0xCB09, 0x9F73, 0x3E92, 0x7D24],
    [0x4796, 0x8F2C, 0x1AA5, 0x354A, 0x6A94, 0xD528, 0xAA4C],
];

/// Hash a protection password. Returns the base64 hash value for the
/// `w:hash` attribute.
pub fn hash_password(password: &str, salt: &[u8], spin_count: u32) -> String {
    let bytes = password_bytes(password);
    let key = combined_key(&bytes);

    // byte-reversed uppercase hex of the key, as UTF-16LE
    let hex = format!("{:08X}", key);
    let reversed: String = [&hex[6..8], &hex[4..6], &hex[2..4], &hex[0..2]].concat();
    let mut key_bytes = Vec::with_capacity(reversed.len() * 2);
    for unit in reversed.encode_utf16() {
        key_bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let mut hasher = Sha1::new();
    hasher.update(salt);
    hasher.update(&key_bytes);
    let mut hash = hasher.finalize();

    for iteration in 0..spin_count {
        let mut hasher = Sha1::new();
        hasher.update(&hash);
        hasher.update(iteration.to_le_bytes());
        hash = hasher.finalize();
    }

    BASE64.encode(hash)
}

/// ANSI-ish bytes of the truncated password: the low byte of each code
/// point, or the high byte when the low byte is zero
fn password_bytes(password: &str) -> Vec<u8> {
    password
        .chars()
        .take(MAX_PASSWORD_LENGTH)
        .map(|c| {
            let code = c as u32;
            let low = (code & 0xFF) as u8;
            if low != 0 {
                low
            } else {
                ((code >> 8) & 0xFF) as u8
            }
        })
        .collect()
}

fn combined_key(bytes: &[u8]) -> u32 {
    if bytes.is_empty() {
        return 0;
    }
    let mut high = INITIAL_CODES[bytes.len() - 1];
    for (position, &byte) in bytes.iter().enumerate() {
        let row = &ENCRYPTION_MATRIX[MAX_PASSWORD_LENGTH - bytes.len() + position];
        for bit in 0..7 {
            if byte & (1 << bit) != 0 {
                high ^= row[bit];
            }
        }
    }

    let mut low: u16 = 0;
    for &byte in bytes.iter().rev() {
        low = (((low >> 14) & 0x0001) | ((low << 1) & 0x7FFF)) ^ u16::from(byte);
    }
    low = (((low >> 14) & 0x0001) | ((low << 1) & 0x7FFF)) ^ (bytes.len() as u16) ^ 0xCE4B;

    (u32::from(high) << 16) | u32::from(low)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALT: [u8; 16] = [
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E,
        0x0F, 0x10,
    ];

    #[test]
    fn test_hash_is_deterministic() {
        let first = hash_password("secret", &SALT, 100_000);
        let second = hash_password("secret", &SALT, 100_000);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hash_is_base64_of_sha1() {
        let hash = hash_password("secret", &SALT, 100_000);
        let raw = BASE64.decode(&hash).unwrap();
        assert_eq!(raw.len(), 20);
    }

    #[test]
    fn test_inputs_change_the_hash() {
        let base = hash_password("secret", &SALT, 100_000);
        assert_ne!(base, hash_password("Secret", &SALT, 100_000));
        assert_ne!(base, hash_password("secret", &[0u8; 16], 100_000));
        assert_ne!(base, hash_password("secret", &SALT, 50_000));
    }

    #[test]
    fn test_password_is_truncated() {
        let long = "abcdefghijklmnop";
        let truncated = &long[..15];
        assert_eq!(
            hash_password(long, &SALT, 1_000),
            hash_password(truncated, &SALT, 1_000)
        );
    }

    proptest::proptest! {
        #[test]
        fn any_password_hashes_to_sha1_output(password in ".{0,40}") {
            let hash = hash_password(&password, &SALT, 10);
            let raw = BASE64.decode(&hash).unwrap();
            proptest::prop_assert_eq!(raw.len(), 20);
        }
    }

    #[test]
    fn test_combined_key_shape() {
        // single-byte passwords start from the first initial code
        let key = combined_key(&[b'a']);
        assert_ne!(key, 0);
        assert_ne!(combined_key(&[b'a']), combined_key(&[b'b']));
        assert_eq!(combined_key(&[]), 0);
    }
}
