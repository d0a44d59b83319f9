//! PBKDF2-HMAC-SHA256 password hashes
//!
//! Stored format: `pbkdf2_sha256$<iterations>$<salt>$<derived key hex>`. The
//! salt is random hex text and is fed to the KDF as its UTF-8 bytes.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const ALGORITHM: &str = "pbkdf2_sha256";
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

pub fn hash_password(password: &str, iterations: u32) -> String {
    let salt: [u8; SALT_LEN] = rand::random();
    let salt = hex::encode(salt);
    let key = derive(password, &salt, iterations);
    format!("{ALGORITHM}${iterations}${salt}${}", hex::encode(key))
}

/// Check `password` against a stored hash. Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(algorithm), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if algorithm != ALGORITHM {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    if iterations == 0 {
        return false;
    }
    let Ok(expected) = hex::decode(expected) else {
        return false;
    };
    let actual = derive(password, salt, iterations);
    actual.as_slice().ct_eq(expected.as_slice()).into()
}

fn derive(password: &str, salt: &str, iterations: u32) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations.max(1), &mut key);
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_rejects_wrong_password() {
        let stored = hash_password("s3cret", 100);
        assert!(stored.starts_with("pbkdf2_sha256$100$"));
        assert!(verify_password("s3cret", &stored));
        assert!(!verify_password("S3cret", &stored));
    }

    #[test]
    fn hashes_are_salted() {
        assert_ne!(hash_password("same", 10), hash_password("same", 10));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "md5$1$aa$bb"));
        assert!(!verify_password("x", "pbkdf2_sha256$notanumber$aa$bb"));
        assert!(!verify_password("x", "pbkdf2_sha256$1$aa$bb$extra"));
        assert!(!verify_password("x", "pbkdf2_sha256$1$aa$not-hex"));
        assert!(!verify_password("x", "pbkdf2_sha256$0$aa$bb"));
    }

    #[test]
    fn matches_rfc_7914_vector() {
        // PBKDF2-HMAC-SHA256 (P="passwd", S="salt", c=1), first 32 bytes
        let stored = "pbkdf2_sha256$1$salt$55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc";
        assert!(verify_password("passwd", stored));
        assert!(!verify_password("passwd2", stored));
    }
}
