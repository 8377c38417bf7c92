// Password hashing
//
// Users are looked up by (email, digest) equality, so the digest must be
// deterministic: same password and salt always give the same output.

use sha2::{Digest, Sha256};

use crate::auth::error::AuthError;

/// One-way password transform
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;
}

/// hex(SHA-256(password || salt)) with a process-wide fixed salt
#[derive(Debug, Clone)]
pub struct SaltedSha256Hasher {
    salt: String,
}

impl SaltedSha256Hasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }
}

impl PasswordHasher for SaltedSha256Hasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.salt.as_bytes());
        Ok(hex::encode(hasher.finalize()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_is_hex_sha256() {
        let hasher = SaltedSha256Hasher::new("salt");
        let digest = hasher.hash("secret1").unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(digest, "secret1");
    }

    #[test]
    fn test_salt_changes_digest() {
        let a = SaltedSha256Hasher::new("salt").hash("secret1").unwrap();
        let b = SaltedSha256Hasher::new("pepper").hash("secret1").unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn prop_hash_is_deterministic(password in ".{0,64}") {
            let hasher = SaltedSha256Hasher::new("salt");
            prop_assert_eq!(hasher.hash(&password)?, hasher.hash(&password)?);
        }

        #[test]
        fn prop_distinct_passwords_distinct_digests(a in "[a-z]{6,12}", b in "[a-z]{6,12}") {
            prop_assume!(a != b);
            let hasher = SaltedSha256Hasher::new("salt");
            prop_assert_ne!(hasher.hash(&a)?, hasher.hash(&b)?);
        }
    }
}
