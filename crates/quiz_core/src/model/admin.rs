//! Administrator account entity.
//!
//! # Invariants
//! - `password_hash` is the lowercase hex SHA-256 digest of the password.
//! - The hash is never serialized.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub type AdminId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
}

impl Admin {
    /// Hashes a plain-text password into its stored form.
    pub fn hash_password(password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }

    /// Checks a candidate password against the stored hash.
    ///
    /// Returns `false` when the hash was not loaded.
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| hash == Self::hash_password(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::Admin;

    #[test]
    fn hash_password_is_hex_sha256() {
        assert_eq!(
            Admin::hash_password("admin"),
            "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
        );
    }

    #[test]
    fn verify_password_matches_only_the_original() {
        let admin = Admin {
            id: 1,
            email: "admin@example.com".to_string(),
            password_hash: Some(Admin::hash_password("secret")),
        };
        assert!(admin.verify_password("secret"));
        assert!(!admin.verify_password("Secret"));

        let without_hash = Admin {
            password_hash: None,
            ..admin
        };
        assert!(!without_hash.verify_password("secret"));
    }

    #[test]
    fn serialization_omits_password_hash() {
        let admin = Admin {
            id: 7,
            email: "admin@example.com".to_string(),
            password_hash: Some(Admin::hash_password("secret")),
        };
        let json = serde_json::to_value(&admin).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "email": "admin@example.com"}));
    }
}
