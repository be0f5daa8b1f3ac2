use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use super::CredentialError;

/// Argon2id PHC string with a fresh random salt.
pub fn hash_password(plaintext: &str) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| CredentialError::Hashing(e.to_string()))
}

pub fn verify_password(plaintext: &str, hash: &str) -> (bool, String) {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => return (false, format!("stored password hash is malformed: {e}")),
    };

    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => (true, String::new()),
        Err(_) => (false, "password does not match".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("123456").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, "123456");

        let (ok, msg) = verify_password("123456", &hash);
        assert!(ok, "{msg}");

        let (ok, msg) = verify_password("1234567", &hash);
        assert!(!ok);
        assert_eq!(msg, "password does not match");
    }

    #[test]
    fn salts_differ() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let (ok, msg) = verify_password("123456", "not-a-hash");
        assert!(!ok);
        assert!(msg.contains("malformed"));
    }
}
