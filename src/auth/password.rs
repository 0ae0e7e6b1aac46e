use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use anyhow::Context;
use rand::rngs::OsRng;
use tracing::error;

/// Argon2 hash of a password or a token secret.
pub fn hash_secret(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_secret(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// [`hash_secret`] on the blocking pool; argon2 is too slow for a runtime worker.
pub async fn hash_secret_blocking(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_secret(&plain))
        .await
        .context("argon2 hash task")?
}

/// [`verify_secret`] on the blocking pool.
pub async fn verify_secret_blocking(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_secret(&plain, &hash))
        .await
        .context("argon2 verify task")?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_secret("password").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_secret("password", &hash).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let hash = hash_secret("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify_secret("wrong-password", &hash).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        let err = verify_secret("anything", "not-a-valid-hash").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn same_secret_gets_distinct_salts() {
        let a = hash_secret("same").unwrap();
        let b = hash_secret("same").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn blocking_variants_agree_with_sync_ones() {
        let hash = hash_secret_blocking("password".to_string()).await.unwrap();
        assert!(verify_secret("password", &hash).unwrap());
        assert!(verify_secret_blocking("password".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_secret_blocking("nope".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn blocking_verify_surfaces_malformed_hash() {
        let res = verify_secret_blocking("x".to_string(), "not-a-valid-hash".to_string()).await;
        assert!(res.is_err());
    }
}
