use lazy_static::lazy_static;
use rand::{distributions::Alphanumeric, Rng};
use regex::Regex;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::auth::dto::Credentials;
use crate::auth::password::{hash_secret_blocking, verify_secret_blocking};
use crate::auth::repo_types::{PersonalAccessToken, User};
use crate::error::AppError;

pub const TOKEN_NAME: &str = "auth_token";
const TOKEN_SECRET_LEN: usize = 40;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Look the user up and check the password. Unknown emails and wrong
/// passwords are indistinguishable to the caller.
pub async fn attempt(db: &SqlitePool, creds: &Credentials) -> Result<User, AppError> {
    let Some(user) = User::find_by_email(db, &creds.email).await? else {
        warn!(email = %creds.email, "login unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_secret_blocking(creds.password.clone(), user.password_hash.clone()).await? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AppError::InvalidCredentials);
    }
    Ok(user)
}

/// Mint a bearer token for `user_id`. Only the hash of the secret is stored.
pub async fn issue_token(db: &SqlitePool, user_id: i64) -> anyhow::Result<String> {
    let secret: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_SECRET_LEN)
        .map(char::from)
        .collect();
    let hash = hash_secret_blocking(secret.clone()).await?;
    let id = PersonalAccessToken::create(db, user_id, TOKEN_NAME, &hash).await?;
    debug!(user_id, token_id = id, "token issued");
    Ok(format!("{id}|{secret}"))
}

/// Split `"{id}|{secret}"`.
pub fn parse_token(token: &str) -> Option<(i64, &str)> {
    let (id, secret) = token.split_once('|')?;
    let id = id.parse::<i64>().ok()?;
    if secret.is_empty() {
        return None;
    }
    Some((id, secret))
}

/// Secrets are minted as exactly [`TOKEN_SECRET_LEN`] ASCII alphanumerics;
/// anything else is rejected before it reaches the database or argon2.
fn is_token_secret_shape(secret: &str) -> bool {
    secret.len() == TOKEN_SECRET_LEN && secret.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// The user owning `token`, or `None` when the token is malformed, unknown
/// or does not match its stored hash.
pub async fn resolve_token(db: &SqlitePool, token: &str) -> anyhow::Result<Option<User>> {
    let Some((id, secret)) = parse_token(token) else {
        return Ok(None);
    };
    if !is_token_secret_shape(secret) {
        return Ok(None);
    }
    let Some(stored) = PersonalAccessToken::find(db, id).await? else {
        return Ok(None);
    };
    if !verify_secret_blocking(secret.to_string(), stored.token_hash).await? {
        return Ok(None);
    }
    PersonalAccessToken::touch(db, stored.id).await?;
    User::find_by_id(db, stored.user_id).await
}
