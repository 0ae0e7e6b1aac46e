use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::repo_types::User;
use super::services::resolve_token;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the bearer token to its user, rejecting with 401 otherwise.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        else {
            warn!("missing Authorization header");
            return Err(AppError::Unauthenticated);
        };

        let Some(token) = bearer_token(header) else {
            warn!("invalid auth scheme");
            return Err(AppError::Unauthenticated);
        };

        match resolve_token(&state.db, token).await? {
            Some(user) => Ok(AuthUser(user)),
            None => {
                warn!("invalid bearer token");
                Err(AppError::Unauthenticated)
            }
        }
    }
}

/// `"Bearer <token>"`, scheme matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::bearer_token;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token("Bearer 1|abc"), Some("1|abc"));
        assert_eq!(bearer_token("bearer 1|abc"), Some("1|abc"));
        assert_eq!(bearer_token("BEARER  1|abc "), Some("1|abc"));
    }

    #[test]
    fn rejects_other_schemes() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer   "), None);
        assert_eq!(bearer_token(""), None);
    }
}
