use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        extractors::AuthUser,
        services,
    },
    error::AppError,
    response::escaped_json,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user", get(current_user))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let creds = payload.validate()?;

    let user = services::attempt(&state.db, &creds).await?;
    let token = services::issue_token(&state.db, user.id).await?;

    info!(user_id = user.id, "user logged in");
    Ok(escaped_json(
        StatusCode::OK,
        &LoginResponse {
            message: "Login successful",
            token,
        },
    ))
}

#[instrument(skip_all)]
pub async fn current_user(AuthUser(user): AuthUser) -> Response {
    escaped_json(StatusCode::OK, &user)
}
