use axum::{
    extract::rejection::JsonRejection, http::StatusCode, response::Response, routing::post, Json,
    Router,
};
use tracing::{info, instrument};

use crate::{
    auth::extractors::AuthUser,
    comments::{
        dto::{CommentCreatedResponse, CommentRequest},
        services,
    },
    error::AppError,
    response::escaped_json,
    state::AppState,
};

pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/comments", post(store_comment))
}

/// `AuthUser` runs before the body is read, so an anonymous caller gets a
/// 401 whatever the payload looks like.
#[instrument(skip_all)]
pub async fn store_comment(
    AuthUser(user): AuthUser,
    payload: Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(payload) = payload?;
    let input = payload.validate()?;

    let comment = services::submit(Some(&user.name), input)?;
    info!(user_id = user.id, comment_id = %comment.id, "comment received");

    Ok(escaped_json(
        StatusCode::CREATED,
        &CommentCreatedResponse {
            message: "Comment received!",
            comment,
        },
    ))
}
