use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use tracing::{debug, instrument};

use crate::{
    error::AppError,
    products::{dto::SearchFilters, repo_types::Product},
    response::escaped_json,
    state::AppState,
};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products/search", get(search_products))
        .route("/products/:id", get(show_product))
}

/// An id that is not an integer, or not even valid UTF-8, cannot name a
/// product, so it is a 404 like any miss.
#[instrument(skip_all)]
pub async fn show_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = id.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "unreadable product id");
        AppError::ProductNotFound
    })?;
    let id = id.parse::<i64>().map_err(|_| AppError::ProductNotFound)?;
    let product = Product::find(&state.db, id)
        .await?
        .ok_or(AppError::ProductNotFound)?;
    Ok(escaped_json(StatusCode::OK, &product))
}

#[instrument(skip_all)]
pub async fn search_products(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(pairs) = query?;
    let filters = SearchFilters::from_pairs(pairs);
    debug!(?filters, "product search filters");
    let products = Product::search(&state.db, &filters).await?;
    debug!(count = products.len(), "product search");
    Ok(escaped_json(StatusCode::OK, &products))
}
