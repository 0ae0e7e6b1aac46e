use std::net::SocketAddr;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::state::AppState;
use crate::{auth, comments, products};

/// The complete, fixed route table.
///
/// | method | path                  | bearer token |
/// |--------|-----------------------|--------------|
/// | GET    | /api/products/search  | no           |
/// | GET    | /api/products/{id}    | no           |
/// | POST   | /api/comments         | yes          |
/// | GET    | /api/user             | yes          |
/// | POST   | /api/login            | no           |
///
/// Unknown paths get a JSON 404 and known paths with the wrong method a
/// JSON 405.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(products::router())
                .merge(comments::router())
                .merge(auth::router())
                .method_not_allowed_fallback(|| async { AppError::MethodNotAllowed }),
        )
        .fallback(|| async { AppError::RouteNotFound })
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, state: &AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", state.config.host, state.config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
