//! User routes under `/api/user`.
//!
//! No user endpoint is implemented yet; the index route answers through the
//! error stage so callers get a well-formed envelope instead of a hung request.

use axum::{extract::State, routing::get, Router};

use crate::envelope::{HandlerError, HandlerResult};
use crate::http::context::CorrelationContext;
use crate::http::server::AppState;

const MODULE: &str = "routes::user";

/// `/api/user` with and without the trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/user", get(index))
        .route("/api/user/", get(index))
}

/// `GET /api/user`
async fn index(State(state): State<AppState>, ctx: CorrelationContext) -> HandlerResult {
    state.logger.debug("User index requested", MODULE, Some(ctx.request_id()), None);
    Err(HandlerError::unexpected("handler not implemented"))
}
