//! HTTP surface: `POST /generate-all-content` and a liveness probe.

mod handlers;
mod payload;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{extract::pdf::DocumentParser, yt::TranscriptFetcher, ContentGenerator, ContentProcessor};

pub use payload::RawInput;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn router<G, T, D>(processor: ContentProcessor<G, T, D>, max_upload_bytes: usize) -> Router
where
    G: ContentGenerator + 'static,
    T: TranscriptFetcher + Send + Sync + 'static,
    D: DocumentParser + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/generate-all-content",
            post(handlers::generate_all_content::<G, T, D>),
        )
        .route("/healthz", get(handlers::healthz))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(processor))
}
