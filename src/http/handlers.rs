//! Route handlers.
//!
//! The feed handler composes the pipeline stages and logs failures with the
//! series id; error-to-status mapping lives in `response.rs`.

use std::time::Instant;

use axum::extract::{Path, State};

use crate::feed::{build_feed, JsonFeed};
use crate::http::response::FeedResponse;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::series::{decode_series, FeedError, FeedResult, SeriesId};

/// `GET /`
pub async fn usage(State(state): State<AppState>) -> String {
    format!(
        "Usage: /series/:id/jsonfeed\nContact: Please check {}",
        state.config.contact_url
    )
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}

/// `GET /series/{id}/jsonfeed`
pub async fn series_feed(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> FeedResult<FeedResponse> {
    let start_time = Instant::now();

    let result = build_series_feed(&state, &raw_id).await;
    match &result {
        Ok(feed) => {
            tracing::info!(series_id = %raw_id, items = feed.items.len(), "Served series feed");
            metrics::record_feed_request("ok", start_time);
        }
        Err(err) => {
            log_failure(&raw_id, err);
            metrics::record_feed_request(err.outcome(), start_time);
        }
    }

    result.map(FeedResponse)
}

async fn build_series_feed(state: &AppState, raw_id: &str) -> FeedResult<JsonFeed> {
    let id = SeriesId::parse(raw_id)?;
    let body = state.series.fetch_series(&id).await?;
    let page = decode_series(&body)?;
    Ok(build_feed(&id, page))
}

fn log_failure(raw_id: &str, err: &FeedError) {
    match err {
        FeedError::BadRequest(reason) => {
            tracing::debug!(series_id = %raw_id, reason, "Rejected series id");
        }
        FeedError::Upstream(e) => {
            tracing::error!(series_id = %raw_id, error = %e, "Upstream series request failed");
        }
        FeedError::Schema(e) => {
            tracing::error!(
                series_id = %raw_id,
                path = %e.path,
                error = %e.message,
                "Upstream series response failed schema validation"
            );
        }
    }
}
