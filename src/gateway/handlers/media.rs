//! Audio streaming handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::gateway::state::AppState;
use crate::media::with_default_extension;

const DEFAULT_TRACK: &str = "track1";

/// `?track=` lookup; extension defaults to `.mp3`
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrackQuery {
    /// Track name, `track1` when omitted
    pub track: Option<String>,
}

/// Stream an audio file
///
/// GET /music/{track_name}
#[utoipa::path(
    get,
    path = "/music/{track_name}",
    params(("track_name" = String, Path, description = "File name under the media root")),
    responses(
        (status = 200, description = "Audio bytes", content_type = "audio/mpeg"),
        (status = 404, description = "Track not found")
    ),
    tag = "Media"
)]
pub async fn stream_track(
    State(state): State<Arc<AppState>>,
    track_name: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // Undecodable names cannot exist under the media root
    let Path(track_name) = track_name.map_err(|e| {
        tracing::debug!("Rejected track path: {}", e.body_text());
        ApiError::NotFound("track not found".to_string())
    })?;
    stream(&state, &track_name).await
}

/// Stream an audio file by query
///
/// GET /music?track=track1
#[utoipa::path(
    get,
    path = "/music",
    params(TrackQuery),
    responses(
        (status = 200, description = "Audio bytes", content_type = "audio/mpeg"),
        (status = 404, description = "Track not found")
    ),
    tag = "Media"
)]
pub async fn stream_track_query(
    State(state): State<Arc<AppState>>,
    query: Result<Query<TrackQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let track = query.track.as_deref().unwrap_or(DEFAULT_TRACK);
    stream(&state, &with_default_extension(track)).await
}

async fn stream(state: &AppState, track_name: &str) -> Result<Response, ApiError> {
    let track = state.media.open(track_name).await?;
    tracing::debug!(track = track_name, bytes = track.len, "Streaming track");

    let body = Body::from_stream(ReaderStream::new(track.file));
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(track.media_type)),
        (header::CONTENT_LENGTH, HeaderValue::from(track.len)),
    ];
    Ok((headers, body).into_response())
}
