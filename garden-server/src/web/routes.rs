//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::ResolverError;
use crate::location::Location;
use crate::weather::{WateringDecision, WeatherSnapshot};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/location", get(get_location))
        .route("/api/weather", get(get_weather))
        .route("/api/watering", get(get_watering))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve the caller's location.
async fn get_location(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Location>, AppError> {
    Ok(Json(resolve_location(&state, &query).await?))
}

/// Resolve current weather at the caller's location.
async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<WeatherSnapshot>, AppError> {
    let location = resolve_location(&state, &query).await?;
    Ok(Json(resolve_weather(&state, &query, &location).await?))
}

/// Decide whether the garden needs watering.
///
/// The decision is evaluated from the snapshot returned alongside it.
async fn get_watering(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<WateringResponse>, AppError> {
    let location = resolve_location(&state, &query).await?;
    let weather = resolve_weather(&state, &query, &location).await?;
    let decision = WateringDecision::evaluate(&weather);

    Ok(Json(WateringResponse::new(decision, weather)))
}

async fn resolve_location(state: &AppState, query: &RefreshQuery) -> Result<Location, AppError> {
    let location = if query.forced() {
        state.location.fetch_location().await?
    } else {
        state.location.get_location().await?
    };
    Ok(location)
}

async fn resolve_weather(
    state: &AppState,
    query: &RefreshQuery,
    location: &Location,
) -> Result<WeatherSnapshot, AppError> {
    let weather = if query.forced() {
        state.weather.fetch_weather(location).await?
    } else {
        state.weather.get_weather(location).await?
    };
    Ok(weather)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// The request cannot be answered in the resolver's current state
    Conflict { message: String },
    /// An upstream provider failed
    BadGateway { message: String },
    /// Local state could not be read
    Internal { message: String },
}

impl From<ResolverError> for AppError {
    fn from(e: ResolverError) -> Self {
        match e {
            ResolverError::WeatherUnavailable => AppError::Conflict {
                message: e.to_string(),
            },
            ResolverError::LocationLookupFailed(_) | ResolverError::WeatherLookupFailed(_) => {
                AppError::BadGateway {
                    message: e.to_string(),
                }
            }
            ResolverError::Cache(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
