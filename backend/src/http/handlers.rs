//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer. Request bodies are taken as raw JSON and validated
//! explicitly, so a malformed body becomes a structured 400 instead of an
//! extractor rejection.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    Json,
};
use serde_json::Value;

use super::dto::{HealthResponse, PageQuery};
use super::error::AppError;
use super::router::planet_location;
use super::state::AppState;
use crate::db::services as db_services;
use crate::db::services::PatchOutcome;
use crate::models::{Moon, Planet};
use crate::{patch, validation};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let healthy = db_services::health_check(state.repository.as_ref()).await?;
    let planets = db_services::planet_count(state.repository.as_ref()).await?;

    Ok(Json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        planets,
    }))
}

// =============================================================================
// Reads
// =============================================================================

/// GET /api/v1/planets
///
/// Without `page`/`size` the whole catalog is returned; with either of them
/// the listing is paged.
pub async fn list_planets(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult<Vec<Planet>> {
    let Query(query) = query?;
    let planets = if query.is_empty() {
        db_services::list_planets(state.repository.as_ref()).await?
    } else {
        db_services::list_planets_paged(state.repository.as_ref(), query.page, query.size).await?
    };
    Ok(Json(planets))
}

/// GET /api/v1/planets/page,size
///
/// Always paged; defaults to page 1 of size 10.
pub async fn list_planets_paged(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> HandlerResult<Vec<Planet>> {
    let Query(query) = query?;
    let planets =
        db_services::list_planets_paged(state.repository.as_ref(), query.page, query.size).await?;
    Ok(Json(planets))
}

/// GET /api/v1/planets/{planet_name}
pub async fn get_planet(
    State(state): State<AppState>,
    Path(planet_name): Path<String>,
) -> HandlerResult<Planet> {
    let planet = db_services::get_planet_by_name(state.repository.as_ref(), &planet_name).await?;
    Ok(Json(planet))
}

/// GET /api/v1/planets/{planet_name}/{moon_name}
pub async fn get_moon(
    State(state): State<AppState>,
    Path((planet_name, moon_name)): Path<(String, String)>,
) -> HandlerResult<Moon> {
    let moon =
        db_services::get_moon(state.repository.as_ref(), &planet_name, &moon_name).await?;
    Ok(Json(moon))
}

// =============================================================================
// Writes
// =============================================================================

/// POST /api/v1/planets
///
/// Appends the planet as given and answers 201 with a `Location` header
/// pointing at the by-name lookup.
pub async fn create_planet(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<Planet>), AppError> {
    let Json(body) = payload?;
    let planet = validation::planet_from_value(&body).map_err(|report| {
        tracing::debug!("Rejected planet body: {}", report);
        AppError::from(report)
    })?;

    let created = db_services::add_planet(state.repository.as_ref(), planet).await?;
    let location = planet_location(&created.name);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/v1/planets/{id}
///
/// Replaces weather and moons only; id and name of the stored planet stay.
pub async fn update_planet(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let update = validation::planet_update_from_value(&body)?;

    db_services::update_planet(state.repository.as_ref(), id, update).await?;
    Ok(StatusCode::OK)
}

/// DELETE /api/v1/planets/{planet_name}
pub async fn delete_planet(
    State(state): State<AppState>,
    Path(planet_name): Path<String>,
) -> Result<StatusCode, AppError> {
    db_services::delete_planet(state.repository.as_ref(), &planet_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/planets/{id}
///
/// An unknown id answers 204 rather than 404.
pub async fn patch_planet(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(body) = payload?;
    let ops = patch::parse_document(&body)?;

    match db_services::patch_planet(state.repository.as_ref(), id, &ops).await? {
        PatchOutcome::Applied(_) => Ok(StatusCode::OK),
        PatchOutcome::Missing => Ok(StatusCode::NO_CONTENT),
    }
}
