/**
 * Location Handlers
 *
 * HTTP handlers for the `/api/locations` resource. Every handler sits behind
 * `require_auth`; write operations additionally require the `ADMIN` role.
 *
 * All failures are returned as `FailureEvent` and answered by the
 * classification layer:
 *
 * - Bad paging parameters, unknown sort properties, malformed path or query
 *   values, unknown ids/codes and duplicate codes -> 400 (message verbatim)
 * - Body constraint violations -> 400 (`Validation failed: ...`)
 * - Missing role -> 403
 * - Database errors -> 500
 */

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};

use crate::backend::auth::Role;
use crate::backend::error::FailureEvent;
use crate::backend::extract::ValidatedJson;
use crate::backend::locations::db::{not_found, LocationStore};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::location::{Location, NewLocation};
use crate::shared::page::{Page, PageParams};

/// `GET /api/locations?page&size&sortBy&ascending`
pub async fn list_locations(
    State(state): State<AppState>,
    _user: AuthUser,
    query: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Location>>, FailureEvent> {
    let Query(params) = query?;
    let request = params.into_request(state.config.max_page_size)?;
    let page = state.locations.find_all(&request).await?;

    tracing::debug!(
        page = page.page,
        returned = page.content.len(),
        total = page.total_elements,
        "Listed locations"
    );
    Ok(Json(page))
}

/// `GET /api/locations/{id}`
pub async fn get_location(
    State(locations): State<LocationStore>,
    _user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Location>, FailureEvent> {
    let Path(id) = id?;
    locations
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// `GET /api/locations/code/{code}`
pub async fn get_location_by_code(
    State(locations): State<LocationStore>,
    _user: AuthUser,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<Location>, FailureEvent> {
    let Path(code) = code?;
    locations
        .find_by_location_code(&code)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(&code))
}

/// `POST /api/locations` (ADMIN)
pub async fn create_location(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(location): ValidatedJson<NewLocation>,
) -> Result<(StatusCode, Json<Location>), FailureEvent> {
    user.require(Role::Admin)?;
    let created = state.locations.insert(location).await?;

    tracing::info!(id = created.id, code = %created.location_code, "Location created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/locations/{id}` (ADMIN)
pub async fn update_location(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
    ValidatedJson(location): ValidatedJson<NewLocation>,
) -> Result<Json<Location>, FailureEvent> {
    user.require(Role::Admin)?;
    let Path(id) = id?;
    let updated = state.locations.update(id, location).await?;

    tracing::info!(id = updated.id, "Location updated");
    Ok(Json(updated))
}

/// `DELETE /api/locations/{id}` (ADMIN)
pub async fn delete_location(
    State(state): State<AppState>,
    user: AuthUser,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, FailureEvent> {
    user.require(Role::Admin)?;
    let Path(id) = id?;
    state.locations.delete(id).await?;

    tracing::info!(id, "Location deleted");
    Ok(StatusCode::NO_CONTENT)
}
