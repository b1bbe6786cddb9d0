//! Handlers for facilities and their assignment to rooms.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hotel_core::error::CoreError;
use hotel_core::facility::{
    dedupe_facility_ids, normalize_facility_name, DUPLICATE_FACILITY_MESSAGE,
};
use hotel_core::types::DbId;
use hotel_db::models::facility::{AssignFacilities, Facility, RoomFacility, SaveFacility};
use hotel_db::repositories::{FacilityRepo, RoomFacilityRepo, RoomRepo};

use crate::error::{is_foreign_key_violation, is_unique_violation, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

const UQ_FACILITY_NAME: &str = "uq_facilities_name";

fn facility_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Facility", id })
}

/// Turn a name collision into the message the back office shows.
fn map_duplicate_name(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err, UQ_FACILITY_NAME) {
        AppError::Core(CoreError::Conflict(DUPLICATE_FACILITY_MESSAGE.into()))
    } else {
        AppError::Database(err)
    }
}

/// GET /api/v1/facilities
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Facility>>>> {
    let facilities = FacilityRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(facilities)))
}

/// POST /api/v1/admin/facilities
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<SaveFacility>,
) -> AppResult<(StatusCode, Json<DataResponse<Facility>>)> {
    let name = normalize_facility_name(&input.name)?;
    let facility = FacilityRepo::create(&state.pool, &name)
        .await
        .map_err(map_duplicate_name)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(facility))))
}

/// PUT /api/v1/admin/facilities/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveFacility>,
) -> AppResult<Json<DataResponse<Facility>>> {
    let name = normalize_facility_name(&input.name)?;
    let facility = FacilityRepo::rename(&state.pool, id, &name)
        .await
        .map_err(map_duplicate_name)?
        .ok_or_else(|| facility_not_found(id))?;
    Ok(Json(DataResponse::new(facility)))
}

/// DELETE /api/v1/admin/facilities/{id}
///
/// Room associations go with it.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if FacilityRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(facility_not_found(id))
    }
}

/// GET /api/v1/admin/room-facilities
pub async fn list_assignments(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RoomFacility>>>> {
    let pairs = RoomFacilityRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(pairs)))
}

/// GET /api/v1/rooms/{id}/facilities
pub async fn list_for_room(
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Facility>>>> {
    ensure_room(&state, room_id).await?;
    let facilities = RoomFacilityRepo::list_for_room(&state.pool, room_id).await?;
    Ok(Json(DataResponse::new(facilities)))
}

/// PUT /api/v1/admin/rooms/{id}/facilities
///
/// Replaces the room's whole facility set. An unknown facility id rejects
/// the request and leaves the previous set in place.
pub async fn assign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Json(input): Json<AssignFacilities>,
) -> AppResult<Json<DataResponse<Vec<Facility>>>> {
    ensure_room(&state, room_id).await?;
    let ids = dedupe_facility_ids(&input.facility_ids);

    let facilities = RoomFacilityRepo::replace_for_room(&state.pool, room_id, &ids)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::Core(CoreError::Validation(
                    "facility_ids contains an unknown facility".into(),
                ))
            } else {
                AppError::Database(e)
            }
        })?;

    tracing::info!(
        room_id,
        user_id = admin.user_id,
        count = facilities.len(),
        "Room facilities replaced"
    );
    Ok(Json(DataResponse::new(facilities)))
}

async fn ensure_room(state: &AppState, room_id: DbId) -> AppResult<()> {
    RoomRepo::find_by_id(&state.pool, room_id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }))
}
