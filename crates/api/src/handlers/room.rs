//! Handlers for rooms: public browsing and the admin back office.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use hotel_core::error::CoreError;
use hotel_core::media::{image_object_key, validate_image_file_name};
use hotel_core::room::{
    normalize_description, normalize_room_name, slider_max_price, validate_price, RoomFilter,
};
use hotel_core::types::DbId;
use hotel_db::models::room::{CreateRoom, Room, RoomWithFacilities, UpdateRoom};
use hotel_db::repositories::{RoomFacilityRepo, RoomRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::RoomListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Public room listing plus the upper bound for the client's price slider.
#[derive(Debug, Serialize)]
pub struct RoomListing {
    pub rooms: Vec<Room>,
    pub max_price: i32,
}

fn room_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Room", id })
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms?status=&min_price=&max_price=
///
/// Filters in memory over the newest-first list so the order is preserved.
/// `max_price` is computed over every room, not just the matches.
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<RoomListParams>,
) -> AppResult<Json<DataResponse<RoomListing>>> {
    let filter =
        RoomFilter::from_query(params.status.as_deref(), params.min_price, params.max_price)?;
    let rooms = RoomRepo::list(&state.pool).await?;
    let max_price = slider_max_price(&rooms);
    let rooms = filter.apply(rooms);
    Ok(Json(DataResponse::new(RoomListing { rooms, max_price })))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RoomWithFacilities>>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| room_not_found(id))?;
    let facilities = RoomFacilityRepo::list_for_room(&state.pool, id).await?;
    Ok(Json(DataResponse::new(RoomWithFacilities { room, facilities })))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/rooms
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    let rooms = RoomRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(rooms)))
}

/// POST /api/v1/admin/rooms
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<DataResponse<Room>>)> {
    input.name = normalize_room_name(&input.name)?;
    input.description = normalize_description(input.description.take());
    validate_price(input.price)?;

    let room = RoomRepo::create(&state.pool, &input).await?;
    tracing::info!(room_id = room.id, user_id = admin.user_id, "Room created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(room))))
}

/// PUT /api/v1/admin/rooms/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateRoom>,
) -> AppResult<Json<DataResponse<Room>>> {
    if let Some(name) = &input.name {
        input.name = Some(normalize_room_name(name)?);
    }
    if let Some(description) = input.description.take() {
        input.description = Some(normalize_description(description));
    }
    if let Some(price) = input.price {
        validate_price(price)?;
    }

    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| room_not_found(id))?;
    Ok(Json(DataResponse::new(room)))
}

/// DELETE /api/v1/admin/rooms/{id}
///
/// Rooms that still have bookings are refused by the foreign key (409).
/// The stored image is removed after the row; failure to remove it is only
/// logged.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| room_not_found(id))?;

    if !RoomRepo::delete(&state.pool, id).await? {
        return Err(room_not_found(id));
    }
    tracing::info!(room_id = id, user_id = admin.user_id, "Room deleted");

    if let Some(url) = room.image_url.as_deref() {
        remove_image_best_effort(&state, url).await;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/rooms/{id}/image
///
/// Multipart form with a required `file` field. The previous image, if any,
/// is removed once the new URL is saved.
pub async fn upload_image(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<Room>>> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::BadRequest("The 'file' field needs a file name".into()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    validate_image_file_name(&file_name)?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let previous = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| room_not_found(id))?
        .image_url;

    let key = image_object_key(&file_name, Utc::now().timestamp_millis());
    state.images.put(&key, &data).await?;
    let url = state.images.public_url(&key);

    let Some(room) = RoomRepo::set_image_url(&state.pool, id, Some(&url)).await? else {
        // Room vanished between the lookup and the update.
        remove_image_best_effort(&state, &url).await;
        return Err(room_not_found(id));
    };
    tracing::info!(room_id = id, key = %key, size = data.len(), "Room image uploaded");

    if let Some(old) = previous.as_deref().filter(|old| *old != url) {
        remove_image_best_effort(&state, old).await;
    }
    Ok(Json(DataResponse::new(room)))
}

/// Remove the object behind a stored image URL, logging instead of failing.
async fn remove_image_best_effort(state: &AppState, url: &str) {
    let Some(key) = state.images.key_for_url(url) else {
        tracing::warn!(url, "Image URL is not managed by this store, leaving it");
        return;
    };
    if let Err(e) = state.images.remove(&key).await {
        tracing::warn!(key = %key, error = %e, "Failed to remove room image");
    }
}
