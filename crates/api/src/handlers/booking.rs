//! Guest booking submission, availability checks and admin status changes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use hotel_core::booking::{BookingRequest, BookingStatus, DateRange};
use hotel_core::error::CoreError;
use hotel_core::types::DbId;
use hotel_db::models::booking::{
    Booking, BookingConflict, BookingWithRoom, CreateBooking, UpdateBookingStatus,
};
use hotel_db::repositories::{BookingInsert, BookingRepo, RoomRepo, StatusChange};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{AvailabilityParams, BookingListParams};
use crate::response::DataResponse;
use crate::state::AppState;

const ALREADY_BOOKED: &str = "This room is already booked for the selected dates";

#[derive(Debug, Serialize)]
pub struct Availability {
    pub available: bool,
    pub conflict: Option<BookingConflict>,
}

fn booked_error(conflict: &BookingConflict) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "{ALREADY_BOOKED} (booked by {} from {} to {})",
        conflict.guest_name, conflict.check_in, conflict.check_out
    )))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms/{id}/availability?check_in=&check_out=
///
/// Read-only conflict check. A database failure surfaces as an error and is
/// never reported as "available".
pub async fn availability(
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Query(params): Query<AvailabilityParams>,
) -> AppResult<Json<DataResponse<Availability>>> {
    let range = DateRange::new(params.check_in, params.check_out)?;

    if RoomRepo::find_by_id(&state.pool, room_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }));
    }

    let conflict = BookingRepo::find_conflict(&state.pool, room_id, &range, None)
        .await
        .inspect_err(|e| tracing::error!(room_id, error = %e, "Conflict check failed"))?;

    Ok(Json(DataResponse::new(Availability {
        available: conflict.is_none(),
        conflict,
    })))
}

/// POST /api/v1/rooms/{id}/bookings
///
/// Validates the request against today's date, then checks for conflicts
/// and inserts the `pending` booking under the room lock.
pub async fn submit(
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Json(input): Json<BookingRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Booking>>)> {
    let (request, range) = input.validate_against(state.clock.today())?;

    let outcome = BookingRepo::create_checked(
        &state.pool,
        &CreateBooking {
            room_id,
            guest_name: request.guest_name,
            email: request.email,
            phone: request.phone,
            check_in: range.check_in,
            check_out: range.check_out,
        },
    )
    .await?;

    match outcome {
        BookingInsert::Created(booking) => {
            tracing::info!(
                booking_id = booking.id,
                room_id,
                check_in = %booking.check_in,
                check_out = %booking.check_out,
                nights = range.nights(),
                "Booking submitted"
            );
            Ok((StatusCode::CREATED, Json(DataResponse::new(booking))))
        }
        BookingInsert::Conflict(conflict) => {
            tracing::info!(
                room_id,
                conflicting_booking = conflict.id,
                "Booking refused: dates taken"
            );
            Err(booked_error(&conflict))
        }
        BookingInsert::RoomNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        })),
    }
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/bookings?status=
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<BookingListParams>,
) -> AppResult<Json<DataResponse<Vec<BookingWithRoom>>>> {
    let status = match params.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(name) => Some(BookingStatus::from_name(name)?),
    };
    let bookings = BookingRepo::list_with_room(&state.pool, status).await?;
    Ok(Json(DataResponse::new(bookings)))
}

/// PATCH /api/v1/admin/bookings/{id}/status
///
/// Restoring a canceled booking re-checks its dates against the other
/// active bookings on the room.
pub async fn update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBookingStatus>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    let current = BookingStatus::from_name(&booking.status)
        .map_err(|e| AppError::InternalError(format!("Stored booking status: {e}")))?;
    let next = current.transition_to(input.status)?;

    let reactivates = current.reactivates(next);
    match BookingRepo::change_status(&state.pool, &booking, next, reactivates).await? {
        StatusChange::Updated(updated) => {
            tracing::info!(
                booking_id = id,
                from = %current,
                to = %next,
                user_id = admin.user_id,
                "Booking status changed"
            );
            Ok(Json(DataResponse::new(updated)))
        }
        StatusChange::Conflict(conflict) => Err(booked_error(&conflict)),
        StatusChange::Stale => Err(AppError::Core(CoreError::Conflict(
            "Booking was modified concurrently, reload and try again".into(),
        ))),
    }
}
