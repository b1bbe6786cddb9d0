//! Repository for the `bookings` table, including the conflict checker.
//!
//! Writes that can make a booking active (insert, restore) run inside a
//! transaction holding the room row lock, so the conflict check and the
//! write are atomic with respect to other writers on the same room. The
//! `excl_bookings_room_stay` exclusion constraint backs this up.

use hotel_core::booking::{BookingStatus, DateRange, ACTIVE_STATUSES};
use hotel_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::booking::{Booking, BookingConflict, BookingWithRoom, CreateBooking};
use crate::repositories::RoomRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, room_id, guest_name, email, phone, check_in, check_out, status, created_at, updated_at";

/// Outcome of [`BookingRepo::create_checked`].
#[derive(Debug)]
pub enum BookingInsert {
    Created(Booking),
    Conflict(BookingConflict),
    RoomNotFound,
}

/// Outcome of [`BookingRepo::change_status`].
#[derive(Debug)]
pub enum StatusChange {
    Updated(Booking),
    /// Reactivating the booking would overlap another active booking.
    Conflict(BookingConflict),
    /// The row no longer has the status the change was computed from.
    Stale,
}

/// Provides booking persistence and conflict detection.
pub struct BookingRepo;

fn active_status_names() -> Vec<&'static str> {
    ACTIVE_STATUSES.iter().map(|s| s.as_str()).collect()
}

impl BookingRepo {
    /// Find the first active booking on `room_id` overlapping `range`.
    ///
    /// Overlap is half-open: `stored.check_in < range.check_out AND
    /// stored.check_out > range.check_in`. Canceled bookings never match.
    /// `exclude_id` skips one booking (used when re-checking an existing row).
    pub async fn find_conflict<'e, E: PgExecutor<'e>>(
        executor: E,
        room_id: DbId,
        range: &DateRange,
        exclude_id: Option<DbId>,
    ) -> Result<Option<BookingConflict>, sqlx::Error> {
        sqlx::query_as::<_, BookingConflict>(
            "SELECT id, guest_name, check_in, check_out
             FROM bookings
             WHERE room_id = $1
               AND status = ANY($2)
               AND check_in < $4
               AND check_out > $3
               AND ($5::BIGINT IS NULL OR id <> $5)
             ORDER BY check_in, id
             LIMIT 1",
        )
        .bind(room_id)
        .bind(active_status_names())
        .bind(range.check_in)
        .bind(range.check_out)
        .bind(exclude_id)
        .fetch_optional(executor)
        .await
    }

    /// Check for conflicts and insert a `pending` booking in one transaction.
    pub async fn create_checked(
        pool: &PgPool,
        input: &CreateBooking,
    ) -> Result<BookingInsert, sqlx::Error> {
        let range = DateRange {
            check_in: input.check_in,
            check_out: input.check_out,
        };

        let mut tx = pool.begin().await?;

        if !RoomRepo::lock(&mut *tx, input.room_id).await? {
            return Ok(BookingInsert::RoomNotFound);
        }

        if let Some(conflict) = Self::find_conflict(&mut *tx, input.room_id, &range, None).await? {
            return Ok(BookingInsert::Conflict(conflict));
        }

        let query = format!(
            "INSERT INTO bookings (room_id, guest_name, email, phone, check_in, check_out, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(input.room_id)
            .bind(&input.guest_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.check_in)
            .bind(input.check_out)
            .bind(BookingStatus::Pending.as_str())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(BookingInsert::Created(booking))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings newest first with their room's name and price.
    ///
    /// `status: None` returns every booking.
    pub async fn list_with_room(
        pool: &PgPool,
        status: Option<BookingStatus>,
    ) -> Result<Vec<BookingWithRoom>, sqlx::Error> {
        sqlx::query_as::<_, BookingWithRoom>(
            "SELECT b.id, b.room_id, b.guest_name, b.email, b.phone, b.check_in, b.check_out,
                    b.status, b.created_at, b.updated_at,
                    r.name AS room_name, r.price AS room_price
             FROM bookings b
             JOIN rooms r ON r.id = b.room_id
             WHERE ($1::TEXT IS NULL OR b.status = $1)
             ORDER BY b.created_at DESC, b.id DESC",
        )
        .bind(status.map(BookingStatus::as_str))
        .fetch_all(pool)
        .await
    }

    /// Move `booking` from its current status to `next`.
    ///
    /// The caller validates the transition. When `recheck` is set the room is
    /// locked and the booking's dates are re-checked against other active
    /// bookings before the write. The update only applies if the row still
    /// carries the status it was read with.
    pub async fn change_status(
        pool: &PgPool,
        booking: &Booking,
        next: BookingStatus,
        recheck: bool,
    ) -> Result<StatusChange, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if recheck {
            RoomRepo::lock(&mut *tx, booking.room_id).await?;
            let range = DateRange {
                check_in: booking.check_in,
                check_out: booking.check_out,
            };
            if let Some(conflict) =
                Self::find_conflict(&mut *tx, booking.room_id, &range, Some(booking.id)).await?
            {
                return Ok(StatusChange::Conflict(conflict));
            }
        }

        let query = format!(
            "UPDATE bookings SET status = $3
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Booking>(&query)
            .bind(booking.id)
            .bind(&booking.status)
            .bind(next.as_str())
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(match updated {
            Some(row) => StatusChange::Updated(row),
            None => StatusChange::Stale,
        })
    }
}
