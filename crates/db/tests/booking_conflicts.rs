//! Conflict detection and status transitions against a real database.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use hotel_core::booking::{BookingStatus, DateRange};
use hotel_db::models::booking::CreateBooking;
use hotel_db::models::room::CreateRoom;
use hotel_db::repositories::{BookingInsert, BookingRepo, DashboardRepo, RoomRepo, StatusChange};
use sqlx::PgPool;

fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, month, day).unwrap()
}

async fn room(pool: &PgPool) -> i64 {
    RoomRepo::create(
        pool,
        &CreateRoom {
            name: "Deluxe".into(),
            description: None,
            price: 200,
            status: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn stay(room_id: i64, guest: &str, check_in: NaiveDate, check_out: NaiveDate) -> CreateBooking {
    CreateBooking {
        room_id,
        guest_name: guest.into(),
        email: Some(format!("{}@example.com", guest.to_lowercase())),
        phone: None,
        check_in,
        check_out,
    }
}

async fn book(pool: &PgPool, input: &CreateBooking) -> hotel_db::models::booking::Booking {
    match BookingRepo::create_checked(pool, input).await.unwrap() {
        BookingInsert::Created(b) => b,
        other => panic!("expected a created booking, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_new_booking_is_pending(pool: PgPool) {
    let room_id = room(&pool).await;
    let booking = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.check_in, d(6, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overlapping_request_is_refused(pool: PgPool) {
    let room_id = room(&pool).await;
    let first = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;

    let outcome = BookingRepo::create_checked(&pool, &stay(room_id, "Bob", d(6, 4), d(6, 10)))
        .await
        .unwrap();
    assert_matches!(
        outcome,
        BookingInsert::Conflict(c) if c.id == first.id && c.guest_name == "Ada"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_out_day_is_free(pool: PgPool) {
    let room_id = room(&pool).await;
    book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;
    book(&pool, &stay(room_id, "Bob", d(6, 5), d(6, 8))).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_rooms_do_not_conflict(pool: PgPool) {
    let a = room(&pool).await;
    let b = room(&pool).await;
    book(&pool, &stay(a, "Ada", d(6, 1), d(6, 5))).await;
    book(&pool, &stay(b, "Bob", d(6, 1), d(6, 5))).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_canceled_booking_frees_its_dates(pool: PgPool) {
    let room_id = room(&pool).await;
    let first = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;

    let change = BookingRepo::change_status(&pool, &first, BookingStatus::Canceled, false)
        .await
        .unwrap();
    assert_matches!(change, StatusChange::Updated(b) if b.status == "canceled");

    book(&pool, &stay(room_id, "Bob", d(6, 2), d(6, 4))).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_rechecks_conflicts(pool: PgPool) {
    let room_id = room(&pool).await;
    let first = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;
    let StatusChange::Updated(canceled) =
        BookingRepo::change_status(&pool, &first, BookingStatus::Canceled, false)
            .await
            .unwrap()
    else {
        panic!("cancel should succeed");
    };
    let second = book(&pool, &stay(room_id, "Bob", d(6, 3), d(6, 6))).await;

    let restore = BookingRepo::change_status(&pool, &canceled, BookingStatus::Confirmed, true)
        .await
        .unwrap();
    assert_matches!(restore, StatusChange::Conflict(c) if c.id == second.id);

    let unchanged = BookingRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, "canceled");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stale_status_change_is_reported(pool: PgPool) {
    let room_id = room(&pool).await;
    let booking = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;

    BookingRepo::change_status(&pool, &booking, BookingStatus::Confirmed, false)
        .await
        .unwrap();
    // `booking` still says pending.
    let second = BookingRepo::change_status(&pool, &booking, BookingStatus::Canceled, false)
        .await
        .unwrap();
    assert_matches!(second, StatusChange::Stale);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_room_is_reported(pool: PgPool) {
    let outcome = BookingRepo::create_checked(&pool, &stay(424_242, "Ada", d(6, 1), d(6, 5)))
        .await
        .unwrap();
    assert_matches!(outcome, BookingInsert::RoomNotFound);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_conflict_excludes_self(pool: PgPool) {
    let room_id = room(&pool).await;
    let booking = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;
    let range = DateRange::new(d(6, 1), d(6, 5)).unwrap();

    let found = BookingRepo::find_conflict(&pool, room_id, &range, None).await.unwrap();
    assert_eq!(found.map(|c| c.id), Some(booking.id));

    let excluded = BookingRepo::find_conflict(&pool, room_id, &range, Some(booking.id))
        .await
        .unwrap();
    assert!(excluded.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exclusion_constraint_blocks_raw_overlap(pool: PgPool) {
    let room_id = room(&pool).await;
    book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;

    let err = sqlx::query(
        "INSERT INTO bookings (room_id, guest_name, check_in, check_out, status)
         VALUES ($1, 'Mallory', $2, $3, 'confirmed')",
    )
    .bind(room_id)
    .bind(d(6, 2))
    .bind(d(6, 3))
    .execute(&pool)
    .await
    .unwrap_err();

    let code = match &err {
        sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
        _ => None,
    };
    assert_eq!(code.as_deref(), Some("23P01"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_overlapping_requests_book_once(pool: PgPool) {
    let room_id = room(&pool).await;

    let handles: Vec<_> = (0..12u32)
        .map(|i| {
            let pool = pool.clone();
            let input = stay(room_id, &format!("Guest{i}"), d(6, 1 + i % 3), d(6, 6));
            tokio::spawn(async move { BookingRepo::create_checked(&pool, &input).await })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap().unwrap() {
            BookingInsert::Created(_) => created += 1,
            BookingInsert::Conflict(_) => conflicts += 1,
            BookingInsert::RoomNotFound => panic!("room vanished"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(conflicts, 11);

    let active: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
        .bind(room_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(active, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_room_with_bookings_cannot_be_deleted(pool: PgPool) {
    let room_id = room(&pool).await;
    book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;

    let err = RoomRepo::delete(&pool, room_id).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_room_filters_by_status(pool: PgPool) {
    let room_id = room(&pool).await;
    let a = book(&pool, &stay(room_id, "Ada", d(6, 1), d(6, 5))).await;
    book(&pool, &stay(room_id, "Bob", d(7, 1), d(7, 5))).await;
    BookingRepo::change_status(&pool, &a, BookingStatus::Confirmed, false)
        .await
        .unwrap();

    let all = BookingRepo::list_with_room(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].booking.guest_name, "Bob");
    assert_eq!(all[0].room_name, "Deluxe");
    assert_eq!(all[0].room_price, 200);

    let confirmed = BookingRepo::list_with_room(&pool, Some(BookingStatus::Confirmed))
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].booking.id, a.id);

    let stats = DashboardRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.pending_bookings, 1);
}
