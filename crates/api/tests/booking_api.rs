//! Guest booking submission, availability, and the admin booking desk.
//!
//! The test app's clock is pinned to 2030-05-01.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_room, get, get_auth, patch_json_auth, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn room_id(app: axum::Router, token: &str) -> i64 {
    create_room(app, token, "Deluxe", 200, "available").await["id"]
        .as_i64()
        .unwrap()
}

async fn submit(
    app: axum::Router,
    room_id: i64,
    guest: &str,
    check_in: &str,
    check_out: &str,
) -> axum::response::Response {
    post_json(
        app,
        &format!("/api/v1/rooms/{room_id}/bookings"),
        json!({
            "guest_name": guest,
            "email": format!("{}@example.com", guest.to_lowercase()),
            "phone": "",
            "check_in": check_in,
            "check_out": check_out,
        }),
    )
    .await
}

async fn submit_ok(app: axum::Router, room_id: i64, guest: &str, a: &str, b: &str) -> Value {
    let response = submit(app, room_id, guest, a, b).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

async fn set_status(
    app: axum::Router,
    token: &str,
    id: &Value,
    status: &str,
) -> axum::response::Response {
    patch_json_auth(
        app,
        &format!("/api/v1/admin/bookings/{id}/status"),
        json!({ "status": status }),
        token,
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn submitted_booking_is_pending(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;

    let booking = submit_ok(app, room, "Ada", "2030-06-01", "2030-06-05").await;
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["room_id"], room);
    assert_eq!(booking["check_in"], "2030-06-01");
    assert_eq!(booking["phone"], Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn overlapping_submission_is_409(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;
    submit_ok(app.clone(), room, "Ada", "2030-06-01", "2030-06-05").await;

    let response = submit(app, room, "Bob", "2030-06-04", "2030-06-10").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("This room is already booked for the selected dates"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn back_to_back_submission_is_accepted(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;
    submit_ok(app.clone(), room, "Ada", "2030-06-01", "2030-06-05").await;
    submit_ok(app, room, "Bob", "2030-06-05", "2030-06-08").await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_dates_are_400(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;

    let past = submit(app.clone(), room, "Ada", "2030-04-30", "2030-05-03").await;
    assert_eq!(past.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(past).await["error"], "Check-in date cannot be in the past");

    let today = submit(app.clone(), room, "Ada", "2030-05-01", "2030-05-02").await;
    assert_eq!(today.status(), StatusCode::CREATED);

    let same_day = submit(app.clone(), room, "Bob", "2030-07-01", "2030-07-01").await;
    assert_eq!(same_day.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(same_day).await["error"],
        "Check-out date must be after check-in date"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_fields_are_validated(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;

    let blank_name = submit(app.clone(), room, "   ", "2030-06-01", "2030-06-02").await;
    assert_eq!(blank_name.status(), StatusCode::BAD_REQUEST);

    let bad_email = post_json(
        app,
        &format!("/api/v1/rooms/{room}/bookings"),
        json!({
            "guest_name": "Ada",
            "email": "not-an-email",
            "check_in": "2030-06-01",
            "check_out": "2030-06-02",
        }),
    )
    .await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn booking_unknown_room_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = submit(app, 999_999, "Ada", "2030-06-01", "2030-06-05").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn availability_reports_the_conflict(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;
    submit_ok(app.clone(), room, "Ada", "2030-06-01", "2030-06-05").await;

    let taken = body_json(
        get(
            app.clone(),
            &format!("/api/v1/rooms/{room}/availability?check_in=2030-06-04&check_out=2030-06-10"),
        )
        .await,
    )
    .await;
    assert_eq!(taken["data"]["available"], false);
    assert_eq!(taken["data"]["conflict"]["guest_name"], "Ada");
    assert_eq!(taken["data"]["conflict"]["check_out"], "2030-06-05");

    let free = body_json(
        get(
            app,
            &format!("/api/v1/rooms/{room}/availability?check_in=2030-06-05&check_out=2030-06-08"),
        )
        .await,
    )
    .await;
    assert_eq!(free["data"]["available"], true);
    assert_eq!(free["data"]["conflict"], Value::Null);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn allowed_transitions_and_refusals(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;
    let booking = submit_ok(app.clone(), room, "Ada", "2030-06-01", "2030-06-05").await;
    let id = &booking["id"];

    let response = set_status(app.clone(), &token, id, "pending").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = set_status(app.clone(), &token, id, "confirmed").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "confirmed");

    let response = set_status(app.clone(), &token, id, "pending").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = set_status(app.clone(), &token, id, "canceled").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = set_status(app.clone(), &token, id, "canceled").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = set_status(app.clone(), &token, id, "confirmed").await;
    assert_eq!(response.status(), StatusCode::OK);

    let missing = set_status(app, &token, &json!(999_999), "confirmed").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn canceled_dates_can_be_rebooked_and_restore_conflicts(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;
    let first = submit_ok(app.clone(), room, "Ada", "2030-06-01", "2030-06-05").await;

    let response = set_status(app.clone(), &token, &first["id"], "canceled").await;
    assert_eq!(response.status(), StatusCode::OK);

    submit_ok(app.clone(), room, "Bob", "2030-06-02", "2030-06-04").await;

    let restore = set_status(app, &token, &first["id"], "confirmed").await;
    assert_eq!(restore.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_listing_joins_room_and_filters(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let room = room_id(app.clone(), &token).await;
    let ada = submit_ok(app.clone(), room, "Ada", "2030-06-01", "2030-06-05").await;
    submit_ok(app.clone(), room, "Bob", "2030-07-01", "2030-07-05").await;
    set_status(app.clone(), &token, &ada["id"], "confirmed").await;

    let response = get_auth(app.clone(), "/api/v1/admin/bookings?status=all", &token).await;
    let all = body_json(response).await;
    let rows = all["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["guest_name"], "Bob");
    assert_eq!(rows[0]["room_name"], "Deluxe");
    assert_eq!(rows[0]["room_price"], 200);

    let response = get_auth(app.clone(), "/api/v1/admin/bookings?status=pending", &token).await;
    let pending = body_json(response).await;
    assert_eq!(pending["data"].as_array().unwrap().len(), 1);
    assert_eq!(pending["data"][0]["guest_name"], "Bob");

    let bogus = get_auth(app.clone(), "/api/v1/admin/bookings?status=cancelled", &token).await;
    assert_eq!(bogus.status(), StatusCode::BAD_REQUEST);

    let stats = body_json(get_auth(app, "/api/v1/admin/dashboard/stats", &token).await).await;
    assert_eq!(stats["data"]["total_rooms"], 1);
    assert_eq!(stats["data"]["available_rooms"], 1);
    assert_eq!(stats["data"]["total_bookings"], 2);
    assert_eq!(stats["data"]["pending_bookings"], 1);
}
