//! API integration tests
//!
//! These run against a live dev server with a seeded database:
//! user 1 is an admin, user 2 a student (accounts are provisioned by the
//! SSO in production, so the test database seeds them directly).

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

use deptportal_server::models::user::{Role, UserClaims};
use deptportal_server::scheduling::Clock;

const BASE_URL: &str = "http://localhost:8080/api/v1";
const JWT_SECRET: &str = "change-this-secret-in-production";

static ROOM_COUNTER: AtomicU32 = AtomicU32::new(0);

fn token_for(user_id: i32, role: Role) -> String {
    let now = Utc::now().timestamp();
    let claims = UserClaims {
        sub: format!("user-{}", user_id),
        user_id,
        role,
        iat: now,
        exp: now + 3600,
    };
    claims.create_token(JWT_SECRET).expect("Failed to sign token")
}

fn admin_token() -> String {
    token_for(1, Role::Admin)
}

fn student_token() -> String {
    token_for(2, Role::Student)
}

fn today() -> String {
    Clock::from_offset_minutes(360)
        .unwrap()
        .today()
        .format("%Y-%m-%d")
        .to_string()
}

/// Create a room with a unique number; returns its id
async fn create_room(client: &Client) -> i64 {
    let number = format!(
        "T{}-{}",
        std::process::id(),
        ROOM_COUNTER.fetch_add(1, Ordering::SeqCst)
    );
    let response = client
        .post(format!("{}/rooms", BASE_URL))
        .bearer_auth(admin_token())
        .json(&json!({
            "room_number": number,
            "purpose": "lecture",
            "capacity": 30,
            "open_time": "08:00",
            "close_time": "20:00"
        }))
        .send()
        .await
        .expect("Failed to create room");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse room");
    body["id"].as_i64().expect("No room ID")
}

async fn book(
    client: &Client,
    room_id: i64,
    date: &str,
    start: &str,
    end: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/bookings", BASE_URL))
        .bearer_auth(student_token())
        .json(&json!({
            "room_id": room_id,
            "booking_date": date,
            "start_time": start,
            "end_time": end,
            "purpose": "Lecture"
        }))
        .send()
        .await
        .expect("Failed to send booking request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/rooms", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_booking_scenario_overlap_and_adjacency() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let date = today();

    // 09:00-10:00 succeeds
    let response = book(&client, room_id, &date, "09:00", "10:00").await;
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(body["id"].is_number());
    assert_eq!(body["status"], "scheduled");

    // 09:30-10:30 overlaps 09:30-10:00
    let response = book(&client, room_id, &date, "09:30", "10:30").await;
    assert_eq!(response.status(), 409);

    // 10:00-11:00 is exactly adjacent, no overlap
    let response = book(&client, room_id, &date, "10:00", "11:00").await;
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_booking_conflicts() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let date = today();

    let response = book(&client, room_id, &date, "11:00", "12:00").await;
    assert_eq!(response.status(), 201);

    // Day schedule shows the range as taken
    let response = client
        .get(format!("{}/rooms/{}/schedule?date={}", BASE_URL, room_id, date))
        .bearer_auth(student_token())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let schedule: Value = response.json().await.unwrap();
    let taken: Vec<&Value> = schedule["slots"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["available"] == false)
        .collect();
    assert!(taken.iter().any(|s| s["start_time"].as_str().unwrap().starts_with("11:00")));

    // Identical duplicate is rejected
    let response = book(&client, room_id, &date, "11:00", "12:00").await;
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_bookings_single_winner() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let date = today();

    let (a, b) = tokio::join!(
        book(&client, room_id, &date, "13:00", "14:00"),
        book(&client, room_id, &date, "13:00", "14:00"),
    );

    let statuses = [a.status().as_u16(), b.status().as_u16()];
    assert!(
        statuses.contains(&201) && statuses.contains(&409),
        "expected exactly one success and one conflict, got {:?}",
        statuses
    );
}

#[tokio::test]
#[ignore]
async fn test_validation_rejections() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let clock = Clock::from_offset_minutes(360).unwrap();
    let yesterday = (clock.today() - Duration::days(1)).format("%Y-%m-%d").to_string();
    let horizon = (clock.today() + Duration::days(7)).format("%Y-%m-%d").to_string();
    let date = today();

    // date = yesterday
    assert_eq!(book(&client, room_id, &yesterday, "09:00", "10:00").await.status(), 400);
    // date = today + 7 (horizon boundary is exclusive)
    assert_eq!(book(&client, room_id, &horizon, "09:00", "10:00").await.status(), 400);
    // start unaligned
    assert_eq!(book(&client, room_id, &date, "09:15", "10:00").await.status(), 400);
    // start before window
    assert_eq!(book(&client, room_id, &date, "07:30", "09:00").await.status(), 400);
    // end after window
    assert_eq!(book(&client, room_id, &date, "19:00", "20:30").await.status(), 400);
    // end before start
    assert_eq!(book(&client, room_id, &date, "10:00", "09:00").await.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_weekly_schedule_shape() {
    let client = Client::new();
    let room_id = create_room(&client).await;

    let response = client
        .get(format!("{}/rooms/{}/schedule/week", BASE_URL, room_id))
        .bearer_auth(student_token())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = response.json().await.unwrap();
    let days = body["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    // 08:00-20:00 at 30 minutes: 24 slots every day
    for day in days {
        assert_eq!(day["slots"].as_array().unwrap().len(), 24);
    }
}

#[tokio::test]
#[ignore]
async fn test_multi_slot_booking_is_atomic() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let date = today();

    // Take 15:00-15:30 up front
    assert_eq!(book(&client, room_id, &date, "15:00", "15:30").await.status(), 201);

    // Batch containing the taken slot books nothing
    let response = client
        .post(format!("{}/bookings/slots", BASE_URL))
        .bearer_auth(student_token())
        .json(&json!({
            "room_id": room_id,
            "booking_date": date,
            "slot_starts": ["14:00", "15:00", "16:00"],
            "purpose": "Office hours"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 409);

    // 14:00 must still be free: the failed batch reserved nothing
    assert_eq!(book(&client, room_id, &date, "14:00", "14:30").await.status(), 201);

    // A clean batch commits every slot
    let response = client
        .post(format!("{}/bookings/slots", BASE_URL))
        .bearer_auth(student_token())
        .json(&json!({
            "room_id": room_id,
            "booking_date": date,
            "slot_starts": ["17:00", "18:00"],
            "purpose": "Office hours"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["bookings"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_cancel_ownership_and_state() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let date = today();

    let response = book(&client, room_id, &date, "12:00", "13:00").await;
    assert_eq!(response.status(), 201);
    let booking: Value = response.json().await.unwrap();
    let booking_id = booking["id"].as_i64().unwrap();

    // A different non-admin user may not cancel it
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .bearer_auth(token_for(3, Role::Student))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 403);

    // The owner may
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .bearer_auth(student_token())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "cancelled");

    // Cancelling again is an invalid state transition
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .bearer_auth(student_token())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);

    // The cancelled range is bookable again
    assert_eq!(book(&client, room_id, &date, "12:00", "13:00").await.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_idempotent_replay_with_request_token() {
    let client = Client::new();
    let room_id = create_room(&client).await;
    let date = today();
    let token = uuid::Uuid::new_v4();

    let send = || async {
        client
            .post(format!("{}/bookings", BASE_URL))
            .bearer_auth(student_token())
            .json(&json!({
                "room_id": room_id,
                "booking_date": date,
                "start_time": "16:00",
                "end_time": "17:00",
                "purpose": "Thesis defence",
                "request_token": token
            }))
            .send()
            .await
            .unwrap()
    };

    let first = send().await;
    assert_eq!(first.status(), 201);
    let first_body: Value = first.json().await.unwrap();

    // Replay with the same token returns the original booking
    let second = send().await;
    assert_eq!(second.status(), 201);
    let second_body: Value = second.json().await.unwrap();
    assert_eq!(first_body["id"], second_body["id"]);
}

#[tokio::test]
#[ignore]
async fn test_room_search_excludes_booked_rooms() {
    let client = Client::new();
    let free_room = create_room(&client).await;
    let busy_room = create_room(&client).await;
    let date = today();

    assert_eq!(book(&client, busy_room, &date, "09:00", "11:00").await.status(), 201);

    let response = client
        .get(format!(
            "{}/rooms/search?date={}&start_time=10:00&end_time=11:00&min_capacity=20",
            BASE_URL, date
        ))
        .bearer_auth(student_token())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let rooms: Value = response.json().await.unwrap();
    let ids: Vec<i64> = rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&free_room));
    assert!(!ids.contains(&busy_room));
}
