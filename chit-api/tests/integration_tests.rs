//! Integration tests for the chit-api endpoints
//!
//! End-to-end flows over HTTP: scheme administration, card issuance with
//! referrals, period payments with commission payout, and winner selection.

use axum_test::TestServer;
use chit_api::{build_app, AppState};
use chit_db::ChitDatabase;
use serde_json::{json, Value};

/// Create test server over a fresh database
fn create_test_server() -> TestServer {
    let state = AppState::new(ChitDatabase::default());
    TestServer::new(build_app(state)).unwrap()
}

/// Create an active scheme: duration 3, amount 1000.00, one winner
async fn create_active_scheme(server: &TestServer) -> String {
    let response = server
        .post("/api/v1/schemes")
        .json(&json!({
            "name": "Gold Monthly",
            "subscription_amount": 100_000,
            "cycle": "monthly",
            "duration_periods": 3,
            "number_of_winners": 1,
            "start_date": chrono::Utc::now(),
        }))
        .await;
    response.assert_status_ok();
    let scheme: Value = response.json();
    let scheme_id = scheme["scheme_id"].as_str().unwrap().to_string();

    server
        .post(&format!("/api/v1/schemes/{scheme_id}/status"))
        .json(&json!({ "status": "active" }))
        .await
        .assert_status_ok();

    scheme_id
}

/// Issue a card, optionally under a referrer card
async fn issue_card(server: &TestServer, scheme_id: &str, user: &str, referrer: Option<&str>) -> String {
    let mut body = json!({
        "user_id": user,
        "scheme_id": scheme_id,
        "holder_name": user,
        "holder_phone": "9000000000",
        "payment_method": "upi_mandate",
    });
    if let Some(referrer_card_id) = referrer {
        body["referrer_card_id"] = json!(referrer_card_id);
    }

    let response = server.post("/api/v1/cards").json(&body).await;
    response.assert_status_ok();
    let card: Value = response.json();
    card["card_id"].as_str().unwrap().to_string()
}

/// Complete one period through the gateway webhook
async fn pay_period(server: &TestServer, card_id: &str, period: u32) {
    let response = server
        .post("/api/v1/payments/webhook")
        .json(&json!({
            "card_id": card_id,
            "period_index": period,
            "amount": 100_000,
            "method": "upi_mandate",
            "outcome": "completed",
        }))
        .await;
    response.assert_status_ok();
}

// ============ Health ============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/api/v1/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

// ============ End-to-end scenario ============

#[tokio::test]
async fn test_full_scheme_lifecycle_with_referrals() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;

    // User A enrolls organically and pays down all three periods
    let card_a = issue_card(&server, &scheme_id, "user_a", None).await;
    for period in 1..=3 {
        pay_period(&server, &card_a, period).await;
    }

    let response = server.get(&format!("/api/v1/cards/{card_a}")).await;
    let a: Value = response.json();
    assert_eq!(a["total_payments_made"], 3);
    assert_eq!(a["status"], "completed");
    assert_eq!(a["payment_status"], "paid");
    // organic signup: no commission anywhere
    assert_eq!(a["commission_balance"], 0);
    let commissions: Value = server.get("/api/v1/users/user_a/commissions").await.json();
    assert_eq!(commissions.as_array().unwrap().len(), 0);

    // A's fully paid card is in the eligible set
    let eligible: Value = server
        .get(&format!("/api/v1/schemes/{scheme_id}/eligible"))
        .await
        .json();
    assert_eq!(eligible["card_ids"], json!([card_a]));

    // User B enrolls under A's card and pays one period
    let card_b = issue_card(&server, &scheme_id, "user_b", Some(&card_a)).await;
    pay_period(&server, &card_b, 1).await;

    let b: Value = server.get(&format!("/api/v1/cards/{card_b}")).await.json();
    assert_eq!(b["total_payments_made"], 1);
    assert_eq!(b["referrer_l1"], "user_a");

    // A earned exactly one direct entry: 5% of 1000.00
    let entries: Value = server.get("/api/v1/users/user_a/commissions").await.json();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["level"], "direct");
    assert_eq!(entries[0]["amount"], 5_000);

    let a: Value = server.get(&format!("/api/v1/cards/{card_a}")).await.json();
    assert_eq!(a["commission_balance"], 5_000);
}

#[tokio::test]
async fn test_two_level_commission_over_http() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;

    let card_r1 = issue_card(&server, &scheme_id, "user_r1", None).await;
    let card_r2 = issue_card(&server, &scheme_id, "user_r2", Some(&card_r1)).await;
    let card_c = issue_card(&server, &scheme_id, "user_c", Some(&card_r2)).await;

    pay_period(&server, &card_c, 1).await;

    let r2_entries: Value = server.get("/api/v1/users/user_r2/commissions").await.json();
    assert_eq!(r2_entries[0]["level"], "direct");
    assert_eq!(r2_entries[0]["amount"], 5_000);

    let r1_entries: Value = server.get("/api/v1/users/user_r1/commissions").await.json();
    assert_eq!(r1_entries[0]["level"], "indirect");
    assert_eq!(r1_entries[0]["amount"], 2_000);

    // the downline report sees both levels
    let downline: Value = server
        .get(&format!("/api/v1/users/user_r1/downline/{scheme_id}?period=1"))
        .await
        .json();
    assert_eq!(downline.as_array().unwrap().len(), 2);
}

// ============ Payment edge cases ============

#[tokio::test]
async fn test_period_out_of_range_rejected() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card = issue_card(&server, &scheme_id, "user_a", None).await;

    let response = server
        .post("/api/v1/payments/webhook")
        .json(&json!({
            "card_id": card,
            "period_index": 4,
            "amount": 100_000,
            "method": "upi_mandate",
            "outcome": "completed",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "period_out_of_range");
}

#[tokio::test]
async fn test_webhook_replay_returns_existing_record() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let referrer = issue_card(&server, &scheme_id, "user_r", None).await;
    let card = issue_card(&server, &scheme_id, "user_a", Some(&referrer)).await;

    pay_period(&server, &card, 1).await;
    // at-least-once delivery: the replay succeeds quietly
    pay_period(&server, &card, 1).await;

    let snapshot: Value = server.get(&format!("/api/v1/cards/{card}")).await.json();
    assert_eq!(snapshot["total_payments_made"], 1);

    let entries: Value = server.get("/api/v1/users/user_r/commissions").await.json();
    assert_eq!(entries.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_direct_double_submit_conflicts() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card = issue_card(&server, &scheme_id, "user_a", None).await;

    let body = json!({
        "card_id": card,
        "period_index": 1,
        "amount": 100_000,
        "method": "upi_onetime",
    });
    server.post("/api/v1/payments").json(&body).await.assert_status_ok();

    let response = server.post("/api/v1/payments").json(&body).await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["code"], "period_already_paid");
}

#[tokio::test]
async fn test_amount_mismatch_rejected() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card = issue_card(&server, &scheme_id, "user_a", None).await;

    let response = server
        .post("/api/v1/payments")
        .json(&json!({
            "card_id": card,
            "period_index": 1,
            "amount": 99_000,
            "method": "upi_onetime",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = response.json();
    assert_eq!(error["code"], "amount_mismatch");
}

#[tokio::test]
async fn test_failed_webhook_marks_card_failed() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card = issue_card(&server, &scheme_id, "user_a", None).await;

    server
        .post("/api/v1/payments/webhook")
        .json(&json!({
            "card_id": card,
            "period_index": 1,
            "amount": 100_000,
            "method": "upi_mandate",
            "outcome": "failed",
        }))
        .await
        .assert_status_ok();

    let snapshot: Value = server.get(&format!("/api/v1/cards/{card}")).await.json();
    assert_eq!(snapshot["total_payments_made"], 0);
    assert_eq!(snapshot["payment_status"], "failed");
}

#[tokio::test]
async fn test_initiate_payment_returns_redirect() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card = issue_card(&server, &scheme_id, "user_a", None).await;

    let response = server
        .post(&format!("/api/v1/cards/{card}/payments/initiate"))
        .json(&json!({ "period_index": 1 }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["redirect_url"].as_str().unwrap().contains("period=1"));
}

// ============ Enrollment edge cases ============

#[tokio::test]
async fn test_duplicate_enrollment_conflicts() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    issue_card(&server, &scheme_id, "user_a", None).await;

    let response = server
        .post("/api/v1/cards")
        .json(&json!({
            "user_id": "user_a",
            "scheme_id": scheme_id,
            "holder_name": "A",
            "holder_phone": "9000000000",
            "payment_method": "upi_mandate",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["code"], "duplicate_enrollment");
}

#[tokio::test]
async fn test_unknown_referrer_not_found() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;

    let response = server
        .post("/api/v1/cards")
        .json(&json!({
            "user_id": "user_a",
            "scheme_id": scheme_id,
            "holder_name": "A",
            "holder_phone": "9000000000",
            "payment_method": "upi_mandate",
            "referrer_card_id": "card_missing",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let error: Value = response.json();
    assert_eq!(error["code"], "referrer_not_found");
}

#[tokio::test]
async fn test_enrollment_against_draft_scheme_rejected() {
    let server = create_test_server();
    let response = server
        .post("/api/v1/schemes")
        .json(&json!({
            "name": "Draft",
            "subscription_amount": 100_000,
            "cycle": "monthly",
            "duration_periods": 3,
            "number_of_winners": 1,
            "start_date": chrono::Utc::now(),
        }))
        .await;
    let scheme: Value = response.json();
    let scheme_id = scheme["scheme_id"].as_str().unwrap();

    let response = server
        .post("/api/v1/cards")
        .json(&json!({
            "user_id": "user_a",
            "scheme_id": scheme_id,
            "holder_name": "A",
            "holder_phone": "9000000000",
            "payment_method": "upi_mandate",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = response.json();
    assert_eq!(error["code"], "invalid_scheme");
}

// ============ Winner selection ============

#[tokio::test]
async fn test_duplicate_winner_selection_rejected() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card_a = issue_card(&server, &scheme_id, "user_a", None).await;
    for period in 1..=3 {
        pay_period(&server, &card_a, period).await;
    }

    let response = server
        .post(&format!("/api/v1/schemes/{scheme_id}/winners"))
        .json(&json!({ "card_ids": [card_a, card_a] }))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    let error: Value = response.json();
    assert_eq!(error["code"], "duplicate_winner");
}

#[tokio::test]
async fn test_winner_selection_and_lifecycle() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card_a = issue_card(&server, &scheme_id, "user_a", None).await;
    for period in 1..=3 {
        pay_period(&server, &card_a, period).await;
    }

    let response = server
        .post(&format!("/api/v1/schemes/{scheme_id}/winners"))
        .json(&json!({ "card_ids": [card_a] }))
        .await;
    response.assert_status_ok();
    let winners: Value = response.json();
    assert_eq!(winners[0]["rank"], 1);
    assert_eq!(winners[0]["status"], "pending");
    let winner_id = winners[0]["winner_id"].as_str().unwrap();

    // the winning card leaves the eligible set
    let eligible: Value = server
        .get(&format!("/api/v1/schemes/{scheme_id}/eligible"))
        .await
        .json();
    assert_eq!(eligible["card_ids"].as_array().unwrap().len(), 0);

    // pending -> claimed -> delivered
    server
        .post(&format!("/api/v1/winners/{winner_id}/status"))
        .json(&json!({ "status": "claimed" }))
        .await
        .assert_status_ok();
    let response = server
        .post(&format!("/api/v1/winners/{winner_id}/status"))
        .json(&json!({ "status": "delivered" }))
        .await;
    response.assert_status_ok();
    let winner: Value = response.json();
    assert_eq!(winner["status"], "delivered");
}

#[tokio::test]
async fn test_unpaid_card_not_eligible() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card_a = issue_card(&server, &scheme_id, "user_a", None).await;
    pay_period(&server, &card_a, 1).await;

    let response = server
        .post(&format!("/api/v1/schemes/{scheme_id}/winners"))
        .json(&json!({ "card_ids": [card_a] }))
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = response.json();
    assert_eq!(error["code"], "not_eligible");
}

// ============ Dashboards ============

#[tokio::test]
async fn test_dashboards_reflect_activity() {
    let server = create_test_server();
    let scheme_id = create_active_scheme(&server).await;
    let card_r = issue_card(&server, &scheme_id, "user_r", None).await;
    let card_a = issue_card(&server, &scheme_id, "user_a", Some(&card_r)).await;
    pay_period(&server, &card_a, 1).await;

    let user: Value = server.get("/api/v1/users/user_r/dashboard").await.json();
    assert_eq!(user["total_cards"], 1);
    assert_eq!(user["total_commission_earned"], 5_000);

    let scheme: Value = server
        .get(&format!("/api/v1/schemes/{scheme_id}/dashboard"))
        .await
        .json();
    assert_eq!(scheme["total_cards"], 2);
    assert_eq!(scheme["total_collected"], 100_000);
    assert_eq!(scheme["collections_by_period"][0]["payments"], 1);
}
