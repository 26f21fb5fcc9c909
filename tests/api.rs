//! End-to-end tests: a real server on a loopback port, a mocked relay.

#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::time::Duration;

use chrono::{Days, Local};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use starvnt_gateway::api;
use starvnt_gateway::app_state::AppState;
use starvnt_gateway::config::{ChannelConfig, ChatConfig, DeliveryConfig, GatewayConfig};

fn config(relay_url: String) -> GatewayConfig {
    GatewayConfig {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        delivery: DeliveryConfig {
            channel: ChannelConfig::Relay { url: relay_url },
            timeout: Duration::from_secs(5),
            ..DeliveryConfig::default()
        },
        chat: ChatConfig {
            offline_delay: Duration::ZERO,
            ..ChatConfig::default()
        },
    }
}

/// Starts the gateway and returns its base URL.
async fn spawn_gateway(relay_url: String) -> String {
    let Ok(state) = AppState::from_config(&config(relay_url)) else {
        panic!("state builds");
    };
    let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    tokio::spawn(async move {
        let _ = axum::serve(listener, api::build_app(state)).await;
    });
    format!("http://{addr}")
}

fn closed_port_url() -> String {
    let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
        panic!("bind failed");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("no local addr");
    };
    drop(listener);
    format!("http://{addr}/api/send-booking-email")
}

fn booking_body() -> Value {
    let date = Local::now()
        .date_naive()
        .checked_add_days(Days::new(90))
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string();
    json!({
        "name": "Ananya Ghosh",
        "email": "ananya@example.com",
        "phone": "9123456780",
        "event_date": date,
        "venue": "The Oberoi Grand",
        "guests": "400",
        "event_type": "Wedding",
        "budget": 2500000,
    })
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> (u16, Value) {
    let Ok(response) = client.post(url).json(&body).send().await else {
        panic!("gateway reachable");
    };
    let status = response.status().as_u16();
    let json = response.json().await.unwrap_or(Value::Null);
    (status, json)
}

async fn get(client: &reqwest::Client, url: String) -> (u16, Value) {
    let Ok(response) = client.get(url).send().await else {
        panic!("gateway reachable");
    };
    let status = response.status().as_u16();
    let json = response.json().await.unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn booking_is_relayed_with_payload_links() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(body_partial_json(json!({
            "customer_email": "ananya@example.com",
            "to_email": "ananya@example.com",
            "budget": "₹25,00,000.00",
            "event_type": "Wedding",
            "guest_count": 400,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"messageId": "<m1@relay>"})))
        .expect(1)
        .mount(&relay)
        .await;

    let base = spawn_gateway(format!("{}/send", relay.uri())).await;
    let client = reqwest::Client::new();
    let (status, body) = post(&client, format!("{base}/api/v1/bookings"), booking_body()).await;

    assert_eq!(status, 201);
    assert_eq!(body.get("reference_id"), Some(&json!("<m1@relay>")));
    assert_eq!(body.get("simulated"), Some(&json!(false)));
    assert!(
        body.get("booking_id")
            .and_then(Value::as_str)
            .is_some_and(|id| id.starts_with("BK-") && id.len() == 12)
    );
}

#[tokio::test]
async fn unreachable_relay_confirms_with_simulation() {
    let base = spawn_gateway(closed_port_url()).await;
    let client = reqwest::Client::new();
    let (status, body) = post(&client, format!("{base}/api/v1/bookings"), booking_body()).await;

    assert_eq!(status, 201);
    assert_eq!(body.get("simulated"), Some(&json!(true)));
    assert!(
        body.get("reference_id")
            .and_then(Value::as_str)
            .is_some_and(|r| r.starts_with("DEMO-SIMULATION-"))
    );
}

#[tokio::test]
async fn relay_auth_failure_is_surfaced() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Invalid login: 535 Authentication failed",
        })))
        .mount(&relay)
        .await;

    let base = spawn_gateway(relay.uri()).await;
    let client = reqwest::Client::new();
    let (status, body) = post(&client, format!("{base}/api/v1/bookings"), booking_body()).await;

    assert_eq!(status, 502);
    assert_eq!(
        body.pointer("/error/message").and_then(Value::as_str),
        Some("Invalid login: 535 Authentication failed")
    );
}

#[tokio::test]
async fn invalid_booking_never_reaches_relay() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&relay)
        .await;

    let base = spawn_gateway(relay.uri()).await;
    let client = reqwest::Client::new();
    let mut body = booking_body();
    if let Some(obj) = body.as_object_mut() {
        obj.insert("event_date".to_string(), json!(Local::now().date_naive().format("%Y-%m-%d").to_string()));
    }
    let (status, body) = post(&client, format!("{base}/api/v1/bookings"), body).await;

    assert_eq!(status, 422);
    assert_eq!(
        body.pointer("/error/message").and_then(Value::as_str),
        Some("Event date must be from tomorrow onwards.")
    );
}

#[tokio::test]
async fn saved_event_is_booked_through_its_id() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"amount_paid": 750000, "event_type": "Corporate"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "r-9"})))
        .expect(1)
        .mount(&relay)
        .await;

    let base = spawn_gateway(relay.uri()).await;
    let client = reqwest::Client::new();
    let (status, draft) = post(
        &client,
        format!("{base}/api/v1/events"),
        json!({"name": "Annual Summit", "event_type": "Corporate", "budget": 750000}),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(draft.get("status"), Some(&json!("Draft")));
    let Some(id) = draft.get("id").and_then(Value::as_str) else {
        panic!("draft id");
    };

    let mut booking = booking_body();
    if let Some(obj) = booking.as_object_mut() {
        obj.remove("event_type");
        obj.remove("budget");
        obj.insert("saved_event_id".to_string(), json!(id));
    }
    let (status, _) = post(&client, format!("{base}/api/v1/bookings"), booking).await;
    assert_eq!(status, 201);

    let (status, stored) = get(&client, format!("{base}/api/v1/events/{id}")).await;
    assert_eq!(status, 200);
    assert_eq!(stored.get("status"), Some(&json!("Booked")));

    let (_, list) = get(&client, format!("{base}/api/v1/events")).await;
    assert_eq!(list.get("total"), Some(&json!(1)));
}

#[tokio::test]
async fn offline_chat_conversation() {
    let base = spawn_gateway(closed_port_url()).await;
    let client = reqwest::Client::new();

    let (status, session) = post(&client, format!("{base}/api/v1/chat/sessions"), json!({})).await;
    assert_eq!(status, 201);
    assert_eq!(session.get("mode"), Some(&json!("offline")));
    let Some(id) = session.get("session_id").and_then(Value::as_str) else {
        panic!("session id");
    };

    let (status, reply) = post(
        &client,
        format!("{base}/api/v1/chat/sessions/{id}/messages"),
        json!({"message": "Do you offer a loan?"}),
    )
    .await;
    assert_eq!(status, 200);
    assert!(
        reply
            .pointer("/reply/text")
            .and_then(Value::as_str)
            .is_some_and(|t| t.contains("Wedding on EMI"))
    );

    let (_, transcript) = get(&client, format!("{base}/api/v1/chat/sessions/{id}/messages")).await;
    assert_eq!(
        transcript.get("messages").and_then(Value::as_array).map(Vec::len),
        Some(3)
    );

    let Ok(response) = client
        .delete(format!("{base}/api/v1/chat/sessions/{id}"))
        .send()
        .await
    else {
        panic!("gateway reachable");
    };
    assert_eq!(response.status().as_u16(), 204);

    let (status, _) = get(&client, format!("{base}/api/v1/chat/sessions/{id}/messages")).await;
    assert_eq!(status, 404);
}
