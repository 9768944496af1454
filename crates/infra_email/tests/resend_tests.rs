//! Resend adapter tests against a local stub of the email API

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use core_kernel::HealthCheckable;
use infra_connector::{ConnectionSettings, StaticCredentials};
use infra_email::{Attachment, EmailError, EmailPort, OutboundEmail, ResendConfig, ResendMailer};

#[derive(Clone, Default)]
struct Inbox {
    received: Arc<Mutex<Vec<(Value, Option<String>)>>>,
}

async fn emails(State(inbox): State<Inbox>, headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    inbox.received.lock().unwrap().push((body.clone(), auth));

    if body["to"][0] == "bounce@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "name": "validation_error", "message": "Invalid `to` field" })),
        );
    }
    (StatusCode::OK, Json(json!({ "id": "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794" })))
}

async fn spawn_stub() -> (String, Inbox) {
    let inbox = Inbox::default();
    let app = Router::new()
        .route("/emails", post(emails))
        .with_state(inbox.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), inbox)
}

fn mailer(base_url: String, provider_from: Option<&str>) -> ResendMailer {
    let credentials = Arc::new(StaticCredentials::api_key(
        "resend",
        "re_test",
        provider_from.map(str::to_string),
    ));
    ResendMailer::new(
        ResendConfig {
            base_url,
            timeout_secs: 5,
            from_email: None,
        },
        credentials,
    )
    .unwrap()
}

#[tokio::test]
async fn test_send_posts_message_with_bearer_key() {
    let (url, inbox) = spawn_stub().await;
    let resend = mailer(url, Some("service@palvar.de"));

    let email = OutboundEmail::new("PALVAR Buchung", "admin@palvar.de", "Neue Anfrage", "<p>Hallo</p>")
        .reply_to("anna@example.com")
        .attach(Attachment::from_bytes("termin.ics", "text/calendar", b"BEGIN:VCALENDAR"));

    let receipt = resend.send(&email).await.unwrap();
    assert_eq!(receipt.id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");

    let (body, auth) = inbox.received.lock().unwrap()[0].clone();
    assert_eq!(auth.as_deref(), Some("Bearer re_test"));
    assert_eq!(body["from"], "PALVAR Buchung <service@palvar.de>");
    assert_eq!(body["to"], json!(["admin@palvar.de"]));
    assert_eq!(body["reply_to"], "anna@example.com");
    assert_eq!(body["attachments"][0]["filename"], "termin.ics");
    assert_eq!(body["attachments"][0]["content"], "QkVHSU46VkNBTEVOREFS");
    assert_eq!(body["attachments"][0]["content_type"], "text/calendar");
}

#[tokio::test]
async fn test_optional_fields_are_omitted_and_sender_falls_back() {
    let (url, inbox) = spawn_stub().await;
    let resend = mailer(url, None);

    let email = OutboundEmail::new("PALVAR", "anna@example.com", "Ergebnisse", "<p/>");
    resend.send(&email).await.unwrap();

    let (body, _) = inbox.received.lock().unwrap()[0].clone();
    assert_eq!(body["from"], "PALVAR <onboarding@resend.dev>");
    assert!(body.get("reply_to").is_none());
    assert!(body.get("attachments").is_none());
}

#[tokio::test]
async fn test_rejection_carries_status_and_body() {
    let (url, _inbox) = spawn_stub().await;
    let resend = mailer(url, None);

    let email = OutboundEmail::new("PALVAR", "bounce@example.com", "Hallo", "<p/>");
    match resend.send(&email).await {
        Err(EmailError::Rejected { status, message }) => {
            assert_eq!(status, 422);
            assert!(message.contains("validation_error"));
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_api_key_is_credentials_error() {
    let credentials = Arc::new(StaticCredentials::new("resend", ConnectionSettings::default()));
    let resend = ResendMailer::new(ResendConfig::default(), credentials).unwrap();

    let email = OutboundEmail::new("PALVAR", "anna@example.com", "Hallo", "<p/>");
    assert!(matches!(resend.send(&email).await, Err(EmailError::Credentials(_))));

    let health = resend.health_check().await;
    assert!(!health.is_healthy());
    assert_eq!(health.message.as_deref(), Some("resend not connected"));
}
