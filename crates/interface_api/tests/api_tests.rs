//! HTTP-level tests against in-memory store, CRM and mailer

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use domain_crm::{CrmError, CrmOperation, CrmSync, MockCrm, RetryPolicy};
use domain_leads::{InMemorySubmissionStore, SubmissionStore};
use infra_email::{MockMailer, Notifier};
use interface_api::auth::{create_token, permissions};
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState, LeadIntake};
use test_utils::builders::{BookingFormBuilder, CalculatorFormBuilder, PartnerFormBuilder};
use test_utils::fixtures::{BookingFixtures, CalculatorFixtures, CareerFixtures, PartnerFixtures};

const SECRET: &str = "test-secret";

struct TestApp {
    server: TestServer,
    store: InMemorySubmissionStore,
    crm: MockCrm,
    mailer: MockMailer,
}

fn test_config() -> ApiConfig {
    ApiConfig {
        jwt_secret: SECRET.to_string(),
        static_dir: "does-not-exist".to_string(),
        ..Default::default()
    }
}

fn spawn_with(config: ApiConfig) -> TestApp {
    let store = InMemorySubmissionStore::new();
    let crm = MockCrm::new();
    let mailer = MockMailer::new();

    let intake = LeadIntake::new(Arc::new(store.clone()))
        .with_crm(CrmSync::new(
            Arc::new(crm.clone()),
            RetryPolicy::new(3, Duration::from_millis(1)),
        ))
        .with_notifier(Notifier::new(Arc::new(mailer.clone()), "admin@palvar.de"));

    let server = TestServer::new(create_router(AppState::new(intake, config))).unwrap();
    TestApp {
        server,
        store,
        crm,
        mailer,
    }
}

fn spawn() -> TestApp {
    spawn_with(test_config())
}

fn bearer(roles: &[&str]) -> HeaderValue {
    let token = create_token(
        "backoffice",
        roles.iter().map(|r| r.to_string()).collect(),
        SECRET,
        300,
    )
    .unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

// ============================================================================
// Booking
// ============================================================================

#[tokio::test]
async fn test_booking_returns_201_with_both_ids() {
    let app = spawn();

    let response = app.server.post("/api/anfrage").json(&BookingFixtures::json()).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Anfrage erfolgreich gesendet");
    assert_eq!(body["booking_id"], body["id"]);

    let stored = app.store.list_bookings().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(body["id"], stored[0].id.as_uuid().to_string());
    assert_eq!(app.crm.contacts().await.len(), 1);
    assert_eq!(app.mailer.sent_to("anna@example.com").await.len(), 1);
}

#[tokio::test]
async fn test_whitespace_only_name_is_rejected() {
    let app = spawn();
    let mut body = BookingFixtures::json();
    body["name"] = json!("   ");

    let response = app.server.post("/api/anfrage").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let details = &response.json::<Value>()["details"];
    assert_eq!(details.as_array().unwrap().len(), 1);
    assert_eq!(details[0]["field"], "name");
    assert_eq!(app.store.total_records().await, 0);
    assert!(app.crm.notes().await.is_empty());
}

#[tokio::test]
async fn test_padded_fields_are_stored_trimmed() {
    let app = spawn();
    let mut body = BookingFixtures::json();
    body["name"] = json!("  Anna Muster  ");
    body["email"] = json!(" anna@example.com ");

    let response = app.server.post("/api/anfrage").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let stored = app.store.list_bookings().await.unwrap();
    assert_eq!(stored[0].name, "Anna Muster");
    assert_eq!(stored[0].email, "anna@example.com");
}

#[tokio::test]
async fn test_booking_alias_route() {
    let app = spawn();

    let response = app
        .server
        .post("/api/booking")
        .json(&BookingFormBuilder::new().json())
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(app.store.total_records().await, 1);
}

#[tokio::test]
async fn test_invalid_booking_returns_field_details_and_persists_nothing() {
    let app = spawn();
    let mut body = BookingFixtures::json();
    body["email"] = json!("keine-adresse");
    body["name"] = json!("");

    let response = app.server.post("/api/anfrage").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Ungültige Anfrage");
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "name"]);
    assert_eq!(app.store.total_records().await, 0);
    assert_eq!(app.crm.total_calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_reported_on_body() {
    let app = spawn();

    let response = app.server.post("/api/anfrage").text("{\"name\": ").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Ungültige Anfrage");
    assert_eq!(body["details"][0]["field"], "body");
}

#[tokio::test]
async fn test_crm_outage_still_returns_201() {
    let app = spawn();
    app.crm
        .fail_always(
            CrmOperation::FindContact,
            CrmError::Server {
                status: 502,
                message: "bad gateway".into(),
            },
        )
        .await;
    app.crm
        .fail_always(
            CrmOperation::CreateContact,
            CrmError::Server {
                status: 502,
                message: "bad gateway".into(),
            },
        )
        .await;

    let response = app.server.post("/api/anfrage").json(&BookingFixtures::json()).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(app.store.total_records().await, 1);
    assert!(app.crm.contacts().await.is_empty());
}

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let app = spawn();
    app.store.fail_writes(true);

    let response = app.server.post("/api/anfrage").json(&BookingFixtures::json()).await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Interner Serverfehler" }));
    assert_eq!(app.crm.total_calls(), 0);
    assert!(app.mailer.sent().await.is_empty());
}

// ============================================================================
// Calculator
// ============================================================================

#[tokio::test]
async fn test_calculator_results_are_saved() {
    let app = spawn();

    let response = app
        .server
        .post("/api/calculator/send-results")
        .json(&CalculatorFixtures::json())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "message": "Ergebnisse gespeichert" })
    );
    assert_eq!(app.store.list_calculator_submissions().await.unwrap().len(), 1);
    assert_eq!(app.mailer.sent_to("rechner@example.com").await.len(), 1);
}

#[tokio::test]
async fn test_calculator_storage_failure_has_own_message() {
    let app = spawn();
    app.store.fail_writes(true);

    let response = app
        .server
        .post("/api/calculator/send-results")
        .json(&CalculatorFormBuilder::new().json())
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": "Speichern fehlgeschlagen" }));
}

#[tokio::test]
async fn test_calculator_requires_type() {
    let app = spawn();

    let response = app
        .server
        .post("/api/calculator/send-results")
        .json(&CalculatorFormBuilder::new().with_calculator_type("").json())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["details"][0]["field"], "calculatorType");
}

#[tokio::test]
async fn test_calculator_without_lists_is_rejected() {
    let app = spawn();

    let response = app
        .server
        .post("/api/calculator/send-results")
        .json(&json!({ "email": "a@example.com", "calculatorType": "pv" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["inputs", "results"]);
    assert_eq!(body["details"][0]["code"], "required");
    assert_eq!(app.store.total_records().await, 0);
}

// ============================================================================
// Partner and career
// ============================================================================

#[tokio::test]
async fn test_partner_company_failure_still_returns_201() {
    let app = spawn();
    app.crm
        .fail_always(
            CrmOperation::CreateCompany,
            CrmError::BadRequest {
                message: "property does not exist".into(),
            },
        )
        .await;

    let response = app.server.post("/api/partner").json(&PartnerFixtures::json()).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Registrierung erfolgreich gesendet");
    assert!(body["id"].is_string());
    assert_eq!(app.crm.contacts().await.len(), 1);
    assert!(app.crm.companies().await.is_empty());
    assert_eq!(app.mailer.sent_to("admin@palvar.de").await.len(), 1);
}

#[tokio::test]
async fn test_partner_without_trades_is_rejected() {
    let app = spawn();

    let response = app
        .server
        .post("/api/partner")
        .json(&PartnerFormBuilder::new().with_trades(&[]).json())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["details"][0]["field"], "trades");
    assert_eq!(app.store.total_records().await, 0);
}

#[tokio::test]
async fn test_partner_blank_company_name_is_rejected() {
    let app = spawn();
    let mut body = PartnerFixtures::json();
    body["companyName"] = json!("  ");

    let response = app.server.post("/api/partner").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let details = &response.json::<Value>()["details"];
    assert_eq!(details[0]["field"], "companyName");
    assert_eq!(details[0]["code"], "length");
    assert_eq!(app.store.total_records().await, 0);
    assert!(app.crm.contacts().await.is_empty());
}

#[tokio::test]
async fn test_career_application_returns_201() {
    let app = spawn();

    let response = app.server.post("/api/karriere").json(&CareerFixtures::json()).await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["message"], "Bewerbung erfolgreich gesendet");
    let stored = app.store.list_career_applications().await.unwrap();
    assert_eq!(stored[0].status, "new");
    assert!(app.mailer.sent().await.is_empty());
}

// ============================================================================
// Admin listings
// ============================================================================

#[tokio::test]
async fn test_listing_requires_token() {
    let app = spawn();

    let response = app.server.get("/api/anfrage").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/api/karriere")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_requires_role() {
    let app = spawn();

    let response = app
        .server
        .get("/api/partner")
        .add_header(AUTHORIZATION, bearer(&[permissions::CRM_ADMIN]))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listing_returns_newest_first() {
    let app = spawn();
    for name in ["Erste Anfrage", "Zweite Anfrage"] {
        app.server
            .post("/api/anfrage")
            .json(&BookingFormBuilder::new().with_name(name).json())
            .await;
    }

    let response = app
        .server
        .get("/api/anfrage")
        .add_header(AUTHORIZATION, bearer(&[permissions::LEADS_READ]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let list: Value = response.json();
    assert_eq!(list.as_array().unwrap().len(), 2);
    assert_eq!(list[0]["name"], "Zweite Anfrage");
    assert!(list[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_calculator_listing_with_admin_role() {
    let app = spawn();
    app.server
        .post("/api/calculator/send-results")
        .json(&CalculatorFixtures::json())
        .await;

    let response = app
        .server
        .get("/api/calculator/submissions")
        .add_header(AUTHORIZATION, bearer(&[permissions::ADMIN]))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()[0]["calculatorType"], "pv");
}

#[tokio::test]
async fn test_crm_properties_require_crm_admin() {
    let app = spawn();

    let forbidden = app
        .server
        .get("/api/admin/crm/properties")
        .add_header(AUTHORIZATION, bearer(&[permissions::LEADS_READ]))
        .await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

    let response = app
        .server
        .get("/api/admin/crm/properties")
        .add_header(AUTHORIZATION, bearer(&[permissions::CRM_ADMIN]))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let properties: Value = response.json();
    assert!(properties
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["name"] == "booking_confirmed"));
}

// ============================================================================
// Health, fallbacks
// ============================================================================

#[tokio::test]
async fn test_api_health_reports_database() {
    let app = spawn();

    let body: Value = app.server.get("/api/health").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["database_url_set"], false);
    assert!(body.get("error_message").is_none());

    app.store.fail_writes(true);
    let response = app.server.get("/api/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["database"], "error");
    assert_eq!(body["error_message"], "simulated database outage");
}

#[tokio::test]
async fn test_readiness_follows_store() {
    let app = spawn();

    assert_eq!(app.server.get("/health").await.status_code(), StatusCode::OK);

    let ready = app.server.get("/health/ready").await;
    assert_eq!(ready.status_code(), StatusCode::OK);
    assert_eq!(ready.json::<Value>()["checks"].as_array().unwrap().len(), 3);

    app.store.fail_writes(true);
    assert_eq!(
        app.server.get("/health/ready").await.status_code(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let app = spawn();

    let response = app.server.get("/api/unbekannt").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Nicht gefunden");
}

#[tokio::test]
async fn test_frontend_bundle_with_spa_fallback() {
    let dir = std::env::temp_dir().join(format!("leads-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html>app</html>").unwrap();
    std::fs::write(dir.join("app.js"), "console.log('app')").unwrap();

    let app = spawn_with(ApiConfig {
        static_dir: dir.to_string_lossy().into_owned(),
        ..test_config()
    });

    let asset = app.server.get("/app.js").await;
    assert_eq!(asset.status_code(), StatusCode::OK);
    assert_eq!(asset.text(), "console.log('app')");

    let page = app.server.get("/leistungen/energieberatung").await;
    assert_eq!(page.status_code(), StatusCode::OK);
    assert_eq!(page.text(), "<html>app</html>");

    let api = app.server.get("/api/unbekannt").await;
    assert_eq!(api.status_code(), StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&dir).ok();
}
