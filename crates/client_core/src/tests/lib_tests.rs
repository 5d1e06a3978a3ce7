use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

use crate::forms::{donation_payload, registration_payload, FormData};

#[derive(Clone, Default)]
struct RegistryState {
    donors: Arc<Mutex<Vec<Donor>>>,
    received: Arc<Mutex<Vec<Value>>>,
}

impl RegistryState {
    async fn seed(&self, donors: Vec<Donor>) {
        *self.donors.lock().await = donors;
    }
}

fn donor(id: i64, name: &str) -> Donor {
    Donor {
        id: DonorId(id),
        name: name.to_string(),
        age: 35,
        email: format!("{}@x.com", name.to_lowercase()),
        phone: format!("555-{id:04}"),
        blood_type: "A+".to_string(),
        address: String::new(),
        emergency_contact: String::new(),
        registered_on: None,
        last_donation: None,
        total_donations: 0,
    }
}

async fn handle_register(
    State(state): State<RegistryState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.received.lock().await.push(body.clone());
    let Some(age) = body["age"].as_i64() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Age must be between 18 and 65" })),
        );
    };
    let mut donors = state.donors.lock().await;
    let id = donors.iter().map(|d| d.id.0).max().unwrap_or(0) + 1;
    let created = Donor {
        id: DonorId(id),
        name: body["name"].as_str().unwrap_or_default().to_string(),
        age,
        email: body["email"].as_str().unwrap_or_default().to_string(),
        phone: body["phone"].as_str().unwrap_or_default().to_string(),
        blood_type: body["blood_type"].as_str().unwrap_or_default().to_string(),
        address: body["address"].as_str().unwrap_or_default().to_string(),
        emergency_contact: body["emergency_contact"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        registered_on: None,
        last_donation: None,
        total_donations: 0,
    };
    donors.push(created.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Donor registered successfully", "donor": created })),
    )
}

async fn handle_list(State(state): State<RegistryState>) -> Json<Vec<Donor>> {
    Json(state.donors.lock().await.clone())
}

async fn handle_get(
    State(state): State<RegistryState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    match state.donors.lock().await.iter().find(|d| d.id.0 == id) {
        Some(found) => (StatusCode::OK, Json(json!(found))),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
    }
}

async fn handle_delete(
    State(state): State<RegistryState>,
    Path(id): Path<i64>,
) -> (StatusCode, Json<Value>) {
    let mut donors = state.donors.lock().await;
    let before = donors.len();
    donors.retain(|d| d.id.0 != id);
    if donors.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "message": "Donor deleted successfully" })),
    )
}

async fn handle_record(
    State(state): State<RegistryState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.received.lock().await.push(body);
    (
        StatusCode::CREATED,
        Json(json!({ "message": "Donation recorded successfully" })),
    )
}

async fn handle_can_donate(Path(id): Path<i64>) -> Json<Value> {
    if id == 1 {
        Json(json!({ "can_donate": false, "message": "Donor must wait 12 more days" }))
    } else {
        Json(json!({ "can_donate": true, "message": "Donor can donate" }))
    }
}

async fn serve(app: Router) -> Result<String, std::io::Error> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}/api"))
}

async fn spawn_registry() -> (RegistryClient, RegistryState) {
    let state = RegistryState::default();
    let app = Router::new()
        .route("/api/donors", get(handle_list))
        .route("/api/donors/register", post(handle_register))
        .route("/api/donors/:id", get(handle_get).delete(handle_delete))
        .route("/api/donors/:id/can-donate", get(handle_can_donate))
        .route("/api/donations/record", post(handle_record))
        .with_state(state.clone());
    let base_url = serve(app).await.expect("spawn registry");
    let client = RegistryClient::new(ApiConfig::new(&base_url).expect("config"));
    (client, state)
}

#[tokio::test]
async fn register_posts_coerced_form_fields() {
    let (client, state) = spawn_registry().await;
    let form = FormData::new()
        .with("name", "Jane Doe")
        .with("age", "29")
        .with("email", "jane@x.com")
        .with("phone", "555-1000")
        .with("blood_type", "O-");

    let ack = client
        .register_donor(&registration_payload(&form))
        .await
        .expect("register");

    assert_eq!(ack.message.as_deref(), Some("Donor registered successfully"));
    let created = ack.donor.expect("created donor");
    assert_eq!(created.id, DonorId(1));
    assert_eq!(created.name, "Jane Doe");

    let received = state.received.lock().await;
    assert_eq!(
        received.as_slice(),
        &[json!({
            "name": "Jane Doe",
            "age": 29,
            "email": "jane@x.com",
            "phone": "555-1000",
            "blood_type": "O-",
            "address": "",
            "emergency_contact": ""
        })]
    );
}

#[tokio::test]
async fn register_rejection_carries_server_error() {
    let (client, _state) = spawn_registry().await;
    let form = FormData::new().with("name", "Kim").with("age", "old");

    let err = client
        .register_donor(&registration_payload(&form))
        .await
        .expect_err("must be rejected");

    assert_eq!(
        err,
        GatewayError::ApiRejected("Age must be between 18 and 65".into())
    );
}

#[tokio::test]
async fn list_donors_keeps_server_order() {
    let (client, state) = spawn_registry().await;
    state
        .seed(vec![donor(5, "Eve"), donor(2, "Bob"), donor(9, "Ian")])
        .await;

    let donors = client.list_donors().await.expect("list");

    let ids: Vec<i64> = donors.iter().map(|d| d.id.0).collect();
    assert_eq!(ids, vec![5, 2, 9]);
}

#[tokio::test]
async fn list_donors_empty_collection() {
    let (client, _state) = spawn_registry().await;
    assert!(client.list_donors().await.expect("list").is_empty());
}

#[tokio::test]
async fn delete_removes_donor_and_acknowledges() {
    let (client, state) = spawn_registry().await;
    state.seed(vec![donor(3, "Ann"), donor(7, "Bo")]).await;

    let ack = client.delete_donor(DonorId(7)).await.expect("delete");

    assert_eq!(ack.message.as_deref(), Some("Donor deleted successfully"));
    let remaining: Vec<i64> = state.donors.lock().await.iter().map(|d| d.id.0).collect();
    assert_eq!(remaining, vec![3]);
}

#[tokio::test]
async fn delete_unknown_donor_surfaces_error_field() {
    let (client, _state) = spawn_registry().await;

    let err = client
        .delete_donor(DonorId(7))
        .await
        .expect_err("must be rejected");

    assert_eq!(err, GatewayError::ApiRejected("not found".into()));
}

#[tokio::test]
async fn record_donation_posts_coerced_payload() {
    let (client, state) = spawn_registry().await;
    let form = FormData::new()
        .with("donor_id", "7")
        .with("donation_date", "2024-05-01")
        .with("quantity_ml", "450")
        .with("hemoglobin", "13.2")
        .with("blood_pressure", "120/80")
        .with("notes", "first visit");

    let ack = client
        .record_donation(&donation_payload(&form))
        .await
        .expect("record");

    assert_eq!(ack.message.as_deref(), Some("Donation recorded successfully"));
    let received = state.received.lock().await;
    assert_eq!(received[0]["donor_id"], json!(7));
    assert_eq!(received[0]["quantity_ml"], json!(450));
    assert_eq!(received[0]["hemoglobin"], json!(13.2));
    assert_eq!(received[0]["notes"], json!("first visit"));
}

#[tokio::test]
async fn fetch_donor_and_eligibility() {
    let (client, state) = spawn_registry().await;
    state.seed(vec![donor(1, "Ann")]).await;

    let fetched = client.fetch_donor(DonorId(1)).await.expect("fetch");
    assert_eq!(fetched.name, "Ann");

    let missing = client.fetch_donor(DonorId(4)).await.expect_err("missing");
    assert_eq!(missing.message(), "not found");

    let waiting = client.donor_eligibility(DonorId(1)).await.expect("check");
    assert!(!waiting.can_donate);
    assert_eq!(waiting.message, "Donor must wait 12 more days");
}

#[tokio::test]
async fn rejection_without_json_body_uses_fallback_message() {
    let app = Router::new()
        .route(
            "/api/donors/register",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
        )
        .route(
            "/api/donors/:id",
            axum::routing::delete(|| async { (StatusCode::BAD_GATEWAY, "") }),
        )
        .route(
            "/api/donations/record",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "detail": "x" }))) }),
        );
    let base_url = serve(app).await.expect("spawn");
    let client = RegistryClient::new(ApiConfig::new(&base_url).expect("config"));

    let register = client
        .register_donor(&registration_payload(&FormData::new()))
        .await
        .expect_err("rejected");
    assert_eq!(register, GatewayError::ApiRejected("Registration failed".into()));

    let delete = client.delete_donor(DonorId(2)).await.expect_err("rejected");
    assert_eq!(delete, GatewayError::ApiRejected("Delete failed".into()));

    let record = client
        .record_donation(&donation_payload(&FormData::new()))
        .await
        .expect_err("rejected");
    assert_eq!(
        record,
        GatewayError::ApiRejected("Failed to record donation".into())
    );
}

#[tokio::test]
async fn unparsable_success_body_is_request_failure() {
    let app = Router::new().route("/api/donors", get(|| async { "not json" }));
    let base_url = serve(app).await.expect("spawn");
    let client = RegistryClient::new(ApiConfig::new(&base_url).expect("config"));

    let err = client.list_donors().await.expect_err("must fail");

    assert!(matches!(err, GatewayError::RequestFailed(_)), "{err:?}");
    assert!(err.message().contains("malformed response body"));
}

#[tokio::test]
async fn unreachable_registry_is_request_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = RegistryClient::new(ApiConfig::new(&format!("http://{addr}/api")).expect("config"));

    let err = client.list_donors().await.expect_err("must fail");

    assert!(matches!(err, GatewayError::RequestFailed(_)), "{err:?}");
    assert!(!err.is_rejection());
}
