//! Integration tests for the profile service against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use pegawai_api::config::ApiConfig;
use pegawai_api::credentials::CredentialStore;
use pegawai_api::http::ApiClient;
use pegawai_api::profile::{ProfilePatch, ProfileService};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn employee(phone: &str) -> serde_json::Value {
    json!({
        "id": 10,
        "user_id": 1,
        "employee_code": "EMP-001",
        "full_name": "Budi Santoso",
        "department": "Engineering",
        "position": "Developer",
        "phone": phone,
        "hire_date": "2023-01-15",
        "is_active": true,
        "created_at": "2023-01-15T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z"
    })
}

async fn service(server: &MockServer, dir: &tempfile::TempDir) -> ProfileService {
    let store = Arc::new(CredentialStore::in_dir(dir.path()));
    let config = ApiConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    };
    let api = Arc::new(ApiClient::new(&config, store).unwrap());
    ProfileService::new(api)
}

#[tokio::test]
async fn fetch_returns_the_employee_record() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profiles = service(&server, &dir).await;

    Mock::given(method("GET"))
        .and(path("/employees/user/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "employee": employee("0812345678")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = profiles.fetch_profile(1).await.unwrap();
    assert_eq!(profile.employee_code, "EMP-001");
    assert_eq!(profile.phone, "0812345678");
}

#[tokio::test]
async fn fetch_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profiles = service(&server, &dir).await;

    Mock::given(method("GET"))
        .and(path("/employees/user/1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let err = profiles.fetch_profile(1).await.unwrap_err();
    assert_eq!(err.to_string(), "Gagal mengambil data employee");
}

/// Empty and absent patch fields are omitted from the request body entirely;
/// the exact body match fails if anything else is sent.
#[tokio::test]
async fn update_sends_only_present_fields() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profiles = service(&server, &dir).await;

    Mock::given(method("PUT"))
        .and(path("/employees/10"))
        .and(body_json(json!({
            "fullName": "Budi Santoso",
            "hireDate": "2023-01-15"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "employee": employee("0812345678")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProfilePatch {
        full_name: Some("Budi Santoso".to_string()),
        department: Some(String::new()),
        position: Some("   ".to_string()),
        phone: None,
        hire_date: Some("2023-01-15".to_string()),
    };
    let profile = profiles.update_profile(10, &patch).await.unwrap();
    assert_eq!(profile.full_name, "Budi Santoso");
}

#[tokio::test]
async fn update_failure_surfaces_backend_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profiles = service(&server, &dir).await;

    Mock::given(method("PUT"))
        .and(path("/employees/10"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "nomor telepon sudah digunakan"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let patch = ProfilePatch {
        phone: Some("0812345678".to_string()),
        ..ProfilePatch::default()
    };
    let err = profiles.update_profile(10, &patch).await.unwrap_err();
    assert_eq!(err.to_string(), "nomor telepon sudah digunakan");
}

#[tokio::test]
async fn list_returns_all_employees() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profiles = service(&server, &dir).await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "employees": [employee("0812345678"), employee("0899999999")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let all = profiles.list_profiles().await.unwrap();
    assert_eq!(all.len(), 2);
}
