//! Integration tests for the metadata bundle operations
//!
//! These tests run the complete default-update and translation-swap flows
//! against files on disk, with the target server mocked by wiremock.

use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    matchers::{basic_auth, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use metadata_swap::{commands, config::Config, error::MetadataError};

// ==================== Test Helpers ====================

fn create_test_config(server_url: &str) -> Config {
    Config {
        server_url: server_url.to_string(),
        username: "admin".to_string(),
        password: "district".to_string(),
    }
}

fn write_metadata(temp_dir: &TempDir, content: &Value) -> PathBuf {
    let path = temp_dir.path().join("metadata.json");
    fs::write(&path, serde_json::to_string_pretty(content).unwrap()).expect("Failed to write metadata");
    path
}

fn read_json(path: &PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Failed to read output")).expect("valid JSON")
}

/// Metadata exported from a server whose default category is "abc".
fn exported_metadata() -> Value {
    json!({
        "categoryOptions": [{"id": "opt00000001", "name": "default"}],
        "categories": [{"id": "abc", "name": "default", "categoryOptions": [{"id": "opt00000001"}]}],
        "categoryOptionCombos": [{"id": "coc00000001", "name": "default"}],
        "categoryCombos": [{"id": "cc000000001", "name": "default", "categories": [{"id": "abc"}]}],
        "programRules": [{"id": "rule1", "condition": "#{abc.val}"}]
    })
}

async fn mount_system_info(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/system/info.json"))
        .and(basic_auth("admin", "district"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": "2.32.1",
            "systemName": "Test Server"
        })))
        .mount(server)
        .await;
}

async fn mount_default(server: &MockServer, type_name: &str, ids: &[&str]) {
    let objects: Vec<Value> = ids.iter().map(|id| json!({"id": id, "name": "default"})).collect();
    let mut body = serde_json::Map::new();
    body.insert(type_name.to_string(), Value::Array(objects));

    Mock::given(method("GET"))
        .and(path(format!("/api/{}.json", type_name)))
        .and(query_param("filter", "name:eq:default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Object(body)))
        .mount(server)
        .await;
}

async fn mount_server_defaults(server: &MockServer, category: &str) {
    mount_system_info(server).await;
    mount_default(server, "categoryOptions", &["opt00000001"]).await;
    mount_default(server, "categories", &[category]).await;
    mount_default(server, "categoryOptionCombos", &["coc00000001"]).await;
    mount_default(server, "categoryCombos", &["cc000000001"]).await;
}

// ==================== Default Update Tests ====================

#[tokio::test]
async fn test_update_defaults_repoints_everywhere() {
    let mock_server = MockServer::start().await;
    mount_server_defaults(&mock_server, "xyz").await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &exported_metadata());

    let output = commands::update_defaults(&input, &create_test_config(&mock_server.uri()))
        .await
        .expect("Should succeed")
        .expect("Should write a file");

    assert_eq!(output, temp_dir.path().join("metadata_newDefaults.json"));
    let updated = read_json(&output);
    assert_eq!(updated["categories"][0]["id"], "xyz");
    assert_eq!(updated["categoryCombos"][0]["categories"][0]["id"], "xyz");
    assert_eq!(updated["programRules"][0]["condition"], "#{xyz.val}");
    assert_eq!(updated["categoryOptions"][0]["id"], "opt00000001");

    // Input untouched
    assert_eq!(read_json(&input), exported_metadata());
}

#[tokio::test]
async fn test_update_defaults_output_is_four_space_indented() {
    let mock_server = MockServer::start().await;
    mount_server_defaults(&mock_server, "xyz").await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &exported_metadata());

    let output = commands::update_defaults(&input, &create_test_config(&mock_server.uri()))
        .await
        .unwrap()
        .unwrap();

    let text = fs::read_to_string(output).unwrap();
    assert!(text.starts_with("{\n    \"categoryOptions\": ["));
}

#[tokio::test]
async fn test_update_defaults_already_aligned_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_server_defaults(&mock_server, "abc").await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &exported_metadata());

    let result = commands::update_defaults(&input, &create_test_config(&mock_server.uri()))
        .await
        .expect("Should succeed");

    assert!(result.is_none());
    assert!(!temp_dir.path().join("metadata_newDefaults.json").exists());
}

#[tokio::test]
async fn test_update_defaults_ambiguous_server_default_aborts() {
    let mock_server = MockServer::start().await;
    mount_system_info(&mock_server).await;
    mount_default(&mock_server, "categoryOptions", &["opt00000001"]).await;
    mount_default(&mock_server, "categories", &["xyz", "xyz2"]).await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &exported_metadata());

    let err = commands::update_defaults(&input, &create_test_config(&mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MetadataError>(),
        Some(MetadataError::AmbiguousDefault { found: 2, .. })
    ));
    assert!(!temp_dir.path().join("metadata_newDefaults.json").exists());
}

#[tokio::test]
async fn test_update_defaults_bad_credentials_aborts() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/system/info.json"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &exported_metadata());

    let err = commands::update_defaults(&input, &create_test_config(&mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MetadataError>(),
        Some(MetadataError::BadCredentials)
    ));
}

#[tokio::test]
async fn test_update_defaults_invalid_file_never_contacts_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("metadata.json");
    fs::write(&input, "{ not json").unwrap();

    let err = commands::update_defaults(&input, &create_test_config(&mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<MetadataError>(),
        Some(MetadataError::InvalidJson(_))
    ));
}

// ==================== Translation Swap Tests ====================

fn translated_metadata() -> Value {
    json!({
        "dataElements": [{
            "id": "de1",
            "name": "Health",
            "shortName": "Health",
            "translations": [
                {"locale": "fr", "property": "NAME", "value": "Santé"},
                {"locale": "fr", "property": "SHORT_NAME", "value": "Santé"},
                {"locale": "fr", "property": "FORM_NAME", "value": "Formulaire"}
            ]
        }],
        "categories": [{"id": "abc", "name": "default"}]
    })
}

#[test]
fn test_swap_and_swap_back_through_files() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &translated_metadata());

    let (french, summary) = commands::swap_locale(&input, "en", "fr").expect("Should succeed");
    assert_eq!(summary.swapped, 2);
    assert_eq!(summary.unknown_properties, 1);
    assert_eq!(french, temp_dir.path().join("metadata_fr.json"));

    let swapped = read_json(&french);
    assert_eq!(swapped["dataElements"][0]["name"], "Santé");
    assert_eq!(swapped["dataElements"][0]["translations"][0]["locale"], "en");
    assert_eq!(swapped["dataElements"][0]["translations"][2]["locale"], "fr");

    let (english, _) = commands::swap_locale(&french, "fr", "en").expect("Should succeed");
    assert_eq!(english, temp_dir.path().join("metadata_fr_en.json"));
    assert_eq!(read_json(&english), translated_metadata());
}

#[test]
fn test_locale_report_counts() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_metadata(&temp_dir, &translated_metadata());

    let stats = commands::locale_report(&input).expect("Should succeed");

    assert_eq!(stats.translatable_objects, 1);
    assert_eq!(stats.other_objects, 1);
    assert_eq!(stats.count("fr"), 1);
    assert_eq!(stats.choice_lines(), vec!["fr: 1 objects translated (100.0%)".to_string()]);
}
