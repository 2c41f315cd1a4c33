#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppConfig`, `AppStateBuilder` and opening the domain details view.

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use zone_console_app::adapters::HistoryNavigator;
use zone_console_app::{AppConfig, AppStateBuilder};
use zone_console_core::error::{CoreError, CoreResult};
use zone_console_core::state::SortKey;
use zone_console_core::traits::{DomainStore, ErrorReporter, InMemoryDomainStore, Manager, UserStore};
use zone_console_core::types::{Domain, DomainId, RecordType, ResourceRecord, User};

const SEED_JSON: &str = r#"[
  {
    "id": 0,
    "name": "maas",
    "displayname": "maas"
  },
  {
    "id": 5,
    "name": "example.com",
    "displayname": "example.com",
    "ttl": 3600,
    "rrsets": [
      { "name": "www", "rrtype": "A", "rrdata": "10.0.0.5", "dnsresource_id": 1, "dnsdata_id": 11 },
      { "name": "node1", "rrtype": "A", "rrdata": "10.0.0.9", "system_id": "abc123" }
    ]
  },
  {
    "id": 7,
    "name": "empty.example",
    "displayname": "empty.example"
  }
]"#;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("failed to write test file");
    path
}

// ===== Mock Implementations =====

#[derive(Default)]
struct CollectingReporter {
    errors: Mutex<Vec<String>>,
}

impl CollectingReporter {
    fn messages(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl ErrorReporter for CollectingReporter {
    fn raise_error(&self, error: &CoreError) {
        self.errors.lock().unwrap().push(error.display_message());
    }
}

/// User store whose load always fails
struct OfflineUserStore;

#[async_trait]
impl Manager for OfflineUserStore {
    fn name(&self) -> &'static str {
        "users"
    }

    async fn load_items(&self) -> CoreResult<()> {
        Err(CoreError::NetworkError("connection refused".to_string()))
    }
}

impl UserStore for OfflineUserStore {
    fn current_user(&self) -> Option<User> {
        None
    }
}

fn example_store() -> Arc<InMemoryDomainStore> {
    let domains: Vec<Domain> = serde_json::from_str(SEED_JSON).unwrap();
    Arc::new(InMemoryDomainStore::with_domains(domains))
}

// ===== AppConfig =====

#[test]
fn config_defaults_when_fields_missing() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_file(tmp.path(), "config.json", "{}");

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.controller.listing_path, "/domains");
    assert_eq!(config.controller.default_sort, SortKey::Name);
    assert!(!config.controller.reset_sort_direction_on_key_change);
    assert!(config.seed_file.is_none());
}

#[test]
fn config_partial_controller_section() {
    let tmp = tempfile::tempdir().unwrap();
    let path = write_file(
        tmp.path(),
        "config.json",
        r#"{ "controller": { "listingPath": "/zones", "defaultSort": "ttl" } }"#,
    );

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.controller.listing_path, "/zones");
    assert_eq!(config.controller.default_sort, SortKey::Ttl);
    assert_eq!(config.controller.loading_title, "Loading...");
}

#[test]
fn config_errors() {
    let tmp = tempfile::tempdir().unwrap();

    let missing = AppConfig::load(&tmp.path().join("nope.json"));
    assert!(matches!(missing, Err(CoreError::ConfigError(_))));

    let path = write_file(tmp.path(), "bad.json", "{ not json");
    assert!(matches!(AppConfig::load(&path), Err(CoreError::ConfigError(_))));
}

#[test]
fn seed_file_resolves_relative_to_base() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "domains.json", SEED_JSON);
    let config = AppConfig {
        seed_file: Some("domains.json".into()),
        ..AppConfig::default()
    };

    let domains = config.load_seed_domains(tmp.path()).unwrap();

    assert_eq!(domains.len(), 3);
    assert_eq!(domains[1].rrsets.len(), 2);
    assert_eq!(domains[1].rrsets[0].rrtype, RecordType::A);
    assert!(domains[1].rrsets[1].is_autogenerated());
}

#[test]
fn bad_seed_file_is_a_storage_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "domains.json", r#"{ "id": 1 }"#);
    let config = AppConfig {
        seed_file: Some("domains.json".into()),
        ..AppConfig::default()
    };

    assert!(matches!(
        config.load_seed_domains(tmp.path()),
        Err(CoreError::StorageError(_))
    ));
}

// ===== AppStateBuilder =====

#[tokio::test]
async fn builder_from_config_seeds_default_store() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "domains.json", SEED_JSON);
    let config_path = write_file(
        tmp.path(),
        "config.json",
        r#"{ "seedFile": "domains.json", "controller": { "loadingTitle": "Please wait" } }"#,
    );
    let config = AppConfig::load(&config_path).unwrap();

    let state = AppStateBuilder::from_config(&config, tmp.path())
        .unwrap()
        .build();

    assert_eq!(state.ctx.config.loading_title, "Please wait");
    assert_eq!(state.ctx.domain_store.list().len(), 3);

    let controller = state.open_domain_details("5").await;
    assert!(controller.is_loaded());
    assert_eq!(controller.chrome().title, "example.com");
}

#[tokio::test]
async fn builder_defaults_without_seed() {
    let state = AppStateBuilder::new().build();

    assert!(state.ctx.domain_store.list().is_empty());
    assert!(!state.ctx.user_store.is_superuser());

    let controller = state.open_domain_details("1").await;
    assert!(!controller.is_loaded());
}

#[tokio::test]
async fn injected_store_wins_over_seed() {
    let store = example_store();
    let state = AppStateBuilder::new()
        .seed_domains(vec![Domain::new(DomainId(9), "ignored.example")])
        .domain_store(store.clone())
        .build();

    assert_eq!(state.ctx.domain_store.list().len(), 3);
}

// ===== Opening the view =====

#[tokio::test]
async fn open_with_bad_route_reports_error() {
    let reporter = Arc::new(CollectingReporter::default());
    let state = AppStateBuilder::new()
        .domain_store(example_store())
        .error_reporter(reporter.clone())
        .build();

    let controller = state.open_domain_details("five").await;

    assert!(!controller.is_loaded());
    assert_eq!(controller.chrome().title, "Loading...");
    assert_eq!(reporter.messages(), ["Invalid domain identifier."]);
}

#[tokio::test]
async fn open_with_failing_user_store_reports_error() {
    let reporter = Arc::new(CollectingReporter::default());
    let state = AppStateBuilder::new()
        .domain_store(example_store())
        .user_store(Arc::new(OfflineUserStore))
        .error_reporter(reporter.clone())
        .build();

    let controller = state.open_domain_details("5").await;

    assert!(!controller.is_loaded());
    let messages = reporter.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("users"));
}

#[tokio::test]
async fn delete_empty_domain_returns_to_listing() {
    let navigator = Arc::new(HistoryNavigator::new("/domains/7"));
    let store = example_store();
    let state = AppStateBuilder::new()
        .domain_store(store.clone())
        .navigator(navigator.clone())
        .build();

    let mut controller = state.open_domain_details("7").await;
    assert!(controller.can_be_deleted());
    assert!(!controller.is_default_domain());

    controller.start_delete_domain().unwrap();
    controller.confirm_delete_domain().await.unwrap();

    assert_eq!(navigator.current_path(), "/domains");
    assert!(store.list().iter().all(|d| d.id != DomainId(7)));
}

#[tokio::test]
async fn custom_listing_path_is_used() {
    let navigator = Arc::new(HistoryNavigator::default());
    let config: AppConfig =
        serde_json::from_str(r#"{ "controller": { "listingPath": "/zones" } }"#).unwrap();
    let state = AppStateBuilder::from_config(&config, Path::new("."))
        .unwrap()
        .domain_store(example_store())
        .navigator(navigator.clone())
        .build();

    let mut controller = state.open_domain_details("7").await;
    controller.start_delete_domain().unwrap();
    controller.confirm_delete_domain().await.unwrap();

    assert_eq!(navigator.history(), ["/", "/zones"]);
}

#[tokio::test]
async fn record_edit_round_trip_through_app_state() {
    let store = example_store();
    let state = AppStateBuilder::new().domain_store(store.clone()).build();
    let mut controller = state.open_domain_details("5").await;

    let www = controller
        .sorted_records()
        .into_iter()
        .find(|r: &ResourceRecord| r.name == "www")
        .unwrap();
    controller.start_edit(&www.key()).unwrap();
    controller.edit_draft_mut().unwrap().ttl = Some(120);
    controller.commit_edit().await.unwrap();

    let domain = store
        .list()
        .into_iter()
        .find(|d| d.id == DomainId(5))
        .unwrap();
    assert_eq!(domain.find_record(&www.key()).and_then(|r| r.ttl), Some(120));
}
