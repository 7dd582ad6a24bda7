//! Tests for LocalRepository and the repository factory.
//!
//! These cover CRUD, failure modes, concurrent access and seeding from files.

mod support;

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use stay_rust::config::{AppConfig, RepositorySettings};
use stay_rust::db::repository::{BookingRepository, RepositoryError, SettingsRepository};
use stay_rust::db::{LocalRepository, RepositoryFactory};
use stay_rust::models::{BookingId, BookingUpdate, PricingSettings};
use support::{block, with_scoped_env};

#[tokio::test]
async fn test_crud_roundtrip() {
    let repo = LocalRepository::new();
    let id = BookingId::new("a");

    repo.insert_booking(block("a", "2024-07-01", "2024-07-03"))
        .await
        .unwrap();
    assert_eq!(repo.get_booking(&id).await.unwrap().id, id);

    let update = BookingUpdate {
        client_name: Some("Marta".into()),
        paid_amount: Some(20_000),
        ..Default::default()
    };
    let updated = repo.update_booking(&id, &update).await.unwrap();
    assert_eq!(updated.client_name, "Marta");
    assert_eq!(updated.paid_amount, 20_000);

    repo.delete_booking(&id).await.unwrap();
    assert!(repo.get_booking(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_duplicate_insert_conflicts() {
    let repo = LocalRepository::new();
    repo.insert_booking(block("a", "2024-07-01", "2024-07-03"))
        .await
        .unwrap();
    let err = repo
        .insert_booking(block("a", "2024-08-01", "2024-08-03"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ConflictError { .. }));
    assert_eq!(repo.booking_count(), 1);
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let repo = LocalRepository::new();
    let id = BookingId::new("ghost");
    assert!(repo.get_booking(&id).await.unwrap_err().is_not_found());
    assert!(repo
        .update_booking(&id, &BookingUpdate::default())
        .await
        .unwrap_err()
        .is_not_found());
    assert!(repo.delete_booking(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_unhealthy_store_fails_retryably() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    let err = repo.list_bookings().await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.context().operation.as_deref(), Some("list_bookings"));
    assert!(repo.get_pricing().await.is_err());

    repo.set_healthy(true);
    assert!(repo.list_bookings().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pricing_roundtrip_and_clear() {
    let repo = LocalRepository::new();
    let pricing = PricingSettings {
        nightly_price: 40_000,
        last_updated: Utc::now(),
    };
    repo.set_pricing(&pricing).await.unwrap();
    assert_eq!(repo.get_pricing().await.unwrap(), Some(pricing));

    repo.seed(vec![block("a", "2024-07-01", "2024-07-03")]);
    repo.clear();
    assert_eq!(repo.booking_count(), 0);
    assert_eq!(repo.get_pricing().await.unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_inserts() {
    let repo = Arc::new(LocalRepository::new());
    let mut handles = Vec::new();
    for i in 0..20 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo.insert_booking(block(&format!("b{}", i), "2024-07-01", "2024-07-02"))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(repo.booking_count(), 20);
}

#[tokio::test]
async fn test_seed_file_with_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    let err = LocalRepository::from_seed_file(file.path()).err().unwrap();
    assert!(matches!(err, RepositoryError::ConfigurationError { .. }));
}

#[test]
fn test_factory_rejects_unknown_type() {
    let settings = RepositorySettings {
        repo_type: "firestore".into(),
        seed_file: None,
    };
    assert!(matches!(
        RepositoryFactory::from_settings(&settings),
        Err(RepositoryError::ConfigurationError { .. })
    ));
}

#[test]
fn test_config_load_from_env() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\nport = 9000\n\n[admin]\ntoken = \"from-file\"").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let config = with_scoped_env(
        &[
            ("STAY_CONFIG", Some(path.as_str())),
            ("ADMIN_TOKEN", Some("from-env")),
            ("HOST", None),
            ("PORT", None),
            ("CONTACT_PHONE", None),
            ("SITE_UTC_OFFSET", None),
            ("SEED_FILE", None),
        ],
        AppConfig::load,
    )
    .unwrap();

    assert_eq!(config.server.port, 9000);
    assert_eq!(config.admin.token.as_deref(), Some("from-env"));
}
