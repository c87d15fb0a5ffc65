use confhub_domain::config::{AppConfig, CatalogConfig, ListingConfig, LoggingConfig};
use serde_json::json;
use std::time::Duration;

#[test]
fn config_defaults_are_sane() {
    let listing = ListingConfig::default();
    assert_eq!(listing.page_size, 12);
    assert_eq!(listing.search_debounce(), Duration::from_millis(300));
    assert_eq!(listing.location_debounce(), Duration::from_secs(2));

    let catalog = CatalogConfig::default();
    assert_eq!(catalog.load_delay(), Duration::from_millis(1500));
    assert!(catalog.seed);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.directory.is_none());

    let config = AppConfig::default();
    assert!(config.storage.data_dir.is_none());
    assert_eq!(config.registration.submit_delay(), Duration::from_secs(1));
    assert!(!config.registration.require_profile);
}

#[test]
fn app_config_deserializes_partial_sections() {
    let raw = json!({
        "storage": { "data_dir": "/tmp/confhub", "compression": true },
        "listing": { "page_size": 6 },
        "registration": { "require_profile": true }
    });

    let cfg: AppConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.data_dir.as_deref(), Some(std::path::Path::new("/tmp/confhub")));
    assert!(cfg.storage.compression);
    assert_eq!(cfg.listing.page_size, 6);
    assert_eq!(cfg.listing.location_debounce_ms, 2000);
    assert!(cfg.registration.require_profile);
    assert_eq!(cfg.registration.submit_delay_ms, 1000);
}

#[test]
fn clones_share_until_mutated() {
    let original = AppConfig::default();
    let mut tuned = original.clone();
    tuned.listing.search_debounce_ms = 0;

    assert_eq!(original.listing.search_debounce_ms, 300);
    assert_eq!(tuned.listing.search_debounce(), Duration::ZERO);
}
