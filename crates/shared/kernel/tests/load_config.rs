use confhub_kernel::config::load_config;
use confhub_kernel::domain::config::AppConfig;
use serial_test::serial;
use std::fs;

fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("confhub.toml");
    fs::write(&path, body).expect("write config");
    path
}

#[test]
#[serial]
fn reads_sections_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        &dir,
        r#"
[listing]
page_size = 6
search_debounce_ms = 0

[registration]
require_profile = true

[logging]
level = "debug"
"#,
    );

    let cfg: AppConfig = load_config(Some(&path)).expect("config loads");
    assert_eq!(cfg.listing.page_size, 6);
    assert_eq!(cfg.listing.search_debounce_ms, 0);
    assert_eq!(cfg.listing.location_debounce_ms, 2000);
    assert!(cfg.registration.require_profile);
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.catalog.load_delay_ms, 1500);
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config::<AppConfig>(Some(dir.path().join("absent.toml")));
    let err = result.expect_err("file is required");
    assert!(err.to_string().starts_with("Config error (Failed to build config)"));
}
