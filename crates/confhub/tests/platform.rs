use confhub::Platform;
use confhub::domain::config::AppConfig;
use confhub::domain::{ConferenceId, RegistrationForm};

fn quick_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.catalog.load_delay_ms = 0;
    config.registration.submit_delay_ms = 0;
    config.listing.search_debounce_ms = 0;
    config
}

#[tokio::test(flavor = "current_thread")]
async fn registration_updates_the_listing() {
    let platform = Platform::bootstrap(&quick_config()).await.unwrap();
    let spaces_of = |platform: &Platform| {
        platform
            .listing()
            .snapshot()
            .page
            .items
            .iter()
            .find(|r| r.id == ConferenceId(1))
            .map(|r| r.spaces)
    };

    let before = spaces_of(&platform).unwrap();
    let form = RegistrationForm::new("Ana Souza", "ana@example.com", "(11) 91234-5678");
    platform.register(ConferenceId(1), form).await.unwrap();

    assert_eq!(spaces_of(&platform), Some(before - 1));
    assert_eq!(platform.registrar().registrations().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn disk_config_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = quick_config();
    config.storage.data_dir = Some(dir.path().to_path_buf());
    config.storage.compression = true;

    let first = Platform::bootstrap(&config).await.unwrap();
    let form = RegistrationForm::new("Bruno Lima", "bruno@example.com", "(21) 98765-4321");
    first.register(ConferenceId(3), form).await.unwrap();
    drop(first);

    let second = Platform::bootstrap(&config).await.unwrap();
    assert!(second.storage().root().is_some());
    assert_eq!(second.registrar().registrations_for(ConferenceId(3)).await.unwrap().len(), 1);
    assert_eq!(second.catalog().get(ConferenceId(3)).unwrap().spaces, 74);
}

#[tokio::test(flavor = "current_thread")]
async fn listing_filters_the_seeded_catalog() {
    let platform = Platform::bootstrap(&quick_config()).await.unwrap();
    let listing = platform.listing();

    listing.toggle_category("Frontend");
    let snapshot = listing.snapshot();
    assert_eq!(snapshot.page.total_count, 3);

    listing.set_search_term("typescript");
    let ids: Vec<_> = listing.snapshot().page.items.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, [2]);

    listing.clear_filters();
    assert_eq!(listing.snapshot().page.total_count, 10);
}
