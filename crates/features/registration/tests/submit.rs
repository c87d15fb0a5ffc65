use confhub_catalog::Catalog;
use confhub_domain::config::{CatalogConfig, RegistrationConfig};
use confhub_domain::constants::{CONFERENCES_KEY, REGISTRATIONS_KEY};
use confhub_domain::{ConferenceId, FormField, RegistrationForm};
use confhub_registration::{Registrar, RegistrationError};
use confhub_storage::Storage;
use std::time::Duration;

const CONFERENCES: &str = r#"[
  {"id": 1, "title": "Rust Day", "description": "Ownership", "category": "Backend",
   "date": "2024-04-20", "location": "Curitiba, PR", "price": 500.0, "spaces": 1},
  {"id": 2, "title": "Sold Out Summit", "description": "Too popular", "category": "DevOps",
   "date": "2024-05-10", "location": "Recife, PE", "price": 0.0, "spaces": 0},
  {"id": 3, "title": "React Day", "description": "Hooks", "category": "Frontend",
   "date": "2024-06-01", "location": "São Paulo, SP", "price": 100.0, "spaces": 10}
]"#;

fn instant(require_profile: bool) -> RegistrationConfig {
    RegistrationConfig { submit_delay_ms: 0, require_profile }
}

fn form() -> RegistrationForm {
    RegistrationForm::new("Ana Souza", "ana@example.com", "(11) 91234-5678")
}

async fn setup(config: RegistrationConfig) -> (Registrar, Catalog, Storage) {
    let storage = Storage::memory();
    storage.set(CONFERENCES_KEY, CONFERENCES).await.unwrap();

    let catalog = Catalog::new(storage.clone(), &CatalogConfig { load_delay_ms: 0, seed: false });
    catalog.load().await.unwrap();

    let registrar = Registrar::new(catalog.clone(), &config).unwrap();
    (registrar, catalog, storage)
}

#[tokio::test(flavor = "current_thread")]
async fn last_space_goes_to_the_first_registrant() {
    let (registrar, catalog, _) = setup(instant(false)).await;

    let first = registrar.submit(ConferenceId(1), form()).await.unwrap();
    assert_eq!(first.conference_id, ConferenceId(1));
    assert_eq!(first.id.len(), 12);

    let second = registrar.submit(ConferenceId(1), form()).await.unwrap_err();
    assert!(matches!(second, RegistrationError::CapacityExhausted { id: ConferenceId(1), .. }));
    assert_eq!(catalog.get(ConferenceId(1)).unwrap().spaces, 0);
    assert_eq!(registrar.registrations().await.unwrap().len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn sold_out_is_reported_before_validation() {
    let (registrar, _, _) = setup(instant(false)).await;

    let err = registrar
        .submit(ConferenceId(2), RegistrationForm::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RegistrationError::CapacityExhausted { .. }));
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_conference_is_not_found() {
    let (registrar, _, _) = setup(instant(false)).await;

    assert!(matches!(registrar.open(ConferenceId(99)), Err(RegistrationError::NotFound { .. })));
    let err = registrar.submit(ConferenceId(99), form()).await.unwrap_err();
    assert!(matches!(err, RegistrationError::NotFound { id: ConferenceId(99), .. }));
    assert_eq!(registrar.open(ConferenceId(3)).unwrap().title, "React Day");
}

#[tokio::test(flavor = "current_thread")]
async fn invalid_form_persists_nothing() {
    let (registrar, catalog, storage) = setup(instant(false)).await;

    let bad = RegistrationForm::new("Al", "ana@", "");
    let err = registrar.submit(ConferenceId(3), bad).await.unwrap_err();

    let errors = err.field_errors().expect("validation error");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get(FormField::Phone), Some("Phone is required"));
    assert!(err.to_string().starts_with("Invalid registration form: name:"));

    assert_eq!(catalog.get(ConferenceId(3)).unwrap().spaces, 10);
    assert!(storage.get(REGISTRATIONS_KEY).await.unwrap().is_none());
    assert!(registrar.registrations().await.unwrap().is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn extended_profile_is_enforced_when_configured() {
    let (registrar, _, _) = setup(instant(true)).await;

    let err = registrar.submit(ConferenceId(3), form()).await.unwrap_err();
    let fields: Vec<_> = err.field_errors().unwrap().fields().collect();
    assert_eq!(fields, [
        FormField::Document,
        FormField::BirthDate,
        FormField::Profession,
        FormField::Company
    ]);

    let complete = form()
        .with_document("123.456.789-09")
        .with_birth_date("15/08/1990")
        .with_profession("Engineer")
        .with_company("Acme")
        .with_dietary_restrictions("Vegetarian");
    let registration = registrar.submit(ConferenceId(3), complete).await.unwrap();
    assert_eq!(registration.form.company.as_deref(), Some("Acme"));
}

#[tokio::test(flavor = "current_thread")]
async fn log_keeps_every_registration_in_order() {
    let (registrar, catalog, storage) = setup(instant(false)).await;

    let first = registrar.submit(ConferenceId(3), form()).await.unwrap();
    let second = registrar
        .submit(ConferenceId(3), RegistrationForm::new("Bruno Lima", "bruno@example.com", "(21) 98765-4321"))
        .await
        .unwrap();
    registrar.submit(ConferenceId(1), form()).await.unwrap();

    let for_three = registrar.registrations_for(ConferenceId(3)).await.unwrap();
    assert_eq!(for_three.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), [
        first.id.as_str(),
        second.id.as_str()
    ]);
    assert_eq!(catalog.get(ConferenceId(3)).unwrap().spaces, 8);

    let raw = storage.get(REGISTRATIONS_KEY).await.unwrap().unwrap();
    assert!(raw.contains("\"conferenceId\":3"));
    assert!(raw.contains("\"createdAt\""));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn submission_takes_the_configured_delay() {
    let (registrar, _, _) = setup(RegistrationConfig::default()).await;
    let started = tokio::time::Instant::now();

    registrar.submit(ConferenceId(3), form()).await.unwrap();
    assert!(started.elapsed() >= Duration::from_secs(1));
}

#[tokio::test(flavor = "current_thread")]
async fn form_fields_are_trimmed_before_saving() {
    let (registrar, _, _) = setup(instant(false)).await;

    let padded = RegistrationForm::new("  Ana Souza  ", " ana@example.com ", "(11) 91234-5678")
        .with_company("   ");
    let registration = registrar.submit(ConferenceId(3), padded).await.unwrap();
    assert_eq!(registration.form.name, "Ana Souza");
    assert_eq!(registration.form.email, "ana@example.com");
    assert_eq!(registration.form.company, None);
}

#[tokio::test(flavor = "current_thread")]
async fn unreadable_log_gives_the_space_back() {
    let (registrar, catalog, storage) = setup(instant(false)).await;
    storage.set(REGISTRATIONS_KEY, "{").await.unwrap();

    let err = registrar.submit(ConferenceId(3), form()).await.unwrap_err();
    assert!(matches!(err, RegistrationError::Serde { .. }));
    assert_eq!(catalog.get(ConferenceId(3)).unwrap().spaces, 10);

    let reloaded = Catalog::new(storage, &CatalogConfig { load_delay_ms: 0, seed: false });
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.get(ConferenceId(3)).unwrap().spaces, 10);
}
