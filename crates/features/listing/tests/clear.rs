use confhub_catalog::Catalog;
use confhub_domain::config::{CatalogConfig, ListingConfig};
use confhub_listing::{ManualClock, ViewController, ViewState};
use confhub_storage::Storage;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum Input {
    Toggle(&'static str),
    Search(&'static str),
    Location(&'static str),
    Price(Option<u16>, Option<u16>),
    Page(usize),
    Wait(u64),
}

fn arb_input() -> impl Strategy<Value = Input> {
    prop_oneof![
        prop::sample::select(vec!["Frontend", "Backend", "Data"]).prop_map(Input::Toggle),
        prop::sample::select(vec!["", "rust", "summit"]).prop_map(Input::Search),
        prop::sample::select(vec!["", "rio", "sp"]).prop_map(Input::Location),
        (prop::option::of(0u16..900), prop::option::of(0u16..900))
            .prop_map(|(min, max)| Input::Price(min, max)),
        (0usize..3).prop_map(Input::Page),
        (0u64..2500).prop_map(Input::Wait),
    ]
}

fn controller() -> (ViewController, ManualClock) {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
    let catalog = Catalog::new(Storage::memory(), &CatalogConfig { load_delay_ms: 0, seed: true });
    let clock = ManualClock::new();
    let controller =
        ViewController::with_clock(catalog, &ListingConfig::default(), Arc::new(clock.clone()));
    runtime.block_on(controller.load()).unwrap();
    (controller, clock)
}

proptest! {
    #[test]
    fn clear_filters_is_idempotent(inputs in prop::collection::vec(arb_input(), 0..20)) {
        let (controller, clock) = controller();

        for input in inputs {
            match input {
                Input::Toggle(category) => controller.toggle_category(category),
                Input::Search(term) => controller.set_search_term(term),
                Input::Location(location) => controller.set_location(location),
                Input::Price(min, max) => {
                    controller.set_price_range(min.map(f64::from), max.map(f64::from));
                },
                Input::Page(index) => {
                    controller.set_page(index);
                },
                Input::Wait(ms) => {
                    clock.advance(Duration::from_millis(ms));
                    controller.tick();
                },
            }
        }

        controller.clear_filters();
        let once = controller.snapshot();
        controller.clear_filters();
        clock.advance(Duration::from_secs(5));
        controller.tick();
        let twice = controller.snapshot();

        let expected = ViewState { is_loading: false, ..ViewState::default() };
        prop_assert_eq!(&once.state, &expected);
        prop_assert_eq!(&twice.state, &expected);
        prop_assert_eq!(&once.page, &twice.page);
    }
}
