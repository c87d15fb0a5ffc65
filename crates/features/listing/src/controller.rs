use crate::clock::{Clock, SystemClock};
use crate::debounce::Debouncer;
use crate::state::{ListingSnapshot, ViewState};
use chrono::NaiveDate;
use confhub_catalog::{Catalog, CatalogError, compile, paginate};
use confhub_domain::config::ListingConfig;
use confhub_domain::{FilterPatch, FilterSpec, PageRequest, PageResult, PriceRange};
use parking_lot::Mutex;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug)]
struct Controls {
    state: ViewState,
    search: Debouncer<String>,
    location: Debouncer<String>,
    page: PageResult,
    revision: u64,
}

impl Controls {
    fn searching(&self) -> bool {
        self.search.is_pending() || self.location.is_pending()
    }
}

/// The internal shared state of a [`ViewController`].
#[derive(Debug)]
pub struct ControllerInner {
    catalog: Catalog,
    clock: Arc<dyn Clock>,
    page_size: usize,
    controls: Mutex<Controls>,
    snapshots: watch::Sender<Arc<ListingSnapshot>>,
}

/// Owns the list view's filter, search and page state.
///
/// Every state change that affects the visible page recomputes it from the catalog and
/// publishes a new [`ListingSnapshot`] to subscribers. Free-text inputs (search and
/// location) are debounced: the displayed value changes at once, the committed value only
/// after [`tick`](Self::tick) observes that the window has passed.
#[derive(Debug, Clone)]
pub struct ViewController {
    inner: Arc<ControllerInner>,
}

impl Deref for ViewController {
    type Target = ControllerInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ViewController {
    #[must_use]
    pub fn new(catalog: Catalog, config: &ListingConfig) -> Self {
        Self::with_clock(catalog, config, Arc::new(SystemClock))
    }

    #[must_use]
    pub fn with_clock(catalog: Catalog, config: &ListingConfig, clock: Arc<dyn Clock>) -> Self {
        let page_size = PageRequest::first(config.page_size).size;
        let initial = ListingSnapshot::initial(page_size);
        let (snapshots, _) = watch::channel(Arc::new(initial.clone()));

        let controls = Controls {
            state: initial.state,
            search: Debouncer::new(config.search_debounce()),
            location: Debouncer::new(config.location_debounce()),
            page: initial.page,
            revision: 0,
        };

        Self {
            inner: Arc::new(ControllerInner {
                catalog,
                clock,
                page_size,
                controls: Mutex::new(controls),
                snapshots,
            }),
        }
    }

    /// Loads the catalog and renders the first page.
    ///
    /// `is_loading` is `true` until the load finished, successfully or not.
    ///
    /// # Errors
    ///
    /// Propagates the [`CatalogError`] of [`Catalog::load`]; the view then shows an empty
    /// page.
    pub async fn load(&self) -> Result<(), CatalogError> {
        self.update(|controls| {
            controls.state.is_loading = true;
            false
        });

        let result = self.catalog.load().await;

        self.update(|controls| {
            controls.state.is_loading = false;
            true
        });

        result.map(|_| ())
    }

    /// Merges the sidebar filters and jumps back to the first page.
    pub fn set_filter(&self, patch: FilterPatch) {
        self.update(|controls| {
            controls.state.filter.merge(patch);
            controls.state.page_index = 0;
            true
        });
    }

    /// Adds `category` to the accepted set, or removes it if already present.
    pub fn toggle_category(&self, category: &str) {
        self.update(|controls| {
            let categories = &mut controls.state.filter.categories;
            if !categories.remove(category) {
                categories.insert(category.to_owned());
            }
            controls.state.page_index = 0;
            true
        });
    }

    pub fn set_date(&self, date: Option<NaiveDate>) {
        self.set_filter(FilterPatch::date(date));
    }

    /// Updates the search box. The term reaches the filter once the search window passes.
    pub fn set_search_term(&self, value: impl Into<String>) {
        let now = self.clock.now();
        let value = value.into();

        self.update(|controls| {
            controls.state.search_input.clone_from(&value);
            controls.search.push(value, now).is_some_and(|term| commit_search(controls, term))
        });
    }

    /// Updates the location field. The value reaches the filter once the location window
    /// passes.
    pub fn set_location(&self, value: impl Into<String>) {
        let now = self.clock.now();
        let value = value.into();

        self.update(|controls| {
            controls.state.location_input.clone_from(&value);
            controls.location.push(value, now).is_some_and(|loc| commit_location(controls, loc))
        });
    }

    /// Sets the price bounds; reversed bounds are swapped.
    pub fn set_price_range(&self, min: Option<f64>, max: Option<f64>) {
        let price = PriceRange::new(min, max);
        self.update(|controls| {
            controls.state.filter.price = price;
            controls.state.page_index = 0;
            true
        });
    }

    /// Moves to page `index`. Returns `false`, changing nothing, when the page does not exist.
    pub fn set_page(&self, index: usize) -> bool {
        let mut accepted = false;
        self.update(|controls| {
            if index >= controls.page.page_count {
                warn!(index, page_count = controls.page.page_count, "Page out of range");
                return false;
            }
            controls.state.page_index = index;
            accepted = true;
            true
        });
        accepted
    }

    /// Resets filters, inputs and page, dropping pending debounced input.
    pub fn clear_filters(&self) {
        self.update(|controls| {
            controls.search.cancel();
            controls.location.cancel();
            controls.state.filter = FilterSpec::default();
            controls.state.search_input.clear();
            controls.state.location_input.clear();
            controls.state.page_index = 0;
            true
        });
    }

    /// Commits every debounced input whose window has passed.
    ///
    /// Returns `true` when something was committed.
    pub fn tick(&self) -> bool {
        let now = self.clock.now();
        let mut fired = false;

        self.update(|controls| {
            let mut changed = false;
            if let Some(term) = controls.search.poll(now) {
                fired = true;
                changed |= commit_search(controls, term);
            }
            if let Some(location) = controls.location.poll(now) {
                fired = true;
                changed |= commit_location(controls, location);
            }
            changed
        });

        fired
    }

    /// When the next debounced input becomes due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        let controls = self.controls.lock();
        match (controls.search.deadline(), controls.location.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Waits out every pending debounce window and commits the inputs.
    pub async fn settle(&self) {
        while let Some(deadline) = self.next_deadline() {
            self.clock.sleep_until(deadline).await;
            self.tick();
        }
    }

    /// Recomputes the page after the catalog changed underneath (e.g. a registration).
    pub fn refresh(&self) {
        self.update(|_| true);
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<ListingSnapshot>> {
        self.snapshots.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> Arc<ListingSnapshot> {
        self.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.controls.lock().state.clone()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Applies `change`, recomputing when it returns `true`, then publishes a snapshot.
    fn update(&self, change: impl FnOnce(&mut Controls) -> bool) {
        let snapshot = {
            let mut controls = self.controls.lock();
            if change(&mut controls) {
                self.recompute(&mut controls);
            }
            self.snapshot_of(&controls)
        };

        self.snapshots.send_replace(Arc::new(snapshot));
    }

    fn recompute(&self, controls: &mut Controls) {
        let predicate = compile(&controls.state.filter);
        let request = PageRequest::new(controls.state.page_index, self.page_size);

        controls.page = self.catalog.with_records(|records| paginate(records, &predicate, request));
        controls.revision += 1;

        debug!(
            revision = controls.revision,
            page = request.index,
            total = controls.page.total_count,
            "Listing recomputed"
        );
    }

    fn snapshot_of(&self, controls: &Controls) -> ListingSnapshot {
        ListingSnapshot {
            state: controls.state.clone(),
            page: controls.page.clone(),
            active: controls.state.filter.active(),
            categories: self.catalog.categories(),
            searching: controls.searching(),
            revision: controls.revision,
        }
    }
}

fn commit_search(controls: &mut Controls, term: String) -> bool {
    if controls.state.filter.search == term {
        return false;
    }
    controls.state.filter.search = term;
    controls.state.page_index = 0;
    true
}

fn commit_location(controls: &mut Controls, location: String) -> bool {
    if controls.state.filter.location == location {
        return false;
    }
    controls.state.filter.location = location;
    controls.state.page_index = 0;
    true
}
