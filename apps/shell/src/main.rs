use confhub::Platform;
use confhub::domain::config::AppConfig;
use confhub::kernel::config::load_config;
use confhub::listing::ListingSnapshot;
use confhub_logger::Logger;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let (config, loaded) = match load_config::<AppConfig>(config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging)?;
    if let Some(err) = loaded {
        warn!(error = %err, "Falling back to the default configuration");
    }

    let platform = Platform::bootstrap(&config).await?;
    let listing = platform.listing();
    report(&listing.snapshot());

    if let Some(category) = listing.categories().first() {
        listing.toggle_category(category);
        report(&listing.snapshot());
    }

    listing.set_search_term("summit");
    listing.settle().await;
    report(&listing.snapshot());

    listing.clear_filters();
    report(&listing.snapshot());

    Ok(())
}

fn report(snapshot: &ListingSnapshot) {
    info!(
        revision = snapshot.revision,
        page = snapshot.page.index + 1,
        pages = snapshot.page.page_count,
        total = snapshot.page.total_count,
        active = ?snapshot.active,
        "Listing"
    );

    for record in &snapshot.page.items {
        info!(
            id = %record.id,
            category = %record.category,
            date = %record.date,
            price = record.price,
            spaces = record.spaces,
            "{}",
            record.title
        );
    }
}
