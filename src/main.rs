mod config;
mod model;
mod pipeline;
mod report;
mod sources;
mod throttle;

use std::time::Duration;

use config::ReportConfig;
use log::info;
use pipeline::filter_members_without_claim;
use report::render_report;
use sources::collect_category_members;
use sources::mediawiki::MediaWikiCatalog;
use throttle::MinIntervalGate;

/// Minimum pause between per-member lookups.
const INTER_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

const PREVIEW_LENGTH: usize = 5;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut clog = colog::default_builder();
    clog.filter(None, log::LevelFilter::Info);
    clog.init();

    let config = ReportConfig::default();
    info!("Fetching artists from category: {}", config.category);

    let catalog = MediaWikiCatalog::new(&config.language);
    let members = collect_category_members(&catalog, &config.category)?;
    info!("Found {} total artists", members.len());

    let gate = MinIntervalGate::new(INTER_REQUEST_INTERVAL);
    let mut missing = filter_members_without_claim(&catalog, &members, &gate);
    info!("Found {} artists without MusicBrainz IDs", missing.len());

    missing.sort_by(|left, right| left.title.cmp(&right.title));

    let html = render_report(&missing, &config.category, &config.language);
    std::fs::write(&config.output_path, html)
        .map_err(|err| format!("Failed to write {}: {err}", config.output_path.display()))?;
    info!("HTML file saved as: {}", config.output_path.display());

    info!("First {PREVIEW_LENGTH} artists without MusicBrainz:");
    for artist in missing.iter().take(PREVIEW_LENGTH) {
        info!("- {} (Wikidata: {})", artist.title, artist.link.status_label());
    }

    Ok(())
}
