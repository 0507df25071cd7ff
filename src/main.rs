//! # Multiverse Explorer
//!
//! A scripted browse against the live API, logged through `tracing`:
//! 1.  Open the character list and narrow it with a query.
//! 2.  Follow the first match's origin to its location detail.
//! 3.  Open one resident from the preview.

use multiverse_explorer::framework::HttpTransport;
use multiverse_explorer::lifecycle::{
    setup_tracing, ExplorerConfig, Intent, Navigator, Route, ViewData, ViewSnapshot,
};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ExplorerConfig::from_env().map_err(|e| e.to_string())?;
    info!(base_url = %config.base_url, "Starting explorer");

    let mut navigator = Navigator::new(HttpTransport::new(), config);

    let span = tracing::info_span!("character_list");
    let origin = async {
        navigator.open(Route::Characters).await;
        navigator.handle(Intent::SetQuery("smith".into())).await;
        let snapshot = navigator.snapshot();
        report(snapshot.as_ref());

        match snapshot.and_then(|s| s.data) {
            Some(ViewData::Characters { items, .. }) => items
                .first()
                .and_then(|c| Route::from_reference(&c.origin)),
            _ => None,
        }
    }
    .instrument(span)
    .await;

    let Some(origin) = origin else {
        warn!("No navigable origin to follow");
        return Ok(());
    };

    let span = tracing::info_span!("location_detail");
    let resident = async {
        navigator.open(origin).await;
        let snapshot = navigator.snapshot();
        report(snapshot.as_ref());

        match snapshot.and_then(|s| s.data) {
            Some(ViewData::Location(detail)) => detail.residents.resolved().next().map(|c| c.id),
            _ => None,
        }
    }
    .instrument(span)
    .await;

    if let Some(id) = resident {
        navigator.handle(Intent::NavigateToCharacter(id)).await;
        report(navigator.snapshot().as_ref());
    }

    navigator.close();
    info!("Explorer finished");
    Ok(())
}

fn report(snapshot: Option<&ViewSnapshot>) {
    let Some(snapshot) = snapshot else {
        warn!("No view mounted");
        return;
    };
    if let Some(message) = &snapshot.error {
        error!(route = %snapshot.route, %message, "View failed");
        return;
    }
    match &snapshot.data {
        Some(ViewData::Characters { items, total_count, .. }) => {
            let window = snapshot.page_window.as_ref().map(|w| w.pages.clone()).unwrap_or_default();
            info!(shown = items.len(), total_count, ?window, "Characters");
            for c in items {
                info!(id = c.id, name = %c.name, status = %c.status, origin = %c.origin.display_name, "Character");
            }
        }
        Some(ViewData::Locations { items, total_count }) => {
            info!(shown = items.len(), total_count, "Locations");
        }
        Some(ViewData::Character(c)) => {
            info!(
                id = c.id,
                name = %c.name,
                species = %c.species,
                kind = c.display_type(),
                episodes = c.episode_count(),
                "Character detail"
            );
        }
        Some(ViewData::Location(detail)) => {
            info!(
                name = %detail.location.name,
                dimension = %detail.location.dimension,
                residents = detail.resident_count(),
                shown = detail.residents.resolved_count(),
                unresolved = detail.residents.unresolved_count(),
                more = detail.residents.remaining(),
                created = %detail.created_date(),
                "Location detail"
            );
        }
        None => info!(route = %snapshot.route, status = ?snapshot.status, "No data"),
    }
}
