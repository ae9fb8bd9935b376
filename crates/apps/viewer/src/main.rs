use std::env;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use foundation::ids::ExpeditionId;
use layers::load_all;
use scene::map::MapScene;
use scene::registry::ExpeditionRegistry;
use streaming::http::HttpSource;
use streaming::source::ExpeditionSource;

#[derive(Parser, Debug)]
#[command(author, version, about = "Loads historical expeditions from the data store and reports the resulting map scene")]
struct Args {
    /// Base URL of the expedition data store (default: EXPEDITION_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Expedition ids to load; all stored expeditions when omitted
    #[arg(long = "expedition")]
    expeditions: Vec<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let api_url = args.api_url.unwrap_or_else(|| {
        env::var("EXPEDITION_API_URL")
            .unwrap_or_else(|_| "http://localhost/expeditions/api".to_string())
    });

    let source = HttpSource::new(api_url);
    info!("expedition data store at {}", source.base_url());

    let ids: Vec<ExpeditionId> = if args.expeditions.is_empty() {
        let last = source.last_expedition_id().await?;
        (1..=last).map(ExpeditionId).collect()
    } else {
        args.expeditions.into_iter().map(ExpeditionId).collect()
    };
    if ids.is_empty() {
        warn!("no expeditions to load");
        return Ok(());
    }

    let mut scene = MapScene::new();
    let mut registry = ExpeditionRegistry::new();
    let failures = load_all(&source, &mut scene, &mut registry, &ids).await;

    for entry in registry.legend_entries() {
        info!(
            "legend: expedition {} \"{}\" in {}",
            entry.expedition, entry.name, entry.color
        );
    }
    info!(
        "{} expeditions loaded, {} drawables in the scene",
        registry.len(),
        scene.len()
    );

    if !failures.is_empty() {
        for (expedition, err) in &failures {
            error!("expedition {expedition} failed: {err}");
        }
        return Err(format!("{} of {} expeditions failed to load", failures.len(), ids.len()).into());
    }
    Ok(())
}
