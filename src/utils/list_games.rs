use clap::Parser;
use gamehub_backend::{api::CatalogApi, Tracing};
use itertools::Itertools;

/// Catalog listing utility.
#[derive(Parser)]
struct Opts {
    /// Catalog endpoint URL. Defaults to the APPS_SCRIPT_URL environment
    /// variable; without either the bundled fallback list is printed.
    #[clap(long)]
    endpoint: Option<String>,
}

/// Quickly dump the resolved game catalog as JSON.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/list_games")?;

    let opts: Opts = Opts::parse();
    let api = match opts.endpoint {
        Some(endpoint) => CatalogApi::new(Some(endpoint)),
        None => CatalogApi::from_env(),
    };

    let games = api.fetch_games().await;
    println!(
        "Found {} games.\n{}",
        games.len(),
        games.iter().map(|game| &game.name).join("\n")
    );

    let missing_admin = games.iter().filter(|game| !game.has_admin()).count();
    if missing_admin > 0 {
        println!("{missing_admin} games have no admin link.");
    }

    let serialized = serde_json::to_string(&games)?;
    println!("{serialized}");

    Ok(())
}
