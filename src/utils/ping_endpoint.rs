use clap::Parser;
use gamehub_backend::{api::CatalogApi, Tracing};

/// Connectivity probe for the catalog endpoint.
#[derive(Parser)]
struct Opts {
    /// Catalog endpoint URL. Defaults to the APPS_SCRIPT_URL environment
    /// variable.
    #[clap(long)]
    endpoint: Option<String>,

    /// Also run a getGames pass and report what comes back.
    #[clap(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/ping_endpoint")?;

    let opts: Opts = Opts::parse();
    let api = match opts.endpoint {
        Some(endpoint) => CatalogApi::new(Some(endpoint)),
        None => CatalogApi::from_env(),
    };

    match api.ping().await {
        true => println!("Catalog endpoint is reachable."),
        false => {
            println!("Catalog endpoint is not reachable.");
            return Ok(());
        }
    }

    if opts.verbose {
        let games = api.fetch_games().await;
        println!("getGames returned {} games.", games.len());
        if let Some(game) = games.first() {
            println!("Sample game: {}", serde_json::to_string(game)?);
        }
    }

    Ok(())
}
