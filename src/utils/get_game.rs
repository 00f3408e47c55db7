use clap::Parser;
use gamehub_backend::{api::CatalogApi, Tracing};

/// Single game lookup utility.
#[derive(Parser)]
struct Opts {
    /// Id of the game to look up.
    #[clap(long)]
    id: i64,

    /// Catalog endpoint URL. Defaults to the APPS_SCRIPT_URL environment
    /// variable.
    #[clap(long)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    Tracing::setup("utils/get_game")?;

    let opts: Opts = Opts::parse();
    let api = match opts.endpoint {
        Some(endpoint) => CatalogApi::new(Some(endpoint)),
        None => CatalogApi::from_env(),
    };

    match api.fetch_game_by_id(opts.id).await {
        Some(game) => {
            let serialized = serde_json::to_string(&game)?;
            println!("{serialized}");
        }
        None => println!("Game {} was not found.", opts.id),
    }

    Ok(())
}
