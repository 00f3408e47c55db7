use serde::{de::DeserializeOwned, Deserialize};
use tracing::{info, instrument, warn};

use crate::documents::{normalize, Game, GameRecord};

use super::{
    fallback::fallback_games,
    transport::{CallbackTransport, DirectTransport, Transport},
};

/// Resolves the game catalog from the spreadsheet-backed endpoint, degrading
/// through the transport chain and finally to the bundled fallback set.
/// Transport trouble never surfaces to callers of the fetch operations.
pub struct CatalogApi {
    endpoint: Option<String>,
    transports: Vec<Box<dyn Transport>>,
}

impl CatalogApi {
    pub fn new(endpoint: Option<String>) -> Self {
        CatalogApi {
            endpoint: endpoint.filter(|url| !url.is_empty()),
            transports: vec![Box::new(DirectTransport), Box::new(CallbackTransport)],
        }
    }

    /// Reads the endpoint from the `APPS_SCRIPT_URL` environment variable.
    /// An unset or empty variable selects offline mode, serving the bundled
    /// fallback set.
    pub fn from_env() -> Self {
        Self::new(std::env::var(ENDPOINT_VAR).ok())
    }

    #[cfg(test)]
    fn with_transports(endpoint: Option<String>, transports: Vec<Box<dyn Transport>>) -> Self {
        CatalogApi {
            endpoint: endpoint.filter(|url| !url.is_empty()),
            transports,
        }
    }

    /// Retrieves all games from the endpoint. Returns the bundled fallback
    /// set when the endpoint is unconfigured or every transport fails. An
    /// endpoint that legitimately serves zero games yields an empty list,
    /// not the fallback set.
    #[instrument(level = "trace", skip(self))]
    pub async fn fetch_games(&self) -> Vec<Game> {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => {
                info!("Catalog endpoint not configured, using fallback games");
                return fallback_games();
            }
        };

        let url = format!("{endpoint}?action={ACTION_GET_GAMES}");
        match self.try_transports::<Vec<GameRecord>>(&url).await {
            Some(records) => {
                let games = normalize(records);
                info!("Fetched {} games from catalog endpoint", games.len());
                games
            }
            None => {
                warn!("All transports failed, using fallback games");
                fallback_games()
            }
        }
    }

    /// Looks up a single game by id. Unlike `fetch_games` there is no
    /// fallback substitution: transport exhaustion reads as absence.
    #[instrument(level = "trace", skip(self))]
    pub async fn fetch_game_by_id(&self, id: i64) -> Option<Game> {
        let endpoint = self.endpoint.as_ref()?;

        let url = format!("{endpoint}?action={ACTION_GET_GAME}&id={id}");
        let record = self.try_transports::<GameRecord>(&url).await?;
        Game::from_record(record)
    }

    /// Connectivity probe for operational tooling. Exercises the same
    /// transport chain against the lightweight ping action.
    #[instrument(level = "trace", skip(self))]
    pub async fn ping(&self) -> bool {
        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint,
            None => return false,
        };

        let url = format!("{endpoint}?action={ACTION_PING}");
        self.try_transports::<serde_json::Value>(&url).await.is_some()
    }

    /// Runs the transport chain in order, stopping at the first envelope the
    /// endpoint marks successful. Transport errors, malformed envelopes and
    /// remote-reported failures all fall through to the next transport.
    async fn try_transports<T>(&self, url: &str) -> Option<T>
    where
        T: DeserializeOwned + Default,
    {
        for transport in &self.transports {
            let payload = match transport.get(url).await {
                Ok(payload) => payload,
                Err(status) => {
                    warn!("Transport '{}' failed: {status}\nurl: {url}", transport.id());
                    continue;
                }
            };

            match serde_json::from_value::<Envelope<T>>(payload) {
                Ok(envelope) if envelope.status == STATUS_SUCCESS => return Some(envelope.data),
                Ok(envelope) => warn!(
                    "Endpoint reported failure via '{}': {}",
                    transport.id(),
                    envelope.message.unwrap_or_default()
                ),
                Err(e) => warn!("Malformed envelope via '{}': {e}", transport.id()),
            }
        }

        None
    }
}

/// Response envelope shared by every endpoint action.
#[derive(Deserialize, Default, Debug)]
struct Envelope<T: Default> {
    #[serde(default)]
    status: String,

    #[serde(default)]
    data: T,

    #[serde(default)]
    message: Option<String>,
}

const ENDPOINT_VAR: &str = "APPS_SCRIPT_URL";

const ACTION_GET_GAMES: &str = "getGames";
const ACTION_GET_GAME: &str = "getGame";
const ACTION_PING: &str = "ping";

const STATUS_SUCCESS: &str = "success";

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::Status;

    use super::*;

    struct FakeTransport {
        response: Option<Value>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeTransport {
        fn serving(response: Value) -> (Box<dyn Transport>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Box::new(FakeTransport {
                    response: Some(response),
                    calls: Arc::clone(&calls),
                }),
                calls,
            )
        }

        fn failing() -> (Box<dyn Transport>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Box::new(FakeTransport {
                    response: None,
                    calls: Arc::clone(&calls),
                }),
                calls,
            )
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        fn id(&self) -> &'static str {
            "fake"
        }

        async fn get(&self, _url: &str) -> Result<Value, Status> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Some(response) => Ok(response.clone()),
                None => Err(Status::internal("fake transport failure")),
            }
        }
    }

    fn endpoint() -> Option<String> {
        Some("https://example.test/exec".to_owned())
    }

    fn success_payload() -> Value {
        json!({
            "status": "success",
            "data": [
                {"id": "7", "name": "word-puzzle", "playerLink": "https://example.test/play"},
                {"id": 8, "name": "  "},
                {"id": 9, "name": "data-guard", "adminLink": " https://example.test/admin "},
            ],
        })
    }

    fn expected_names(games: &[Game]) -> Vec<&str> {
        games.iter().map(|game| game.name.as_str()).collect()
    }

    #[tokio::test]
    async fn unconfigured_endpoint_serves_fallback() {
        let api = CatalogApi::new(None);
        assert_eq!(api.fetch_games().await, fallback_games());

        let api = CatalogApi::new(Some(String::new()));
        assert_eq!(api.fetch_games().await, fallback_games());
    }

    #[tokio::test]
    async fn first_transport_success_skips_the_rest() {
        let (first, _) = FakeTransport::serving(success_payload());
        let (second, second_calls) = FakeTransport::failing();
        let api = CatalogApi::with_transports(endpoint(), vec![first, second]);

        let games = api.fetch_games().await;
        assert_eq!(expected_names(&games), vec!["word-puzzle", "data-guard"]);
        assert_eq!(games[0].id, 7);
        assert_eq!(games[1].admin_link, "https://example.test/admin");
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_transport_covers_for_the_first() {
        let (first, first_calls) = FakeTransport::failing();
        let (second, _) = FakeTransport::serving(success_payload());
        let api = CatalogApi::with_transports(endpoint(), vec![first, second]);

        let games = api.fetch_games().await;
        assert_eq!(expected_names(&games), vec!["word-puzzle", "data-guard"]);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remote_reported_failure_falls_through() {
        let (first, _) =
            FakeTransport::serving(json!({"status": "error", "message": "sheet not found"}));
        let (second, second_calls) = FakeTransport::serving(success_payload());
        let api = CatalogApi::with_transports(endpoint(), vec![first, second]);

        let games = api.fetch_games().await;
        assert_eq!(expected_names(&games), vec!["word-puzzle", "data-guard"]);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exhausted_transports_serve_fallback() {
        let (first, _) = FakeTransport::failing();
        let (second, _) = FakeTransport::failing();
        let api = CatalogApi::with_transports(endpoint(), vec![first, second]);

        assert_eq!(api.fetch_games().await, fallback_games());
    }

    #[tokio::test]
    async fn explicit_empty_catalog_is_not_fallback() {
        let (first, _) = FakeTransport::serving(json!({"status": "success", "data": []}));
        let api = CatalogApi::with_transports(endpoint(), vec![first]);

        assert!(api.fetch_games().await.is_empty());
    }

    #[tokio::test]
    async fn game_lookup_failure_reads_as_absence() {
        let (first, _) = FakeTransport::failing();
        let (second, _) = FakeTransport::failing();
        let api = CatalogApi::with_transports(endpoint(), vec![first, second]);

        assert_eq!(api.fetch_game_by_id(7).await, None);
    }

    #[tokio::test]
    async fn game_lookup_without_endpoint_reads_as_absence() {
        let api = CatalogApi::new(None);
        assert_eq!(api.fetch_game_by_id(1).await, None);
    }

    #[tokio::test]
    async fn game_lookup_normalizes_the_record() {
        let (first, _) = FakeTransport::serving(json!({
            "status": "success",
            "data": {"id": "7", "name": "word-puzzle", "adminLink": "  "},
        }));
        let api = CatalogApi::with_transports(endpoint(), vec![first]);

        let game = api.fetch_game_by_id(7).await.unwrap();
        assert_eq!(game.id, 7);
        assert_eq!(game.name, "word-puzzle");
        assert!(!game.has_admin());
    }

    #[tokio::test]
    async fn ping_follows_the_transport_chain() {
        let (first, _) = FakeTransport::failing();
        let (second, _) = FakeTransport::serving(json!({"status": "success", "message": "pong"}));
        let api = CatalogApi::with_transports(endpoint(), vec![first, second]);
        assert!(api.ping().await);

        let (first, _) = FakeTransport::failing();
        let api = CatalogApi::with_transports(endpoint(), vec![first]);
        assert!(!api.ping().await);

        assert!(!CatalogApi::new(None).ping().await);
    }
}
