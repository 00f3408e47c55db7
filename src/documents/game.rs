use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog entry for an externally hosted game.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub name: String,

    #[serde(default)]
    pub player_link: String,

    #[serde(default)]
    pub admin_link: String,

    #[serde(default)]
    pub admin_pin: String,

    #[serde(default)]
    pub admin_passcode: String,
}

impl Game {
    /// An empty admin link means the game exposes no admin surface. Consumers
    /// must suppress admin affordances for such entries.
    pub fn has_admin(&self) -> bool {
        !self.admin_link.is_empty()
    }

    /// Plaintext comparison against the shared admin passcode gating PIN
    /// visibility.
    pub fn verify_passcode(&self, input: &str) -> bool {
        self.admin_passcode == input
    }

    /// Validates a raw spreadsheet record. Records without a usable name are
    /// rejected. Unparsable ids collapse to 0 rather than failing the record.
    pub fn from_record(record: GameRecord) -> Option<Game> {
        if record.name.trim().is_empty() {
            return None;
        }

        Some(Game {
            id: parse_id(&record.id),
            name: record.name,
            player_link: record.player_link,
            admin_link: record.admin_link.trim().to_owned(),
            admin_pin: record.admin_pin,
            admin_passcode: record.admin_passcode,
        })
    }
}

/// Loosely typed game record as it arrives from the spreadsheet endpoint.
/// Every field is optional on the wire; `id` may be a number or a string.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    #[serde(default)]
    pub id: Value,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub player_link: String,

    #[serde(default)]
    pub admin_link: String,

    #[serde(default)]
    pub admin_pin: String,

    #[serde(default)]
    pub admin_passcode: String,
}

/// Turns raw endpoint records into validated games. Source order is
/// preserved and no deduplication takes place.
pub fn normalize(records: Vec<GameRecord>) -> Vec<Game> {
    records.into_iter().filter_map(Game::from_record).collect()
}

fn parse_id(value: &Value) -> i64 {
    match value {
        Value::Number(num) => num.as_i64().unwrap_or(0),
        Value::String(text) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
