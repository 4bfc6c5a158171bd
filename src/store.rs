use std::collections::HashMap;

use crate::controller::GameOutcome;
use crate::stats::Stats;
use crate::theme::Theme;

pub const THEME_KEY: &str = "connectionsTheme";
pub const STATS_KEY: &str = "connectionsStats";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("failed to write {key}: {message}")]
    WriteFailed { key: String, message: String },
    #[error("failed to encode {key}: {message}")]
    Encode { key: String, message: String },
}

/// String key-value storage such as browser `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store used natively and in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_stats(store: &impl KeyValueStore) -> Stats {
    store
        .get(STATS_KEY)
        .map(|raw| Stats::from_json_lossy(&raw))
        .unwrap_or_default()
}

pub fn save_stats(store: &mut impl KeyValueStore, stats: &Stats) -> Result<(), StoreError> {
    let encoded = serde_json::to_string(stats).map_err(|error| StoreError::Encode {
        key: STATS_KEY.to_string(),
        message: error.to_string(),
    })?;
    store.set(STATS_KEY, &encoded)
}

/// Read-modify-write of the stats record after a game ends.
///
/// The updated record is returned even when writing it back fails, so the
/// display stays in step with the game just played.
pub fn record_outcome(store: &mut impl KeyValueStore, outcome: GameOutcome) -> Stats {
    let mut stats = load_stats(store);
    stats.record(outcome);

    if let Err(error) = save_stats(store, &stats) {
        log::warn!("could not persist stats: {error}");
    }

    stats
}

pub fn load_theme(store: &impl KeyValueStore) -> Theme {
    Theme::parse_or_default(store.get(THEME_KEY).as_deref())
}

pub fn save_theme(store: &mut impl KeyValueStore, theme: Theme) -> Result<(), StoreError> {
    store.set(THEME_KEY, theme.as_str())
}
