pub mod config;
pub mod controller;
pub mod demo;
pub mod evaluator;
pub mod group;
pub mod notice;
pub mod puzzle;
pub mod session;
pub mod stats;
pub mod store;
pub mod theme;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::{ConfigError, GameConfig, ShufflePolicy};
pub use controller::{
    GameController, GameError, GameOutcome, Hint, Pending, Phase, Selection, Submission,
};
pub use demo::demo_puzzle;
pub use evaluator::{GuessOutcome, evaluate, near_miss, overlap};
pub use group::{Difficulty, Group};
pub use notice::{Notice, Tone};
pub use puzzle::{GROUP_COUNT, GROUP_SIZE, Puzzle, PuzzleError, PuzzleLoadError};
pub use session::SessionState;
pub use stats::Stats;
pub use store::{
    KeyValueStore, MemoryStore, STATS_KEY, StoreError, THEME_KEY, load_stats, load_theme,
    record_outcome, save_stats, save_theme,
};
pub use theme::Theme;
