use std::time::Duration;

/// Which words a shuffle is allowed to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShufflePolicy {
    /// Permute the whole board, completed words included.
    #[default]
    Full,
    /// Keep completed words in their slots and permute the rest.
    PreserveCompleted,
}

/// Tunables for a game session. Every field has a default so partial JSON works.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub max_mistakes: u8,
    pub shuffle_policy: ShufflePolicy,
    /// Pause after a correct guess before the board re-renders or the win is shown.
    pub correct_delay_ms: u64,
    /// Pause after a wrong guess before the selection is cleared.
    pub incorrect_delay_ms: u64,
    /// Extra pause after the selection clears before a loss is revealed.
    pub loss_reveal_delay_ms: u64,
    /// Lifetime of a transient message.
    pub message_ttl_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_mistakes: 4,
            shuffle_policy: ShufflePolicy::Full,
            correct_delay_ms: 1500,
            incorrect_delay_ms: 1000,
            loss_reveal_delay_ms: 500,
            message_ttl_ms: 3000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse game configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("max_mistakes must be at least 1")]
    NoMistakesAllowed,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_mistakes == 0 {
            return Err(ConfigError::NoMistakesAllowed);
        }
        Ok(())
    }

    pub fn correct_delay(&self) -> Duration {
        Duration::from_millis(self.correct_delay_ms)
    }

    pub fn incorrect_delay(&self) -> Duration {
        Duration::from_millis(self.incorrect_delay_ms)
    }

    pub fn loss_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.loss_reveal_delay_ms)
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_millis(self.message_ttl_ms)
    }
}
