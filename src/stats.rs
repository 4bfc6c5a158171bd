use serde::Deserialize;

use crate::controller::GameOutcome;

/// Cumulative play record kept across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    #[serde(deserialize_with = "lenient_count")]
    pub games_played: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub games_won: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub current_streak: u32,
}

/// Reads one counter, turning `null`, negatives, fractions and overflow into zero
/// without discarding the other counters.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(value
        .as_u64()
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or_else(|| {
            log::warn!("ignoring unusable stats counter: {value}");
            0
        }))
}

impl Stats {
    /// Parses a stored record. Unusable counters read as zero; a record that is
    /// not a JSON object counts as a fresh record.
    pub fn from_json_lossy(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(stats) => stats,
            Err(error) => {
                log::warn!("ignoring malformed stats record: {error}");
                Self::default()
            }
        }
    }

    pub fn record(&mut self, outcome: GameOutcome) {
        self.games_played = self.games_played.saturating_add(1);

        match outcome {
            GameOutcome::Won => {
                self.games_won = self.games_won.saturating_add(1);
                self.current_streak = self.current_streak.saturating_add(1);
            }
            GameOutcome::Lost => self.current_streak = 0,
        }
    }

    /// Share of games won, rounded to a whole percent.
    pub fn win_percentage(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }

        ((f64::from(self.games_won) / f64::from(self.games_played)) * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_extends_streak() {
        let mut stats = Stats::default();
        stats.record(GameOutcome::Won);
        stats.record(GameOutcome::Won);

        assert_eq!(
            stats,
            Stats {
                games_played: 2,
                games_won: 2,
                current_streak: 2
            }
        );
    }

    #[test]
    fn loss_resets_streak_but_counts_the_game() {
        let mut stats = Stats {
            games_played: 3,
            games_won: 3,
            current_streak: 3,
        };
        stats.record(GameOutcome::Lost);

        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.games_won, 3);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.win_percentage(), 75);
    }

    #[test]
    fn missing_keys_default_to_zero() {
        let stats = Stats::from_json_lossy(r#"{ "gamesPlayed": 5 }"#);

        assert_eq!(stats.games_played, 5);
        assert_eq!(stats.games_won, 0);
        assert_eq!(stats.current_streak, 0);
    }

    #[test]
    fn malformed_record_is_treated_as_empty() {
        assert_eq!(Stats::from_json_lossy("not json"), Stats::default());
        assert_eq!(
            Stats::from_json_lossy(r#"{ "gamesPlayed": -1 }"#),
            Stats::default()
        );
    }

    #[test]
    fn bad_counter_keeps_the_others() {
        let stats = Stats::from_json_lossy(
            r#"{ "gamesPlayed": 5, "gamesWon": 3, "currentStreak": null }"#,
        );

        assert_eq!(
            stats,
            Stats {
                games_played: 5,
                games_won: 3,
                current_streak: 0
            }
        );
    }

    #[test]
    fn out_of_range_counters_read_as_zero() {
        let stats = Stats::from_json_lossy(
            r#"{ "gamesPlayed": 4294967296, "gamesWon": 2.5, "currentStreak": "7" }"#,
        );

        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn serializes_with_browser_key_names() {
        let json = serde_json::to_string(&Stats {
            games_played: 1,
            games_won: 1,
            current_streak: 1,
        })
        .expect("stats should serialize");

        assert_eq!(json, r#"{"gamesPlayed":1,"gamesWon":1,"currentStreak":1}"#);
    }

    #[test]
    fn win_percentage_of_no_games_is_zero() {
        assert_eq!(Stats::default().win_percentage(), 0);
    }
}
