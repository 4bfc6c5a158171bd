use std::collections::HashSet;
use std::fmt;

/// How hard a group is meant to be; drives the color of a solved row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    #[serde(rename = "easy")]
    Easy,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "hard")]
    Hard,
    #[serde(rename = "extremely difficult", alias = "extremely-difficult")]
    ExtremelyDifficult,
}

impl Difficulty {
    /// Stable slug used for CSS classes.
    pub fn slug(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::ExtremelyDifficult => "extremely-difficult",
        }
    }
}

/// A hidden category together with its member words.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Group {
    /// Category label; unique within a puzzle and used as the group's identity.
    pub category: String,
    pub difficulty: Difficulty,
    /// Member words in definition order.
    pub words: Vec<String>,
}

impl Group {
    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|member| member == word)
    }

    pub fn word_set(&self) -> HashSet<&str> {
        self.words.iter().map(String::as_str).collect()
    }

    /// Category followed by its words, as shown when a game is lost.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.category, self.words.join(", "))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.category, self.difficulty.slug())
    }
}
