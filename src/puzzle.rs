use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::group::Group;

/// Number of groups in a puzzle.
pub const GROUP_COUNT: usize = 4;
/// Number of words in every group, and the size of a full selection.
pub const GROUP_SIZE: usize = 4;

/// A validated puzzle: four groups of four words with pairwise disjoint word sets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Puzzle {
    title: Option<String>,
    groups: Vec<Group>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("puzzle must contain exactly {expected} groups but has {found}")]
    WrongGroupCount { expected: usize, found: usize },
    #[error("group \"{category}\" must contain exactly {expected} words but has {found}")]
    WrongWordCount {
        category: String,
        expected: usize,
        found: usize,
    },
    #[error("group categories must not be blank")]
    BlankCategory,
    #[error("group \"{category}\" contains a blank word")]
    BlankWord { category: String },
    #[error("category \"{category}\" appears more than once")]
    DuplicateCategory { category: String },
    #[error("word \"{word}\" appears more than once")]
    DuplicateWord { word: String },
}

#[derive(Debug, thiserror::Error)]
pub enum PuzzleLoadError {
    #[error("failed to read puzzle file at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse puzzle definition: {source}")]
    ParseError { source: serde_json::Error },
    #[error(transparent)]
    Invalid(#[from] PuzzleError),
}

impl PartialEq for PuzzleLoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ReadError { path: left, .. }, Self::ReadError { path: right, .. }) => {
                left == right
            }
            (Self::ParseError { .. }, Self::ParseError { .. }) => true,
            (Self::Invalid(left), Self::Invalid(right)) => left == right,
            _ => false,
        }
    }
}

impl Eq for PuzzleLoadError {}

#[derive(Debug, Clone, serde::Deserialize)]
struct PuzzleFile {
    #[serde(default)]
    title: Option<String>,
    groups: Vec<Group>,
}

impl Puzzle {
    /// Builds a puzzle after checking the shape and disjointness invariants.
    ///
    /// # Errors
    /// Returns the first [`PuzzleError`] found, checking counts before contents.
    pub fn new(title: Option<String>, groups: Vec<Group>) -> Result<Self, PuzzleError> {
        if groups.len() != GROUP_COUNT {
            return Err(PuzzleError::WrongGroupCount {
                expected: GROUP_COUNT,
                found: groups.len(),
            });
        }

        let mut categories = HashSet::new();
        let mut words = HashSet::new();

        for group in &groups {
            if group.category.trim().is_empty() {
                return Err(PuzzleError::BlankCategory);
            }

            if group.words.len() != GROUP_SIZE {
                return Err(PuzzleError::WrongWordCount {
                    category: group.category.clone(),
                    expected: GROUP_SIZE,
                    found: group.words.len(),
                });
            }

            if !categories.insert(group.category.as_str()) {
                return Err(PuzzleError::DuplicateCategory {
                    category: group.category.clone(),
                });
            }

            for word in &group.words {
                if word.trim().is_empty() {
                    return Err(PuzzleError::BlankWord {
                        category: group.category.clone(),
                    });
                }

                if !words.insert(word.as_str()) {
                    return Err(PuzzleError::DuplicateWord { word: word.clone() });
                }
            }
        }

        Ok(Self { title, groups })
    }

    pub fn from_json(json: &str) -> Result<Self, PuzzleLoadError> {
        let parsed: PuzzleFile = serde_json::from_str(json)
            .map_err(|source| PuzzleLoadError::ParseError { source })?;

        Ok(Self::new(parsed.title, parsed.groups)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PuzzleLoadError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| PuzzleLoadError::ReadError {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_json(&data)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Every word in definition order, group by group.
    pub fn all_words(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|group| group.words.iter().cloned())
            .collect()
    }

    pub fn group_for(&self, word: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.contains(word))
    }

    pub fn group_by_category(&self, category: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.category == category)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.group_for(word).is_some()
    }
}
