use crate::group::Group;

/// Mutable per-game state. Owned by the controller; discarded when the game ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Currently selected words in selection order. Never holds a solved word.
    pub selected: Vec<String>,
    pub mistakes_remaining: u8,
    /// Solved groups in the order they were found.
    pub completed: Vec<Group>,
    /// Whether the player has shuffled the board this session.
    pub shuffled: bool,
}

impl SessionState {
    pub fn new(max_mistakes: u8) -> Self {
        Self {
            selected: Vec::new(),
            mistakes_remaining: max_mistakes,
            completed: Vec::new(),
            shuffled: false,
        }
    }

    pub fn is_completed(&self, category: &str) -> bool {
        self.completed.iter().any(|group| group.category == category)
    }

    /// A word is locked once its group has been solved.
    pub fn is_locked(&self, word: &str) -> bool {
        self.completed.iter().any(|group| group.contains(word))
    }

    pub fn is_selected(&self, word: &str) -> bool {
        self.selected.iter().any(|selected| selected == word)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Difficulty;

    #[test]
    fn fresh_session_has_full_mistake_budget() {
        let session = SessionState::new(4);

        assert!(session.selected.is_empty());
        assert_eq!(session.mistakes_remaining, 4);
        assert_eq!(session.completed_count(), 0);
        assert!(!session.shuffled);
    }

    #[test]
    fn completed_groups_lock_their_words() {
        let mut session = SessionState::new(4);
        session.completed.push(Group {
            category: "Trees".to_string(),
            difficulty: Difficulty::Hard,
            words: vec![
                "Oak".to_string(),
                "Ash".to_string(),
                "Elm".to_string(),
                "Fir".to_string(),
            ],
        });

        assert!(session.is_completed("Trees"));
        assert!(!session.is_completed("Fish"));
        assert!(session.is_locked("Elm"));
        assert!(!session.is_locked("Pike"));
    }
}
