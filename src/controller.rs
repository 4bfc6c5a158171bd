use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{ConfigError, GameConfig, ShufflePolicy};
use crate::evaluator::{GuessOutcome, evaluate, near_miss};
use crate::group::Group;
use crate::puzzle::{GROUP_COUNT, GROUP_SIZE, Puzzle};
use crate::session::SessionState;

/// Deferred step that runs once the presentation delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// A group was just solved; next comes the win check or a re-render.
    AfterCorrect,
    /// A guess was wrong; the selection is cleared next.
    AfterIncorrect,
    /// The last mistake was used; the loss is revealed next.
    RevealLoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    /// Input is locked until [`GameController::settle`] runs.
    Animating(Pending),
    Won,
    Lost,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Selected,
    Deselected,
}

/// Result of submitting a full selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Either [`GuessOutcome::Correct`] or [`GuessOutcome::Incorrect`].
    pub outcome: GuessOutcome,
    /// The wrong guess had three words from a single unsolved group.
    pub one_away: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub word: String,
}

/// Rejected player actions. The messages are shown to the player as-is.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("You can only select {limit} words at a time!")]
    TooManySelected { limit: usize },
    #[error("Please select exactly {required} words!")]
    SelectionIncomplete { required: usize, selected: usize },
    #[error("\"{word}\" belongs to a group you already found")]
    WordLocked { word: String },
    #[error("\"{word}\" is not part of this puzzle")]
    UnknownWord { word: String },
    #[error("Hold on, the last guess is still being revealed")]
    InputLocked,
    #[error("The game is over")]
    GameOver,
    #[error("Select exactly {required} words to check for a near match")]
    NotThreeSelected { required: usize, selected: usize },
}

/// Owns the session and drives every state transition of a game.
#[derive(Debug, Clone)]
pub struct GameController {
    puzzle: Puzzle,
    config: GameConfig,
    session: SessionState,
    board: Vec<String>,
    phase: Phase,
}

impl GameController {
    /// Starts a game with the board shuffled once.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoMistakesAllowed`] if `config` has no mistake budget.
    pub fn new<R: Rng + ?Sized>(
        puzzle: Puzzle,
        config: GameConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut board = puzzle.all_words();
        board.shuffle(rng);

        Ok(Self {
            session: SessionState::new(config.max_mistakes),
            puzzle,
            config,
            board,
            phase: Phase::Selecting,
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Words in display order.
    pub fn board(&self) -> &[String] {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::Lost)
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Won => Some(GameOutcome::Won),
            Phase::Lost => Some(GameOutcome::Lost),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Selecting && self.session.selected.len() == GROUP_SIZE
    }

    pub fn can_deselect(&self) -> bool {
        self.phase == Phase::Selecting && !self.session.selected.is_empty()
    }

    /// Unsolved groups in definition order.
    pub fn missed_groups(&self) -> Vec<&Group> {
        self.puzzle
            .groups()
            .iter()
            .filter(|group| !self.session.is_completed(&group.category))
            .collect()
    }

    fn ensure_selecting(&self) -> Result<(), GameError> {
        match self.phase {
            Phase::Selecting => Ok(()),
            Phase::Animating(_) => Err(GameError::InputLocked),
            Phase::Won | Phase::Lost => Err(GameError::GameOver),
        }
    }

    /// Adds `word` to the selection, or removes it if already selected.
    pub fn toggle(&mut self, word: &str) -> Result<Selection, GameError> {
        self.ensure_selecting()?;

        if !self.puzzle.contains_word(word) {
            return Err(GameError::UnknownWord {
                word: word.to_string(),
            });
        }

        if self.session.is_locked(word) {
            return Err(GameError::WordLocked {
                word: word.to_string(),
            });
        }

        if let Some(index) = self.session.selected.iter().position(|item| item == word) {
            self.session.selected.remove(index);
            log::debug!("deselected {word}");
            return Ok(Selection::Deselected);
        }

        if self.session.selected.len() >= GROUP_SIZE {
            return Err(GameError::TooManySelected { limit: GROUP_SIZE });
        }

        self.session.selected.push(word.to_string());
        log::debug!("selected {word} ({}/{GROUP_SIZE})", self.session.selected.len());
        Ok(Selection::Selected)
    }

    pub fn deselect_all(&mut self) {
        self.session.selected.clear();
    }

    /// Checks the current selection against the unsolved groups.
    ///
    /// A correct guess records the group and clears the selection at once; a
    /// wrong guess costs one mistake and keeps the selection visible until
    /// [`settle`](Self::settle). Either way the controller enters
    /// [`Phase::Animating`] and rejects input until settled.
    ///
    /// # Errors
    /// * [`GameError::InputLocked`] or [`GameError::GameOver`] outside [`Phase::Selecting`].
    /// * [`GameError::SelectionIncomplete`] unless exactly four words are selected.
    pub fn submit(&mut self) -> Result<Submission, GameError> {
        self.ensure_selecting()?;

        let selected = self.session.selected.len();
        if selected != GROUP_SIZE {
            return Err(GameError::SelectionIncomplete {
                required: GROUP_SIZE,
                selected,
            });
        }

        let outcome = evaluate(
            &self.session.selected,
            self.puzzle.groups(),
            &self.session.completed,
        );

        match &outcome {
            GuessOutcome::Correct(group) => {
                log::debug!("solved {}", group.category);
                self.session.completed.push(group.clone());
                self.session.selected.clear();
                self.phase = Phase::Animating(Pending::AfterCorrect);

                Ok(Submission {
                    outcome,
                    one_away: false,
                })
            }
            _ => {
                let one_away = near_miss(
                    &self.session.selected,
                    self.puzzle.groups(),
                    &self.session.completed,
                )
                .is_some();
                self.session.mistakes_remaining = self.session.mistakes_remaining.saturating_sub(1);
                self.phase = Phase::Animating(Pending::AfterIncorrect);
                log::debug!(
                    "wrong guess, {} mistakes remaining",
                    self.session.mistakes_remaining
                );

                Ok(Submission {
                    outcome: GuessOutcome::Incorrect,
                    one_away,
                })
            }
        }
    }

    /// Reports whether the three selected words are one short of an unsolved group.
    pub fn check_one_away(&self) -> Result<GuessOutcome, GameError> {
        let selected = self.session.selected.len();
        if selected != GROUP_SIZE - 1 {
            return Err(GameError::NotThreeSelected {
                required: GROUP_SIZE - 1,
                selected,
            });
        }

        Ok(evaluate(
            &self.session.selected,
            self.puzzle.groups(),
            &self.session.completed,
        ))
    }

    /// How long the presentation should wait before calling [`settle`](Self::settle).
    pub fn pending_delay(&self) -> Option<Duration> {
        match self.phase {
            Phase::Animating(Pending::AfterCorrect) => Some(self.config.correct_delay()),
            Phase::Animating(Pending::AfterIncorrect) => Some(self.config.incorrect_delay()),
            Phase::Animating(Pending::RevealLoss) => Some(self.config.loss_reveal_delay()),
            _ => None,
        }
    }

    /// Runs the deferred step of the current transition.
    ///
    /// Returns the outcome when this step ends the game. A wrong guess that
    /// uses the last mistake needs two settles: one clears the selection, the
    /// next reveals the loss.
    pub fn settle(&mut self) -> Option<GameOutcome> {
        let Phase::Animating(pending) = self.phase else {
            return None;
        };

        match pending {
            Pending::AfterCorrect => {
                if self.session.completed_count() == GROUP_COUNT {
                    self.phase = Phase::Won;
                    log::info!(
                        "puzzle solved with {} mistakes remaining",
                        self.session.mistakes_remaining
                    );
                    return Some(GameOutcome::Won);
                }
                self.phase = Phase::Selecting;
                None
            }
            Pending::AfterIncorrect => {
                self.session.selected.clear();
                self.phase = if self.session.mistakes_remaining == 0 {
                    Phase::Animating(Pending::RevealLoss)
                } else {
                    Phase::Selecting
                };
                None
            }
            Pending::RevealLoss => {
                self.phase = Phase::Lost;
                log::info!(
                    "out of mistakes with {} of {GROUP_COUNT} groups found",
                    self.session.completed_count()
                );
                Some(GameOutcome::Lost)
            }
        }
    }

    /// Settles every pending step at once, for callers without timers.
    pub fn settle_all(&mut self) -> Option<GameOutcome> {
        let mut outcome = None;
        while matches!(self.phase, Phase::Animating(_)) {
            outcome = self.settle().or(outcome);
        }
        outcome
    }

    /// Randomizes the board order according to the configured [`ShufflePolicy`].
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.ensure_selecting()?;

        match self.config.shuffle_policy {
            ShufflePolicy::Full => self.board.shuffle(rng),
            ShufflePolicy::PreserveCompleted => {
                let open_slots: Vec<usize> = self
                    .board
                    .iter()
                    .enumerate()
                    .filter(|(_, word)| !self.session.is_locked(word))
                    .map(|(index, _)| index)
                    .collect();

                let mut open_words: Vec<String> = open_slots
                    .iter()
                    .map(|index| self.board[*index].clone())
                    .collect();
                open_words.shuffle(rng);

                for (slot, word) in open_slots.into_iter().zip(open_words) {
                    self.board[slot] = word;
                }
            }
        }

        self.session.shuffled = true;
        Ok(())
    }

    /// Picks a random unsolved group, then a random word from it. Never mutates state.
    pub fn hint<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Hint> {
        let remaining = self.missed_groups();
        let group = remaining.choose(rng)?;
        let word = group.words.choose(rng)?;

        Some(Hint { word: word.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Difficulty;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn group(category: &str, words: [&str; 4]) -> Group {
        Group {
            category: category.to_string(),
            difficulty: Difficulty::Medium,
            words: words.iter().map(|word| word.to_string()).collect(),
        }
    }

    fn puzzle() -> Puzzle {
        Puzzle::new(
            None,
            vec![
                group("A", ["a1", "a2", "a3", "a4"]),
                group("B", ["b1", "b2", "b3", "b4"]),
                group("C", ["c1", "c2", "c3", "c4"]),
                group("D", ["d1", "d2", "d3", "d4"]),
            ],
        )
        .expect("test puzzle should validate")
    }

    fn controller(config: GameConfig) -> GameController {
        let mut rng = StdRng::seed_from_u64(11);
        GameController::new(puzzle(), config, &mut rng).expect("config should be valid")
    }

    fn select(game: &mut GameController, words: &[&str]) {
        for word in words {
            game.toggle(word).expect("word should be selectable");
        }
    }

    #[test]
    fn new_game_shuffles_every_word_onto_the_board() {
        let game = controller(GameConfig::default());

        let mut board = game.board().to_vec();
        board.sort();
        let mut expected = puzzle().all_words();
        expected.sort();

        assert_eq!(board, expected);
        assert_eq!(game.phase(), Phase::Selecting);
        assert!(!game.session().shuffled);
    }

    #[test]
    fn toggle_selects_and_deselects() {
        let mut game = controller(GameConfig::default());

        assert_eq!(game.toggle("a1"), Ok(Selection::Selected));
        assert_eq!(game.toggle("b1"), Ok(Selection::Selected));
        assert_eq!(game.toggle("a1"), Ok(Selection::Deselected));
        assert_eq!(game.session().selected, vec!["b1".to_string()]);
    }

    #[test]
    fn fifth_selection_is_rejected() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a1", "b1", "c1", "d1"]);

        assert_eq!(
            game.toggle("a2"),
            Err(GameError::TooManySelected { limit: 4 })
        );
        assert_eq!(game.session().selected.len(), 4);
    }

    #[test]
    fn unknown_word_is_rejected() {
        let mut game = controller(GameConfig::default());

        assert_eq!(
            game.toggle("zz"),
            Err(GameError::UnknownWord {
                word: "zz".to_string()
            })
        );
    }

    #[test]
    fn submit_requires_four_words() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a1", "a2"]);

        assert!(!game.can_submit());
        assert_eq!(
            game.submit(),
            Err(GameError::SelectionIncomplete {
                required: 4,
                selected: 2
            })
        );
        assert_eq!(game.session().mistakes_remaining, 4);
    }

    #[test]
    fn correct_guess_locks_words_and_input_until_settled() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a4", "a2", "a3", "a1"]);

        let submission = game.submit().expect("submission should be accepted");
        assert_eq!(submission.outcome, GuessOutcome::Correct(puzzle().groups()[0].clone()));
        assert!(game.session().selected.is_empty());
        assert_eq!(game.phase(), Phase::Animating(Pending::AfterCorrect));
        assert_eq!(game.pending_delay(), Some(Duration::from_millis(1500)));
        assert_eq!(game.toggle("b1"), Err(GameError::InputLocked));

        assert_eq!(game.settle(), None);
        assert_eq!(game.phase(), Phase::Selecting);
        assert_eq!(
            game.toggle("a1"),
            Err(GameError::WordLocked {
                word: "a1".to_string()
            })
        );
    }

    #[test]
    fn incorrect_guess_costs_a_mistake_and_clears_after_settle() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a1", "a2", "a3", "b1"]);

        let submission = game.submit().expect("submission should be accepted");
        assert_eq!(submission.outcome, GuessOutcome::Incorrect);
        assert!(submission.one_away);
        assert_eq!(game.session().mistakes_remaining, 3);
        assert_eq!(game.session().selected.len(), 4);
        assert_eq!(game.pending_delay(), Some(Duration::from_millis(1000)));

        assert_eq!(game.settle(), None);
        assert!(game.session().selected.is_empty());
        assert_eq!(game.phase(), Phase::Selecting);
    }

    #[test]
    fn scattered_wrong_guess_is_not_one_away() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a1", "a2", "b1", "b2"]);

        let submission = game.submit().expect("submission should be accepted");
        assert!(!submission.one_away);
    }

    #[test]
    fn last_mistake_reveals_loss_on_second_settle() {
        let mut game = controller(GameConfig {
            max_mistakes: 1,
            ..GameConfig::default()
        });
        select(&mut game, &["a1", "b1", "c1", "d1"]);
        game.submit().expect("submission should be accepted");

        assert_eq!(game.settle(), None);
        assert_eq!(game.phase(), Phase::Animating(Pending::RevealLoss));
        assert_eq!(game.pending_delay(), Some(Duration::from_millis(500)));
        assert_eq!(game.settle(), Some(GameOutcome::Lost));
        assert_eq!(game.outcome(), Some(GameOutcome::Lost));
        assert_eq!(game.settle(), None);
    }

    #[test]
    fn check_one_away_needs_three_words() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["c1", "c2", "c4"]);

        assert_eq!(
            game.check_one_away(),
            Ok(GuessOutcome::OneAway {
                category: "C".to_string(),
                missing: "c3".to_string(),
            })
        );

        game.toggle("d1").expect("fourth word should be selectable");
        assert_eq!(
            game.check_one_away(),
            Err(GameError::NotThreeSelected {
                required: 3,
                selected: 4
            })
        );
    }

    #[test]
    fn deselect_all_clears_selection() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a1", "b2"]);
        assert!(game.can_deselect());

        game.deselect_all();
        assert!(game.session().selected.is_empty());
        assert!(!game.can_deselect());
    }

    #[test]
    fn preserve_completed_shuffle_keeps_solved_slots() {
        let mut game = controller(GameConfig {
            shuffle_policy: ShufflePolicy::PreserveCompleted,
            ..GameConfig::default()
        });
        select(&mut game, &["b1", "b2", "b3", "b4"]);
        game.submit().expect("submission should be accepted");
        game.settle();

        let before = game.board().to_vec();
        let mut rng = StdRng::seed_from_u64(5);
        game.shuffle(&mut rng).expect("shuffle should be allowed");

        for (index, word) in before.iter().enumerate() {
            if word.starts_with('b') {
                assert_eq!(&game.board()[index], word);
            }
        }
        assert!(game.session().shuffled);
    }

    #[test]
    fn zero_mistake_budget_is_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        let result = GameController::new(
            puzzle(),
            GameConfig {
                max_mistakes: 0,
                ..GameConfig::default()
            },
            &mut rng,
        );

        assert!(matches!(result, Err(ConfigError::NoMistakesAllowed)));
    }

    #[test]
    fn submit_and_shuffle_wait_for_settle() {
        let mut game = controller(GameConfig::default());
        select(&mut game, &["a1", "b1", "c1", "d1"]);
        game.submit().expect("submission should be accepted");

        let board = game.board().to_vec();
        let mut rng = StdRng::seed_from_u64(17);
        assert_eq!(game.submit(), Err(GameError::InputLocked));
        assert_eq!(game.shuffle(&mut rng), Err(GameError::InputLocked));
        assert_eq!(game.board(), board.as_slice());
        assert_eq!(game.session().mistakes_remaining, 3);
        assert!(!game.session().shuffled);
        assert_eq!(game.phase(), Phase::Animating(Pending::AfterIncorrect));

        game.deselect_all();
        assert!(game.session().selected.is_empty());

        assert_eq!(game.settle(), None);
        assert_eq!(game.phase(), Phase::Selecting);
        assert_eq!(game.shuffle(&mut rng), Ok(()));
    }

    #[test]
    fn shuffle_is_rejected_once_the_game_is_over() {
        let mut game = controller(GameConfig {
            max_mistakes: 1,
            ..GameConfig::default()
        });
        select(&mut game, &["a1", "b1", "c1", "d1"]);
        game.submit().expect("submission should be accepted");
        game.settle_all();

        let before = game.board().to_vec();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(game.shuffle(&mut rng), Err(GameError::GameOver));
        assert_eq!(game.board(), before.as_slice());
    }

    #[test]
    fn hint_comes_from_an_unsolved_group() {
        let mut game = controller(GameConfig::default());
        for solved in [
            ["a1", "a2", "a3", "a4"],
            ["b1", "b2", "b3", "b4"],
            ["c1", "c2", "c3", "c4"],
        ] {
            select(&mut game, &solved);
            game.submit().expect("submission should be accepted");
            game.settle();
        }

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let hint = game.hint(&mut rng).expect("one group remains");
            assert!(hint.word.starts_with('d'));
        }
        assert_eq!(game.session().completed_count(), 3);
        assert_eq!(game.missed_groups().len(), 1);
    }
}
