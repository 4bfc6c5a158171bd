use crate::controller::{GameError, GameOutcome, Hint, Submission};
use crate::evaluator::GuessOutcome;
use crate::group::Group;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Error => "error",
        }
    }
}

/// A transient message for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: Tone,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Error,
            text: text.into(),
        }
    }

    pub fn for_error(error: &GameError) -> Self {
        Self::error(error.to_string())
    }

    pub fn for_submission(submission: &Submission) -> Self {
        match &submission.outcome {
            GuessOutcome::Correct(group) => Self::success(format!("Correct! {}", group.category)),
            _ if submission.one_away => Self::error("One away..."),
            _ => Self::error("Not quite! Try again."),
        }
    }

    pub fn for_hint(hint: Option<&Hint>) -> Self {
        match hint {
            Some(hint) => Self::info(format!("Hint: One word in this group is \"{}\"", hint.word)),
            None => Self::success("You've completed all groups!"),
        }
    }

    pub fn for_outcome(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Won => {
                Self::success("🎉 Congratulations! You found all four groups! 🎉")
            }
            GameOutcome::Lost => Self::error("Game Over! Better luck next time!"),
        }
    }

    pub fn for_missed(group: &Group) -> Self {
        Self::info(format!("You missed: {}", group.summary()))
    }
}
