//! Pure guess evaluation against the hidden groups.

use std::collections::HashSet;

use crate::group::Group;
use crate::puzzle::GROUP_SIZE;

/// Result of checking a selection against the puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The selection is exactly the word set of an unsolved group.
    Correct(Group),
    /// A full selection that matches no unsolved group, or a three-word
    /// selection that is not one word short of any.
    Incorrect,
    /// Three selected words all belong to `category`; `missing` completes it.
    OneAway { category: String, missing: String },
    /// The selection size is neither a full guess nor a near-match check.
    InvalidCount { selected: usize },
}

/// Number of selected words that belong to `group`.
pub fn overlap(selection: &[String], group: &Group) -> usize {
    let unique: HashSet<&str> = selection.iter().map(String::as_str).collect();
    unique.iter().filter(|word| group.contains(word)).count()
}

fn is_completed(group: &Group, completed: &[Group]) -> bool {
    completed
        .iter()
        .any(|done| done.category == group.category)
}

/// Classifies `selection` against the unsolved `groups`.
///
/// Four words are compared as a set with each group; three words are checked
/// for a near match. Groups already in `completed` never match.
pub fn evaluate(selection: &[String], groups: &[Group], completed: &[Group]) -> GuessOutcome {
    let selected: HashSet<&str> = selection.iter().map(String::as_str).collect();

    if selection.len() == GROUP_SIZE {
        let found = groups
            .iter()
            .filter(|group| !is_completed(group, completed))
            .find(|group| group.word_set() == selected);

        return match found {
            Some(group) => GuessOutcome::Correct(group.clone()),
            None => GuessOutcome::Incorrect,
        };
    }

    if selection.len() == GROUP_SIZE - 1 {
        for group in groups.iter().filter(|group| !is_completed(group, completed)) {
            if overlap(selection, group) != GROUP_SIZE - 1 {
                continue;
            }

            if let Some(missing) = group
                .words
                .iter()
                .find(|word| !selected.contains(word.as_str()))
            {
                return GuessOutcome::OneAway {
                    category: group.category.clone(),
                    missing: missing.clone(),
                };
            }
        }

        return GuessOutcome::Incorrect;
    }

    GuessOutcome::InvalidCount {
        selected: selection.len(),
    }
}

/// For a full selection, the unsolved group that shares all but one word with it.
pub fn near_miss<'a>(
    selection: &[String],
    groups: &'a [Group],
    completed: &[Group],
) -> Option<&'a Group> {
    if selection.len() != GROUP_SIZE {
        return None;
    }

    groups
        .iter()
        .filter(|group| !is_completed(group, completed))
        .find(|group| overlap(selection, group) == GROUP_SIZE - 1)
}
