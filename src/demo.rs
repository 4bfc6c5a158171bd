use crate::{Difficulty, Group, Puzzle, PuzzleError};

fn group(category: &str, words: [&str; 4]) -> Group {
    Group {
        category: category.to_string(),
        difficulty: Difficulty::ExtremelyDifficult,
        words: words.iter().map(|word| word.to_string()).collect(),
    }
}

fn demo_groups() -> Vec<Group> {
    vec![
        group(
            "Alternate Personas / Eras",
            ["Lizzy Grant", "May Jailer", "Sparkle Jump Rope Queen", "Lanita"],
        ),
        group(
            "American Decay Aesthetic",
            ["Cherry Coke", "Motel Sign", "Gas Station", "Cheerleader Uniform"],
        ),
        group(
            "Daddy Figures / Power Dynamics",
            ["Sugar Daddy", "Pastor’s Son", "Cop", "Record Producer"],
        ),
        group(
            "Spiritual & Mystical Lore",
            ["The Grants", "God Bless America", "California Witches", "Blue Hydrangea"],
        ),
    ]
}

/// The bundled puzzle, used when no puzzle file is available.
pub fn demo_puzzle() -> Result<Puzzle, PuzzleError> {
    Puzzle::new(None, demo_groups())
}
