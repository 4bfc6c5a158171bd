#[cfg(target_arch = "wasm32")]
fn main() {
    connections::wasm::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(message) = terminal::run() {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

/// Line-oriented front end over stdin for playing without a browser.
#[cfg(not(target_arch = "wasm32"))]
mod terminal {
    use std::io::{self, BufRead, Write};
    use std::thread;

    use connections::{
        GameConfig, GameController, MemoryStore, Notice, Puzzle, demo_puzzle, record_outcome,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const HELP: &str = "commands: <word> toggles a word, submit, shuffle, deselect, hint, quit";

    fn load_puzzle() -> Result<Puzzle, String> {
        match std::env::args().nth(1) {
            Some(path) => Puzzle::from_file(&path).map_err(|error| error.to_string()),
            None => demo_puzzle().map_err(|error| error.to_string()),
        }
    }

    fn print_notice(notice: &Notice) {
        println!("[{}] {}", notice.tone.class(), notice.text);
    }

    fn print_board(game: &GameController) {
        let session = game.session();

        for group in &session.completed {
            println!("  ** {}", group.summary());
        }

        let open: Vec<String> = game
            .board()
            .iter()
            .filter(|word| !session.is_locked(word))
            .map(|word| {
                if session.is_selected(word) {
                    format!("[{word}]")
                } else {
                    word.clone()
                }
            })
            .collect();

        for row in open.chunks(4) {
            println!("  {}", row.join(" | "));
        }
        println!(
            "  mistakes remaining: {}",
            "*".repeat(usize::from(session.mistakes_remaining))
        );
    }

    pub fn run() -> Result<(), String> {
        let puzzle = load_puzzle()?;
        let mut rng = StdRng::from_entropy();
        let mut game = GameController::new(puzzle, GameConfig::default(), &mut rng)
            .map_err(|error| error.to_string())?;
        let mut store = MemoryStore::new();

        println!("{HELP}");
        print_board(&game);

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.map_err(|error| error.to_string())?;
            let command = line.trim();

            match command {
                "" => continue,
                "quit" => return Ok(()),
                "deselect" => game.deselect_all(),
                "hint" => print_notice(&Notice::for_hint(game.hint(&mut rng).as_ref())),
                "shuffle" => {
                    if let Err(error) = game.shuffle(&mut rng) {
                        print_notice(&Notice::for_error(&error));
                    }
                }
                "submit" => match game.submit() {
                    Ok(submission) => {
                        print_notice(&Notice::for_submission(&submission));
                        while let Some(delay) = game.pending_delay() {
                            thread::sleep(delay);
                            if let Some(outcome) = game.settle() {
                                print_notice(&Notice::for_outcome(outcome));
                                for group in game.missed_groups() {
                                    print_notice(&Notice::for_missed(group));
                                }
                                let stats = record_outcome(&mut store, outcome);
                                println!(
                                    "played {} | won {} | streak {}",
                                    stats.games_played, stats.games_won, stats.current_streak
                                );
                                return Ok(());
                            }
                        }
                    }
                    Err(error) => print_notice(&Notice::for_error(&error)),
                },
                word => {
                    if let Err(error) = game.toggle(word) {
                        print_notice(&Notice::for_error(&error));
                    }
                }
            }

            print_board(&game);
            print!("> ");
            io::stdout().flush().map_err(|error| error.to_string())?;
        }

        Ok(())
    }
}
