#![cfg(target_arch = "wasm32")]

use crate::{
    GameConfig, GameController, GameError, GameOutcome, KeyValueStore, Notice, Pending, Phase,
    Puzzle, Stats, StoreError, Theme, demo_puzzle, load_stats, load_theme, record_outcome,
    save_theme,
};
use gloo_net::http::Request;
use js_sys::Reflect;
use leptos::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::prelude::*;

/// Browser `localStorage`.
struct LocalStorage;

fn local_storage() -> Option<web_sys::Storage> {
    leptos::window().local_storage().ok().flatten()
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = local_storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|error| StoreError::WriteFailed {
                key: key.to_string(),
                message: format!("{error:?}"),
            })
    }
}

fn set_body_theme(theme: Theme) {
    if let Some(document) = leptos::window().document() {
        if let Some(body) = document.body() {
            let _ = body.set_attribute("data-theme", theme.as_str());
        }
    }
}

async fn fetch_puzzle() -> Result<Puzzle, String> {
    let response = Request::get("puzzle.json")
        .send()
        .await
        .map_err(|error| error.to_string())?;

    if !response.ok() {
        return Err(format!("puzzle.json returned status {}", response.status()));
    }

    let body = response.text().await.map_err(|error| error.to_string())?;
    Puzzle::from_json(&body).map_err(|error| error.to_string())
}

async fn load_puzzle() -> Result<Puzzle, String> {
    match fetch_puzzle().await {
        Ok(puzzle) => Ok(puzzle),
        Err(message) => {
            log::warn!("falling back to bundled puzzle: {message}");
            demo_puzzle().map_err(|error| error.to_string())
        }
    }
}

async fn start_game() -> Result<GameController, String> {
    let puzzle = load_puzzle().await?;
    GameController::new(puzzle, GameConfig::default(), &mut StdRng::from_entropy())
        .map_err(|error| error.to_string())
}

fn today_label() -> String {
    let options = js_sys::Object::new();
    for (key, value) in [("month", "long"), ("day", "numeric"), ("year", "numeric")] {
        let _ = Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value));
    }

    js_sys::Date::new_0()
        .to_locale_date_string("en-US", &options)
        .into()
}

/// Runs the controller's deferred steps on timers until it is back to
/// selecting or the game has concluded.
fn schedule_settle(game: RwSignal<GameController>, on_finish: Callback<GameOutcome>) {
    let Some(delay) = game.with_untracked(|game| game.pending_delay()) else {
        return;
    };

    set_timeout(
        move || match game.try_update(|game| game.settle()).flatten() {
            Some(outcome) => on_finish.call(outcome),
            None => schedule_settle(game, on_finish),
        },
        delay,
    );
}

#[component]
fn WordTile(
    word: String,
    game: RwSignal<GameController>,
    on_pick: Callback<String>,
) -> impl IntoView {
    let class_word = word.clone();
    let lock_word = word.clone();
    let click_word = word.clone();

    let class = move || {
        game.with(|game| {
            let session = game.session();
            let mut class = String::from("word-tile");

            if let Some(group) = game
                .puzzle()
                .group_for(&class_word)
                .filter(|group| session.is_completed(&group.category))
            {
                class.push_str(" completed ");
                class.push_str(group.difficulty.slug());
            } else if session.is_selected(&class_word) {
                class.push_str(" selected");
                if game.phase() == Phase::Animating(Pending::AfterIncorrect) {
                    class.push_str(" incorrect");
                }
            }

            class
        })
    };

    view! {
        <button
            type="button"
            class=class
            disabled=move || {
                game.with(|game| game.is_over() || game.session().is_locked(&lock_word))
            }
            on:click=move |_| on_pick.call(click_word.clone())
        >
            {word}
        </button>
    }
}

#[component]
fn StatsPanel(stats: ReadSignal<Stats>) -> impl IntoView {
    view! {
        <div class="stats-grid">
            <div class="stat">
                <div class="stat-value">{move || stats.get().games_played}</div>
                <div class="stat-label">"Played"</div>
            </div>
            <div class="stat">
                <div class="stat-value">{move || stats.get().win_percentage()}</div>
                <div class="stat-label">"Win %"</div>
            </div>
            <div class="stat">
                <div class="stat-value">{move || stats.get().games_won}</div>
                <div class="stat-label">"Won"</div>
            </div>
            <div class="stat">
                <div class="stat-value">{move || stats.get().current_streak}</div>
                <div class="stat-label">"Current Streak"</div>
            </div>
        </div>
    }
}

#[component]
fn Modal(
    title: &'static str,
    open: ReadSignal<bool>,
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal" on:click=move |_| on_close.call(())>
                <div class="modal-content" on:click=|event| event.stop_propagation()>
                    <button type="button" class="close" on:click=move |_| on_close.call(())>
                        "×"
                    </button>
                    <h2>{title}</h2>
                    {children()}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn Game(
    controller: GameController,
    set_stats: WriteSignal<Stats>,
    set_stats_open: WriteSignal<bool>,
) -> impl IntoView {
    let message_ttl = controller.config().message_ttl();
    let game = create_rw_signal(controller);
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);
    let (missed, set_missed) = create_signal::<Vec<Notice>>(Vec::new());
    let notice_serial = store_value(0u64);

    let show = move |next: Notice| {
        notice_serial.update_value(|serial| *serial += 1);
        let serial = notice_serial.get_value();
        set_notice.set(Some(next));

        set_timeout(
            move || {
                if notice_serial.get_value() == serial {
                    set_notice.set(None);
                }
            },
            message_ttl,
        );
    };

    let finish = Callback::new(move |outcome: GameOutcome| {
        let updated = record_outcome(&mut LocalStorage, outcome);
        set_stats.set(updated);
        show(Notice::for_outcome(outcome));

        if outcome == GameOutcome::Lost {
            set_missed.set(game.with_untracked(|game| {
                game.missed_groups()
                    .into_iter()
                    .map(Notice::for_missed)
                    .collect()
            }));
        }

        set_stats_open.set(true);
    });

    let on_pick = Callback::new(move |word: String| {
        match game.try_update(|game| game.toggle(&word)) {
            Some(Err(error @ GameError::TooManySelected { .. })) => show(Notice::for_error(&error)),
            Some(Err(error)) => log::debug!("ignored tile click: {error}"),
            _ => {}
        }
    });

    let submit = move |_| match game.try_update(|game| game.submit()) {
        Some(Ok(submission)) => {
            show(Notice::for_submission(&submission));
            schedule_settle(game, finish);
        }
        Some(Err(error)) => show(Notice::for_error(&error)),
        None => {}
    };

    let shuffle = move |_| {
        let mut rng = StdRng::from_entropy();
        if let Some(Err(error)) = game.try_update(|game| game.shuffle(&mut rng)) {
            log::debug!("shuffle ignored: {error}");
        }
    };

    let deselect = move |_| game.update(|game| game.deselect_all());

    let hint = move |_| {
        let mut rng = StdRng::from_entropy();
        let hint = game.with_untracked(|game| game.hint(&mut rng));
        show(Notice::for_hint(hint.as_ref()));
    };

    let dots = move || {
        let (remaining, max) = game.with(|game| {
            (
                game.session().mistakes_remaining,
                game.config().max_mistakes,
            )
        });

        (0..max)
            .map(|index| {
                let class = if index >= remaining {
                    "mistake-dot lost"
                } else {
                    "mistake-dot"
                };
                view! { <span class=class></span> }
            })
            .collect_view()
    };

    view! {
        <section class="game">
            {move || game.with(|game| game.puzzle().title().map(str::to_string))
                .map(|title| view! { <h2 class="puzzle-title">{title}</h2> })}
            <div class="game-grid">
                <For
                    each=move || game.with(|game| game.board().to_vec())
                    key=|word| word.clone()
                    children=move |word: String| {
                        view! { <WordTile word=word game=game on_pick=on_pick /> }
                    }
                />
            </div>
            <div class="mistakes">
                <span>"Mistakes remaining: "</span>
                <span class="mistake-dots">{dots}</span>
            </div>
            <p class=move || {
                notice
                    .get()
                    .map(|notice| format!("message {}", notice.tone.class()))
                    .unwrap_or_else(|| "message".to_string())
            }>
                {move || notice.get().map(|notice| notice.text).unwrap_or_default()}
            </p>
            <ul class="missed-groups">
                {move || {
                    missed
                        .get()
                        .into_iter()
                        .map(|notice| view! { <li class="message info">{notice.text}</li> })
                        .collect_view()
                }}
            </ul>
            <div class="controls">
                <button
                    type="button"
                    class="btn"
                    on:click=shuffle
                    disabled=move || game.with(|game| game.phase() != Phase::Selecting)
                >
                    "Shuffle"
                </button>
                <button
                    type="button"
                    class="btn"
                    on:click=deselect
                    disabled=move || !game.with(|game| game.can_deselect())
                >
                    "Deselect All"
                </button>
                <button
                    type="button"
                    class="btn btn-primary"
                    on:click=submit
                    disabled=move || !game.with(|game| game.can_submit())
                >
                    "Submit"
                </button>
                <button type="button" class="btn" on:click=hint>
                    "Hint"
                </button>
            </div>
        </section>
    }
}

#[component]
fn App() -> impl IntoView {
    let (theme, set_theme) = create_signal(load_theme(&LocalStorage));
    let (stats, set_stats) = create_signal(load_stats(&LocalStorage));
    let (help_open, set_help_open) = create_signal(false);
    let (stats_open, set_stats_open) = create_signal(false);
    let game = create_local_resource(|| (), |_| async { start_game().await });

    create_effect(move |_| {
        let current = theme.get();
        set_body_theme(current);
        if let Err(error) = save_theme(&mut LocalStorage, current) {
            log::warn!("could not persist theme: {error}");
        }
    });

    let toggle_theme = move |_| set_theme.update(|theme| *theme = theme.toggle());

    view! {
        <main class="page">
            <header class="page-header">
                <div>
                    <h1 class="headline">"Connections"</h1>
                    <p class="game-date">{today_label()}</p>
                </div>
                <div class="header-actions">
                    <button
                        type="button"
                        class="pill"
                        title=move || theme.get().toggle_title()
                        on:click=toggle_theme
                    >
                        <span class="theme-icon">{move || theme.get().icon()}</span>
                    </button>
                    <button type="button" class="pill" on:click=move |_| set_help_open.set(true)>
                        "How to play"
                    </button>
                    <button type="button" class="pill" on:click=move |_| set_stats_open.set(true)>
                        "Stats"
                    </button>
                </div>
            </header>

            <p class="lede">"Create four groups of four!"</p>

            {move || match game.get() {
                Some(Ok(controller)) => {
                    view! {
                        <Game
                            controller=controller
                            set_stats=set_stats
                            set_stats_open=set_stats_open
                        />
                    }
                    .into_view()
                }
                Some(Err(message)) => {
                    view! {
                        <section class="error-card">
                            <p class="eyebrow">"Puzzle error"</p>
                            <p class="error-body">{message}</p>
                        </section>
                    }
                    .into_view()
                }
                None => view! { <p class="lede">"Loading puzzle..."</p> }.into_view(),
            }}

            <Modal
                title="How to Play"
                open=help_open
                on_close=Callback::new(move |_| set_help_open.set(false))
            >
                <p>"Find groups of four items that share something in common."</p>
                <ul>
                    <li>"Select four items and tap Submit to check if your guess is correct."</li>
                    <li>"Find the groups without making four mistakes!"</li>
                    <li>"Each puzzle has exactly one solution."</li>
                </ul>
            </Modal>
            <Modal
                title="Statistics"
                open=stats_open
                on_close=Callback::new(move |_| set_stats_open.set(false))
            >
                <StatsPanel stats=stats />
            </Modal>
        </main>
    }
}

/// Installs the panic hook and logger, then mounts the app on `<body>`.
pub fn mount() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    mount_to_body(|| view! { <App /> });
}
