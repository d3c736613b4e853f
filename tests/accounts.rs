//! Multi-account flows through the public API, backed by `MemoryStore`.

use cash_flow::app::{App, Screen};
use cash_flow::game::save::{load_game, save_game};
use cash_flow::game::state::{BuildingKind, GameState};
use cash_flow::input::InputEvent;
use cash_flow::leaderboard;
use cash_flow::session;
use cash_flow::storage::{game_key, KeyValueStore, MemoryStore};

fn state_with_money(money: f64, name: &str) -> GameState {
    let mut state = GameState::new();
    state.money = money;
    state.player_name = name.to_string();
    state
}

#[test]
fn leaderboard_ranks_all_accounts() {
    let mut store = MemoryStore::new();
    save_game(&mut store, "a@x", &state_with_money(50.0, "A")).unwrap();
    save_game(&mut store, "b@x", &state_with_money(200.0, "")).unwrap();
    save_game(&mut store, "c@x", &state_with_money(10.0, "C")).unwrap();

    let board = leaderboard::recompute(&store).unwrap();
    let emails: Vec<&str> = board.iter().map(|e| e.email.as_str()).collect();
    assert_eq!(emails, ["b@x", "a@x", "c@x"]);
    assert_eq!(board[0].display_name, "Unknown");
}

#[test]
fn reset_survives_reload() {
    let mut store = MemoryStore::new();
    let session = session::login(&mut store, "me@x", "secret").unwrap();
    let mut state = state_with_money(5000.0, "Me");
    state.building_mut(BuildingKind::Factory).count = 3;
    save_game(&mut store, session.email(), &state).unwrap();

    let mut app = App::new(store);
    for key in ['s', 'r', 'y'] {
        app.handle_input(&InputEvent::Key(key));
    }

    let reloaded = load_game(&mut app.store, "me@x");
    assert_eq!(reloaded.money, 0.0);
    assert_eq!(reloaded.count(BuildingKind::Factory), 0);
    assert_eq!(reloaded.click_power, 1);
}

#[test]
fn accounts_keep_separate_progress() {
    let mut store = MemoryStore::new();
    let first = session::login(&mut store, "one@x", "secret").unwrap();
    save_game(&mut store, first.email(), &state_with_money(7.0, "One")).unwrap();
    session::logout(&mut store).unwrap();

    let app = App::new(store);
    assert!(matches!(app.screen, Screen::Login(_)));

    let mut store = app.store;
    let second = session::login(&mut store, "two@x", "secret").unwrap();
    assert_eq!(load_game(&mut store, second.email()).money, 0.0);
    assert_eq!(load_game(&mut store, "one@x").money, 7.0);
}

#[test]
fn corrupt_record_does_not_block_login() {
    let mut store = MemoryStore::new();
    store.set(&game_key("me@x"), "{not json").unwrap();
    session::login(&mut store, "me@x", "secret").unwrap();

    let app = App::new(store);
    match &app.screen {
        Screen::Playing(game) => assert_eq!(game.state.money, 0.0),
        Screen::Login(_) => panic!("session should resume"),
    }
}
