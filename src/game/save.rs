//! Per-account save/load.
//!
//! ## Record format
//!
//! Each account's progress is one JSON object under `game_<email>`:
//!
//! ```json
//! {"money": 12.5, "buildings": {"cursor": 3, "worker": 0, ...},
//!  "clickPower": 2, "playerName": "Ann"}
//! ```
//!
//! Every field is optional on load and falls back to its default, so older
//! or partial records still load. Unknown building ids are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::{BuildingKind, GameState};
use crate::console;
use crate::error::Result;
use crate::storage::{game_key, KeyValueStore};

/// Serialized form of [`GameState`].
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct SaveData {
    money: f64,
    buildings: BTreeMap<String, u32>,
    click_power: u32,
    player_name: String,
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        money: state.money,
        buildings: state
            .buildings
            .iter()
            .map(|b| (b.kind.id().to_string(), b.count))
            .collect(),
        click_power: state.click_power,
        player_name: state.player_name.clone(),
    }
}

fn apply_save(save: &SaveData) -> GameState {
    let mut state = GameState::new();
    state.money = save.money;
    for (id, &count) in &save.buildings {
        if let Some(kind) = BuildingKind::from_id(id) {
            state.building_mut(kind).count = count;
        }
    }
    // A missing or zero click power means "never upgraded".
    state.click_power = save.click_power.max(1);
    state.player_name = save.player_name.clone();
    state
}

/// Overwrite the record for `email` with `state`.
pub fn save_game<S: KeyValueStore>(store: &mut S, email: &str, state: &GameState) -> Result<()> {
    let json = serde_json::to_string(&extract_save(state))?;
    store.set(&game_key(email), &json)
}

/// Load the record for `email`, or a fresh [`GameState`] when there is
/// none. A record that cannot be parsed is discarded.
pub fn load_game<S: KeyValueStore>(store: &mut S, email: &str) -> GameState {
    let key = game_key(email);
    let json = match store.get(&key) {
        Ok(Some(j)) => j,
        Ok(None) => return GameState::new(),
        Err(e) => {
            console::warn(&format!("could not read save for {email}: {e}"));
            return GameState::new();
        }
    };

    match serde_json::from_str::<SaveData>(&json) {
        Ok(save) => apply_save(&save),
        Err(e) => {
            console::warn(&format!("discarding unreadable save for {email}: {e}"));
            let _ = store.remove(&key);
            GameState::new()
        }
    }
}
