//! Cash Flow game logic: pure functions over [`GameState`].

use super::state::{click_upgrade_cost, BuildingKind, GameState, MAX_NAME_LEN};

/// Manual click: earn the current click power.
pub fn click(state: &mut GameState) {
    state.money += state.click_power as f64;
}

/// Pay one second of passive income. Returns false (and changes nothing)
/// when no building produces anything.
pub fn tick(state: &mut GameState) -> bool {
    let income = state.income_per_second();
    if income > 0.0 {
        state.money += income;
        true
    } else {
        false
    }
}

/// Pay `seconds` of passive income in one step, e.g. after the tab was
/// hidden. Returns false when there is nothing to pay.
pub fn pay_income(state: &mut GameState, seconds: u32) -> bool {
    let income = state.income_per_second();
    if seconds > 0 && income > 0.0 {
        state.money += income * seconds as f64;
        true
    } else {
        false
    }
}

/// Buy one unit of `kind` if affordable. Returns whether the purchase
/// happened; an unaffordable purchase leaves the state untouched.
pub fn purchase_building(state: &mut GameState, kind: BuildingKind) -> bool {
    let cost = state.building(kind).cost();
    if state.money >= cost {
        state.money -= cost;
        let building = state.building_mut(kind);
        building.count = building.count.saturating_add(1);
        true
    } else {
        false
    }
}

/// Raise click power by one if affordable.
pub fn purchase_click_upgrade(state: &mut GameState) -> bool {
    let cost = click_upgrade_cost(state.click_power);
    if state.money >= cost {
        state.money -= cost;
        state.click_power = state.click_power.saturating_add(1);
        true
    } else {
        false
    }
}

/// Wipe all progress, including the player name.
pub fn reset_progress(state: &mut GameState) {
    *state = GameState::new();
}

/// Set the display name, cut to [`MAX_NAME_LEN`] characters.
pub fn rename_player(state: &mut GameState, name: &str) {
    state.player_name = name.chars().take(MAX_NAME_LEN).collect();
}

/// Compact money display: `1.50K`, `2.50M`, `3.00B`, or the floored
/// integer below one thousand.
pub fn format_number(n: f64) -> String {
    if n >= 1e9 {
        format!("{:.2}B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.2}K", n / 1e3)
    } else {
        format!("{}", n.floor() as i64)
    }
}

/// Income per second with one decimal, e.g. `12.3`.
pub fn format_income(n: f64) -> String {
    format!("{:.1}", n)
}
