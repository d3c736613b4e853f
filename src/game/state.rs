//! Cash Flow game state definitions.

/// Price multiplier applied per owned unit of a building.
pub const BUILDING_COST_GROWTH: f64 = 1.15;

/// Price of the first click upgrade.
pub const CLICK_UPGRADE_BASE_COST: f64 = 1000.0;

/// Price multiplier per click-power level.
pub const CLICK_UPGRADE_COST_GROWTH: f64 = 1.1;

/// Longest player name accepted, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// The six purchasable buildings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildingKind {
    Cursor,
    Worker,
    Factory,
    Robot,
    Ai,
    Spaceship,
}

impl BuildingKind {
    /// All buildings in display order.
    pub fn all() -> &'static [BuildingKind] {
        &[
            BuildingKind::Cursor,
            BuildingKind::Worker,
            BuildingKind::Factory,
            BuildingKind::Robot,
            BuildingKind::Ai,
            BuildingKind::Spaceship,
        ]
    }

    /// Position in [`BuildingKind::all`].
    pub fn index(&self) -> usize {
        match self {
            BuildingKind::Cursor => 0,
            BuildingKind::Worker => 1,
            BuildingKind::Factory => 2,
            BuildingKind::Robot => 3,
            BuildingKind::Ai => 4,
            BuildingKind::Spaceship => 5,
        }
    }

    /// Stable identifier used as the key in saved records.
    pub fn id(&self) -> &'static str {
        match self {
            BuildingKind::Cursor => "cursor",
            BuildingKind::Worker => "worker",
            BuildingKind::Factory => "factory",
            BuildingKind::Robot => "robot",
            BuildingKind::Ai => "ai",
            BuildingKind::Spaceship => "spaceship",
        }
    }

    pub fn from_id(id: &str) -> Option<BuildingKind> {
        BuildingKind::all().iter().copied().find(|k| k.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuildingKind::Cursor => "Cursor",
            BuildingKind::Worker => "Worker",
            BuildingKind::Factory => "Factory",
            BuildingKind::Robot => "Robot",
            BuildingKind::Ai => "AI",
            BuildingKind::Spaceship => "Spaceship",
        }
    }

    /// Cost of the first unit.
    pub fn base_cost(&self) -> f64 {
        match self {
            BuildingKind::Cursor => 15.0,
            BuildingKind::Worker => 100.0,
            BuildingKind::Factory => 1_000.0,
            BuildingKind::Robot => 10_000.0,
            BuildingKind::Ai => 100_000.0,
            BuildingKind::Spaceship => 1_000_000.0,
        }
    }

    /// Money per second per unit.
    pub fn base_income(&self) -> f64 {
        match self {
            BuildingKind::Cursor => 0.1,
            BuildingKind::Worker => 1.0,
            BuildingKind::Factory => 10.0,
            BuildingKind::Robot => 100.0,
            BuildingKind::Ai => 1_000.0,
            BuildingKind::Spaceship => 10_000.0,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            BuildingKind::Cursor => "👆",
            BuildingKind::Worker => "👷",
            BuildingKind::Factory => "🏭",
            BuildingKind::Robot => "🤖",
            BuildingKind::Ai => "🧠",
            BuildingKind::Spaceship => "🚀",
        }
    }

    /// Key that buys this building on the Buildings tab ('1'..'6').
    pub fn key(&self) -> char {
        (b'1' + self.index() as u8) as char
    }
}

/// Cost of the next unit of `kind` when `owned` are already owned.
pub fn building_cost(kind: BuildingKind, owned: u32) -> f64 {
    kind.base_cost() * BUILDING_COST_GROWTH.powf(owned as f64)
}

/// Cost of raising click power from `click_power` to `click_power + 1`.
pub fn click_upgrade_cost(click_power: u32) -> f64 {
    CLICK_UPGRADE_BASE_COST * CLICK_UPGRADE_COST_GROWTH.powf(click_power.saturating_sub(1) as f64)
}

/// Owned units of one building type.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    pub kind: BuildingKind,
    pub count: u32,
}

impl Building {
    pub fn new(kind: BuildingKind) -> Self {
        Self { kind, count: 0 }
    }

    /// Current cost to buy the next one.
    pub fn cost(&self) -> f64 {
        building_cost(self.kind, self.count)
    }

    /// Money per second from all owned units.
    pub fn income(&self) -> f64 {
        self.count as f64 * self.kind.base_income()
    }
}

/// Persistent progress of one account.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub money: f64,
    /// One entry per [`BuildingKind`], in [`BuildingKind::all`] order.
    pub buildings: Vec<Building>,
    /// Money per manual click. Starts at 1.
    pub click_power: u32,
    /// Display name shown on the leaderboard. Empty when unset.
    pub player_name: String,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            money: 0.0,
            buildings: BuildingKind::all().iter().map(|k| Building::new(*k)).collect(),
            click_power: 1,
            player_name: String::new(),
        }
    }

    pub fn building(&self, kind: BuildingKind) -> &Building {
        &self.buildings[kind.index()]
    }

    pub fn building_mut(&mut self, kind: BuildingKind) -> &mut Building {
        &mut self.buildings[kind.index()]
    }

    pub fn count(&self, kind: BuildingKind) -> u32 {
        self.building(kind).count
    }

    /// Total money per second from every building.
    pub fn income_per_second(&self) -> f64 {
        self.buildings.iter().map(Building::income).sum()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_defaults() {
        let s = GameState::new();
        assert_eq!(s.money, 0.0);
        assert_eq!(s.click_power, 1);
        assert!(s.player_name.is_empty());
        assert_eq!(s.buildings.len(), 6);
        assert!(s.buildings.iter().all(|b| b.count == 0));
    }

    #[test]
    fn buildings_in_catalog_order() {
        let s = GameState::new();
        for (i, b) in s.buildings.iter().enumerate() {
            assert_eq!(b.kind.index(), i);
        }
    }

    #[test]
    fn id_roundtrip() {
        for kind in BuildingKind::all() {
            assert_eq!(BuildingKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(BuildingKind::from_id("grandma"), None);
    }

    #[test]
    fn first_unit_costs_base() {
        for kind in BuildingKind::all() {
            assert_eq!(building_cost(*kind, 0), kind.base_cost());
        }
    }

    #[test]
    fn click_upgrade_first_cost() {
        assert!((click_upgrade_cost(1) - 1000.0).abs() < 1e-9);
        assert!((click_upgrade_cost(2) - 1100.0).abs() < 1e-9);
    }

    #[test]
    fn costs_keep_growing_past_i32_range() {
        let big = i32::MAX as u32 + 10;
        assert!(click_upgrade_cost(big) > click_upgrade_cost(1_000));
        assert!(building_cost(BuildingKind::Cursor, big) > building_cost(BuildingKind::Cursor, 100));
        assert_eq!(click_upgrade_cost(0), click_upgrade_cost(1));
    }

    #[test]
    fn income_sums_all_buildings() {
        let mut s = GameState::new();
        s.building_mut(BuildingKind::Cursor).count = 10; // 1.0
        s.building_mut(BuildingKind::Factory).count = 2; // 20.0
        assert!((s.income_per_second() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn keys_are_one_through_six() {
        let keys: String = BuildingKind::all().iter().map(|k| k.key()).collect();
        assert_eq!(keys, "123456");
    }
}
