//! Action IDs for Cash Flow click targets.
//!
//! Registered during render and dispatched via `InputEvent::Click`.

// ── Core ────────────────────────────────────────────────────────
pub const CLICK_MONEY: u16 = 0;

// ── Tabs ────────────────────────────────────────────────────────
pub const TAB_GAME: u16 = 10;
pub const TAB_BUILDINGS: u16 = 11;
pub const TAB_UPGRADES: u16 = 12;

// ── Panels ──────────────────────────────────────────────────────
pub const OPEN_PROFILE: u16 = 20;
pub const OPEN_SETTINGS: u16 = 21;
pub const CLOSE_PANEL: u16 = 22;
pub const PROFILE_SEC_INFO: u16 = 23;
pub const PROFILE_SEC_LEADERBOARD: u16 = 24;

// ── Name editing ────────────────────────────────────────────────
pub const EDIT_NAME: u16 = 30;
pub const SAVE_NAME: u16 = 31;
pub const CANCEL_NAME: u16 = 32;

// ── Confirmed actions ───────────────────────────────────────────
pub const LOGOUT: u16 = 40;
pub const RESET_PROGRESS: u16 = 41;
pub const CONFIRM_YES: u16 = 42;
pub const CONFIRM_NO: u16 = 43;

// ── Purchases (building: base + index 0..5) ─────────────────────
pub const BUY_BUILDING_BASE: u16 = 100;
pub const BUY_CLICK_UPGRADE: u16 = 200;
