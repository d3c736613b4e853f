//! Cash Flow: click for money, buy buildings and let the income roll in.

pub mod actions;
pub mod logic;
pub mod render;
pub mod save;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::console;
use crate::input::{ClickState, InputEvent};
use crate::leaderboard::{self, LeaderboardEntry};
use crate::session::{self, Session};
use crate::storage::KeyValueStore;
use crate::time::{SaveSchedule, Timing};

use actions::*;
use state::{BuildingKind, GameState, MAX_NAME_LEN};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tab {
    Game,
    Buildings,
    Upgrades,
}

/// Panel shown in place of the tabs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Panel {
    None,
    Profile,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProfileSection {
    Info,
    Leaderboard,
}

/// A destructive action waiting for a yes/no answer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Confirm {
    Logout,
    Reset,
}

/// Whether the latest progress has reached the store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyncStatus {
    Synced,
    Saving,
    Failed,
}

impl SyncStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::Saving => "saving…",
            SyncStatus::Failed => "save failed",
        }
    }
}

/// What the app should do after an input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputOutcome {
    Ignored,
    Consumed,
    /// The session ended; return to the login screen.
    LoggedOut,
}

pub struct CashFlowGame {
    pub session: Session,
    pub state: GameState,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub sync: SyncStatus,
    pub tab: Tab,
    pub panel: Panel,
    pub profile_section: ProfileSection,
    /// Name being typed, while the name editor is open.
    pub name_draft: Option<String>,
    pub confirm: Option<Confirm>,
    schedule: SaveSchedule,
    /// A tracked mutation happened since the last `advance`.
    dirty: bool,
}

impl CashFlowGame {
    pub fn new<S: KeyValueStore>(session: Session, store: &mut S) -> Self {
        Self::with_timing(session, store, Timing::default())
    }

    pub fn with_timing<S: KeyValueStore>(session: Session, store: &mut S, timing: Timing) -> Self {
        let state = save::load_game(store, session.email());
        let mut game = Self {
            session,
            state,
            leaderboard: Vec::new(),
            sync: SyncStatus::Synced,
            tab: Tab::Game,
            panel: Panel::None,
            profile_section: ProfileSection::Info,
            name_draft: None,
            confirm: None,
            schedule: SaveSchedule::new(timing),
            dirty: false,
        };
        game.refresh_leaderboard(store);
        game
    }

    /// Drive the timers: pay passive income, then run whichever saves are
    /// due. `now_ms` is wall-clock time in milliseconds.
    pub fn advance<S: KeyValueStore>(&mut self, now_ms: f64, store: &mut S) {
        let ticks = self.schedule.income.update(now_ms);
        let paid = match ticks {
            0 => false,
            1 => logic::tick(&mut self.state),
            n => logic::pay_income(&mut self.state, n),
        };
        if paid {
            self.dirty = true;
        }

        if self.dirty {
            self.dirty = false;
            self.schedule.mark_changed(now_ms);
            self.sync = SyncStatus::Saving;
        }

        if self.schedule.save_due(now_ms) {
            self.save(store);
        }
    }

    /// Persist now and refresh the leaderboard.
    pub fn save<S: KeyValueStore>(&mut self, store: &mut S) {
        match save::save_game(store, self.session.email(), &self.state) {
            Ok(()) => {
                self.sync = SyncStatus::Synced;
                self.refresh_leaderboard(store);
            }
            Err(e) => {
                console::warn(&format!("save failed: {e}"));
                self.sync = SyncStatus::Failed;
            }
        }
    }

    pub fn refresh_leaderboard<S: KeyValueStore>(&mut self, store: &S) {
        match leaderboard::recompute(store) {
            Ok(board) => self.leaderboard = board,
            Err(e) => console::warn(&format!("leaderboard scan failed: {e}")),
        }
    }

    pub fn handle_input<S: KeyValueStore>(
        &mut self,
        event: &InputEvent,
        store: &mut S,
    ) -> InputOutcome {
        if self.confirm.is_some() {
            return self.handle_confirm(event, store);
        }
        if self.name_draft.is_some() {
            if let Some(outcome) = self.handle_name_edit(event, store) {
                return outcome;
            }
        }

        match event {
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
            InputEvent::Escape if self.panel != Panel::None => {
                self.panel = Panel::None;
                InputOutcome::Consumed
            }
            _ => InputOutcome::Ignored,
        }
    }

    fn handle_key(&mut self, key: char) -> InputOutcome {
        let consumed = match (self.panel, key) {
            (_, 'p') => self.toggle_panel(Panel::Profile),
            (_, 's') => self.toggle_panel(Panel::Settings),

            (Panel::Profile, 'i') => self.show_section(ProfileSection::Info),
            (Panel::Profile, 'l') => self.show_section(ProfileSection::Leaderboard),
            (Panel::Profile, 'n') if self.profile_section == ProfileSection::Info => {
                self.start_name_edit()
            }
            (Panel::Profile, 'o') => self.ask(Confirm::Logout),
            (Panel::Settings, 'r') => self.ask(Confirm::Reset),

            (Panel::None, 'g') => self.show_tab(Tab::Game),
            (Panel::None, 'b') => self.show_tab(Tab::Buildings),
            (Panel::None, 'u') => self.show_tab(Tab::Upgrades),
            (Panel::None, 'c' | ' ') if self.tab == Tab::Game => self.click(),
            (Panel::None, '1'..='6') if self.tab == Tab::Buildings => {
                let idx = (key as u8 - b'1') as usize;
                self.buy_building(BuildingKind::all()[idx])
            }
            (Panel::None, '1') if self.tab == Tab::Upgrades => self.buy_click_upgrade(),
            _ => false,
        };
        if consumed {
            InputOutcome::Consumed
        } else {
            InputOutcome::Ignored
        }
    }

    fn handle_click(&mut self, action_id: u16) -> InputOutcome {
        let consumed = match action_id {
            CLICK_MONEY => self.click(),
            TAB_GAME => self.show_tab(Tab::Game),
            TAB_BUILDINGS => self.show_tab(Tab::Buildings),
            TAB_UPGRADES => self.show_tab(Tab::Upgrades),
            OPEN_PROFILE => self.toggle_panel(Panel::Profile),
            OPEN_SETTINGS => self.toggle_panel(Panel::Settings),
            CLOSE_PANEL => {
                self.panel = Panel::None;
                true
            }
            PROFILE_SEC_INFO => self.show_section(ProfileSection::Info),
            PROFILE_SEC_LEADERBOARD => self.show_section(ProfileSection::Leaderboard),
            EDIT_NAME => self.start_name_edit(),
            LOGOUT => self.ask(Confirm::Logout),
            RESET_PROGRESS => self.ask(Confirm::Reset),
            BUY_CLICK_UPGRADE => self.buy_click_upgrade(),
            id if (BUY_BUILDING_BASE..BUY_BUILDING_BASE + 6).contains(&id) => {
                let idx = (id - BUY_BUILDING_BASE) as usize;
                self.buy_building(BuildingKind::all()[idx])
            }
            _ => false,
        };
        if consumed {
            InputOutcome::Consumed
        } else {
            InputOutcome::Ignored
        }
    }

    /// Returns `None` when the event should fall through to normal handling
    /// (the editor is closed first).
    fn handle_name_edit<S: KeyValueStore>(
        &mut self,
        event: &InputEvent,
        store: &mut S,
    ) -> Option<InputOutcome> {
        let draft = self.name_draft.as_mut()?;
        match event {
            InputEvent::Key(c) => {
                if draft.chars().count() < MAX_NAME_LEN {
                    draft.push(*c);
                }
            }
            InputEvent::Backspace => {
                draft.pop();
            }
            InputEvent::Enter | InputEvent::Click(SAVE_NAME) => self.commit_name(store),
            InputEvent::Escape | InputEvent::Click(CANCEL_NAME) => self.name_draft = None,
            InputEvent::Tab => {}
            InputEvent::Click(_) => {
                self.name_draft = None;
                return None;
            }
        }
        Some(InputOutcome::Consumed)
    }

    fn handle_confirm<S: KeyValueStore>(
        &mut self,
        event: &InputEvent,
        store: &mut S,
    ) -> InputOutcome {
        let accepted = match event {
            InputEvent::Key('y') | InputEvent::Enter | InputEvent::Click(CONFIRM_YES) => true,
            InputEvent::Key('n') | InputEvent::Escape | InputEvent::Click(CONFIRM_NO) => false,
            _ => return InputOutcome::Consumed,
        };
        let Some(pending) = self.confirm.take() else {
            return InputOutcome::Consumed;
        };
        if !accepted {
            return InputOutcome::Consumed;
        }

        match pending {
            Confirm::Logout => {
                self.save(store);
                if let Err(e) = session::logout(store) {
                    console::warn(&format!("logout failed: {e}"));
                }
                InputOutcome::LoggedOut
            }
            Confirm::Reset => {
                logic::reset_progress(&mut self.state);
                self.save(store);
                self.panel = Panel::None;
                InputOutcome::Consumed
            }
        }
    }

    // ── Actions ────────────────────────────────────────────────

    fn click(&mut self) -> bool {
        logic::click(&mut self.state);
        self.dirty = true;
        true
    }

    fn buy_building(&mut self, kind: BuildingKind) -> bool {
        if logic::purchase_building(&mut self.state, kind) {
            self.dirty = true;
        }
        true
    }

    fn buy_click_upgrade(&mut self) -> bool {
        if logic::purchase_click_upgrade(&mut self.state) {
            self.dirty = true;
        }
        true
    }

    fn commit_name<S: KeyValueStore>(&mut self, store: &mut S) {
        if let Some(draft) = self.name_draft.take() {
            logic::rename_player(&mut self.state, &draft);
            self.save(store);
        }
    }

    fn start_name_edit(&mut self) -> bool {
        self.panel = Panel::Profile;
        self.profile_section = ProfileSection::Info;
        self.name_draft = Some(self.state.player_name.clone());
        true
    }

    fn ask(&mut self, confirm: Confirm) -> bool {
        self.confirm = Some(confirm);
        true
    }

    fn show_tab(&mut self, tab: Tab) -> bool {
        self.panel = Panel::None;
        self.tab = tab;
        true
    }

    fn show_section(&mut self, section: ProfileSection) -> bool {
        self.profile_section = section;
        true
    }

    fn toggle_panel(&mut self, panel: Panel) -> bool {
        self.panel = if self.panel == panel { Panel::None } else { panel };
        true
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn signed_in(store: &mut MemoryStore) -> CashFlowGame {
        let session = session::login(store, "me@x.y", "secret").unwrap();
        CashFlowGame::new(session, store)
    }

    #[test]
    fn click_key_earns_money() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        assert_eq!(
            game.handle_input(&InputEvent::Key('c'), &mut store),
            InputOutcome::Consumed
        );
        assert_eq!(game.state.money, 1.0);
    }

    #[test]
    fn click_target_earns_money() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.handle_input(&InputEvent::Click(CLICK_MONEY), &mut store);
        game.handle_input(&InputEvent::Click(CLICK_MONEY), &mut store);
        assert_eq!(game.state.money, 2.0);
    }

    #[test]
    fn building_keys_only_on_buildings_tab() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.money = 100.0;
        game.handle_input(&InputEvent::Key('1'), &mut store);
        assert_eq!(game.state.count(BuildingKind::Cursor), 0);

        game.handle_input(&InputEvent::Key('b'), &mut store);
        game.handle_input(&InputEvent::Key('1'), &mut store);
        assert_eq!(game.state.count(BuildingKind::Cursor), 1);
    }

    #[test]
    fn buy_building_via_click() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.money = 150.0;
        game.handle_input(&InputEvent::Click(BUY_BUILDING_BASE + 1), &mut store);
        assert_eq!(game.state.count(BuildingKind::Worker), 1);
        assert!((game.state.money - 50.0).abs() < 1e-9);
    }

    #[test]
    fn unaffordable_purchase_is_silent() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        let before = game.state.clone();
        let outcome = game.handle_input(&InputEvent::Click(BUY_BUILDING_BASE + 5), &mut store);
        assert_eq!(outcome, InputOutcome::Consumed);
        assert_eq!(game.state, before);
        assert!(!game.dirty);
    }

    #[test]
    fn click_upgrade_via_upgrades_tab() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.money = 1000.0;
        game.handle_input(&InputEvent::Key('u'), &mut store);
        game.handle_input(&InputEvent::Key('1'), &mut store);
        assert_eq!(game.state.click_power, 2);
        assert_eq!(game.state.money, 0.0);
    }

    #[test]
    fn income_ticks_once_per_second() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.building_mut(BuildingKind::Worker).count = 2;
        game.advance(0.0, &mut store);
        game.advance(999.0, &mut store);
        assert_eq!(game.state.money, 0.0);
        game.advance(1000.0, &mut store);
        assert!((game.state.money - 2.0).abs() < 1e-9);
        assert_eq!(game.sync, SyncStatus::Saving);
    }

    #[test]
    fn income_accrues_while_frames_are_paused() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.building_mut(BuildingKind::Worker).count = 1;
        game.advance(0.0, &mut store);
        game.advance(60_000.0, &mut store);
        assert!((game.state.money - 60.0).abs() < 1e-9);
        assert_eq!(game.sync, SyncStatus::Saving);
    }

    #[test]
    fn debounced_save_after_change() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.advance(0.0, &mut store);
        game.handle_input(&InputEvent::Key('c'), &mut store);
        game.advance(10.0, &mut store);
        assert!(store.get("game_me@x.y").unwrap().is_none());

        game.advance(310.0, &mut store);
        assert_eq!(game.sync, SyncStatus::Synced);
        assert_eq!(save::load_game(&mut store, "me@x.y").money, 1.0);
        assert_eq!(game.leaderboard.len(), 1);
    }

    #[test]
    fn periodic_save_without_changes() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.advance(0.0, &mut store);
        game.advance(4000.0, &mut store);
        assert!(store.get("game_me@x.y").unwrap().is_none());
        game.advance(5000.0, &mut store);
        assert!(store.get("game_me@x.y").unwrap().is_some());
    }

    #[test]
    fn reset_requires_confirmation_and_persists() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.money = 5000.0;
        game.state.click_power = 3;
        game.state.player_name = "Rich".into();

        game.handle_input(&InputEvent::Key('s'), &mut store);
        game.handle_input(&InputEvent::Key('r'), &mut store);
        assert_eq!(game.confirm, Some(Confirm::Reset));
        game.handle_input(&InputEvent::Key('n'), &mut store);
        assert_eq!(game.state.money, 5000.0);

        game.handle_input(&InputEvent::Key('r'), &mut store);
        game.handle_input(&InputEvent::Click(CONFIRM_YES), &mut store);
        assert_eq!(game.state, GameState::new());
        assert_eq!(save::load_game(&mut store, "me@x.y"), GameState::new());
    }

    #[test]
    fn rename_saves_immediately() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.handle_input(&InputEvent::Key('p'), &mut store);
        game.handle_input(&InputEvent::Key('n'), &mut store);
        for c in "Ann".chars() {
            game.handle_input(&InputEvent::Key(c), &mut store);
        }
        game.handle_input(&InputEvent::Enter, &mut store);

        assert!(game.name_draft.is_none());
        assert_eq!(game.state.player_name, "Ann");
        assert_eq!(save::load_game(&mut store, "me@x.y").player_name, "Ann");
        assert_eq!(game.leaderboard[0].display_name, "Ann");
    }

    #[test]
    fn rename_cancel_keeps_old_name() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.state.player_name = "Old".into();
        game.handle_input(&InputEvent::Click(EDIT_NAME), &mut store);
        game.handle_input(&InputEvent::Backspace, &mut store);
        game.handle_input(&InputEvent::Key('x'), &mut store);
        assert_eq!(game.name_draft.as_deref(), Some("Olx"));
        game.handle_input(&InputEvent::Escape, &mut store);
        assert_eq!(game.state.player_name, "Old");
    }

    #[test]
    fn name_editor_caps_length() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.handle_input(&InputEvent::Click(EDIT_NAME), &mut store);
        for _ in 0..30 {
            game.handle_input(&InputEvent::Key('a'), &mut store);
        }
        assert_eq!(game.name_draft.as_ref().map(|d| d.len()), Some(MAX_NAME_LEN));
    }

    #[test]
    fn logout_flushes_and_clears_session() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.handle_input(&InputEvent::Key('c'), &mut store);
        game.handle_input(&InputEvent::Key('p'), &mut store);
        game.handle_input(&InputEvent::Key('o'), &mut store);
        let outcome = game.handle_input(&InputEvent::Key('y'), &mut store);

        assert_eq!(outcome, InputOutcome::LoggedOut);
        assert!(session::restore(&mut store).is_none());
        assert_eq!(save::load_game(&mut store, "me@x.y").money, 1.0);
    }

    #[test]
    fn escape_closes_panel() {
        let mut store = MemoryStore::new();
        let mut game = signed_in(&mut store);
        game.handle_input(&InputEvent::Click(OPEN_SETTINGS), &mut store);
        assert_eq!(game.panel, Panel::Settings);
        game.handle_input(&InputEvent::Escape, &mut store);
        assert_eq!(game.panel, Panel::None);
        assert_eq!(
            game.handle_input(&InputEvent::Escape, &mut store),
            InputOutcome::Ignored
        );
    }

    #[test]
    fn loads_existing_progress() {
        let mut store = MemoryStore::new();
        let mut saved = GameState::new();
        saved.money = 77.0;
        save::save_game(&mut store, "me@x.y", &saved).unwrap();
        let game = signed_in(&mut store);
        assert_eq!(game.state.money, 77.0);
        assert_eq!(game.leaderboard.len(), 1);
    }
}
