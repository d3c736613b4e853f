//! Top-level screen routing: login until a session exists, then the game.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::game::{CashFlowGame, InputOutcome};
use crate::input::{ClickState, InputEvent};
use crate::login::LoginScreen;
use crate::session;
use crate::storage::KeyValueStore;

pub enum Screen {
    Login(LoginScreen),
    Playing(Box<CashFlowGame>),
}

pub struct App<S: KeyValueStore> {
    pub store: S,
    pub screen: Screen,
}

impl<S: KeyValueStore> App<S> {
    /// Resume a stored session if there is one.
    pub fn new(mut store: S) -> Self {
        let screen = match session::restore(&mut store) {
            Some(session) => Screen::Playing(Box::new(CashFlowGame::new(session, &mut store))),
            None => Screen::Login(LoginScreen::new()),
        };
        Self { store, screen }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.screen, Screen::Playing(_))
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        let next = match &mut self.screen {
            Screen::Login(login) => login
                .handle_input(event, &mut self.store)
                .map(|session| Screen::Playing(Box::new(CashFlowGame::new(session, &mut self.store)))),
            Screen::Playing(game) => match game.handle_input(event, &mut self.store) {
                InputOutcome::LoggedOut => Some(Screen::Login(LoginScreen::new())),
                InputOutcome::Consumed | InputOutcome::Ignored => None,
            },
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
    }

    /// Called once per frame with the wall clock in milliseconds.
    pub fn advance(&mut self, now_ms: f64) {
        if let Screen::Playing(game) = &mut self.screen {
            game.advance(now_ms, &mut self.store);
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        match &self.screen {
            Screen::Login(login) => login.render(f, area, click_state),
            Screen::Playing(game) => game.render(f, area, click_state),
        }
    }
}
