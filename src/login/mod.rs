//! Sign-in / sign-up screen.
//!
//! Collects an email and a password and hands them to [`session::login`]
//! or [`session::register`]. The two modes differ only in wording.

pub mod actions;
pub mod render;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::error::Error;
use crate::input::{ClickState, InputEvent};
use crate::session::{self, Session};
use crate::storage::KeyValueStore;

use actions::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
}

pub struct LoginScreen {
    pub mode: Mode,
    pub focus: Field,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            mode: Mode::SignIn,
            focus: Field::Email,
            email: String::new(),
            password: String::new(),
            error: None,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::SignIn => Mode::SignUp,
            Mode::SignUp => Mode::SignIn,
        };
        self.error = None;
    }

    /// Returns a session once the player has signed in.
    pub fn handle_input<S: KeyValueStore>(
        &mut self,
        event: &InputEvent,
        store: &mut S,
    ) -> Option<Session> {
        match event {
            InputEvent::Key(c) => self.focused_mut().push(*c),
            InputEvent::Backspace => {
                self.focused_mut().pop();
            }
            InputEvent::Tab => {
                self.focus = match self.focus {
                    Field::Email => Field::Password,
                    Field::Password => Field::Email,
                };
            }
            InputEvent::Escape | InputEvent::Click(TOGGLE_MODE) => self.toggle_mode(),
            InputEvent::Click(FOCUS_EMAIL) => self.focus = Field::Email,
            InputEvent::Click(FOCUS_PASSWORD) => self.focus = Field::Password,
            InputEvent::Enter | InputEvent::Click(SUBMIT) => return self.submit(store),
            InputEvent::Click(_) => {}
        }
        None
    }

    /// Try to sign in with the current fields. On failure the error is
    /// kept for display and the fields are left as typed. A blank email is
    /// refused before the store is touched.
    pub fn submit<S: KeyValueStore>(&mut self, store: &mut S) -> Option<Session> {
        if self.email.trim().is_empty() {
            self.error = Some(Error::EmailRequired.to_string());
            return None;
        }
        let result = match self.mode {
            Mode::SignIn => session::login(store, &self.email, &self.password),
            Mode::SignUp => session::register(store, &self.email, &self.password),
        };
        match result {
            Ok(session) => {
                self.error = None;
                Some(session)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CURRENT_USER_KEY;
    use crate::storage::MemoryStore;

    fn type_text(screen: &mut LoginScreen, store: &mut MemoryStore, text: &str) {
        for c in text.chars() {
            assert!(screen.handle_input(&InputEvent::Key(c), store).is_none());
        }
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut store = MemoryStore::new();
        let mut screen = LoginScreen::new();
        type_text(&mut screen, &mut store, "a@b");
        screen.handle_input(&InputEvent::Tab, &mut store);
        type_text(&mut screen, &mut store, "secret");
        screen.handle_input(&InputEvent::Backspace, &mut store);

        assert_eq!(screen.email, "a@b");
        assert_eq!(screen.password, "secre");
        assert_eq!(screen.focus, Field::Password);
    }

    #[test]
    fn short_password_shows_error() {
        let mut store = MemoryStore::new();
        let mut screen = LoginScreen::new();
        type_text(&mut screen, &mut store, "a@b");
        screen.handle_input(&InputEvent::Click(FOCUS_PASSWORD), &mut store);
        type_text(&mut screen, &mut store, "12345");

        assert!(screen.handle_input(&InputEvent::Enter, &mut store).is_none());
        assert_eq!(
            screen.error.as_deref(),
            Some("Password must be at least 6 characters")
        );
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_none());
        assert_eq!(screen.password, "12345");
    }

    #[test]
    fn submit_signs_in() {
        let mut store = MemoryStore::new();
        let mut screen = LoginScreen::new();
        type_text(&mut screen, &mut store, "a@b");
        screen.handle_input(&InputEvent::Tab, &mut store);
        type_text(&mut screen, &mut store, "123456");

        let session = screen
            .handle_input(&InputEvent::Click(SUBMIT), &mut store)
            .expect("signed in");
        assert_eq!(session.email(), "a@b");
        assert!(store.get(CURRENT_USER_KEY).unwrap().is_some());
    }

    #[test]
    fn sign_up_mode_also_signs_in() {
        let mut store = MemoryStore::new();
        let mut screen = LoginScreen::new();
        screen.handle_input(&InputEvent::Escape, &mut store);
        assert_eq!(screen.mode, Mode::SignUp);

        screen.email = "new@b".into();
        screen.password = "abcdef".into();
        let session = screen.submit(&mut store).expect("registered");
        assert_eq!(session.email(), "new@b");
    }

    #[test]
    fn blank_email_is_refused() {
        let mut store = MemoryStore::new();
        let mut screen = LoginScreen::new();
        type_text(&mut screen, &mut store, "  ");
        screen.handle_input(&InputEvent::Tab, &mut store);
        type_text(&mut screen, &mut store, "123456");

        assert!(screen.handle_input(&InputEvent::Enter, &mut store).is_none());
        assert_eq!(screen.error.as_deref(), Some("Please enter your email"));
        assert!(store.is_empty());
    }

    #[test]
    fn toggling_mode_clears_error() {
        let mut store = MemoryStore::new();
        let mut screen = LoginScreen::new();
        screen.submit(&mut store);
        assert!(screen.error.is_some());
        screen.handle_input(&InputEvent::Click(TOGGLE_MODE), &mut store);
        assert!(screen.error.is_none());
        assert_eq!(screen.mode, Mode::SignUp);
    }
}
