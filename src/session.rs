//! Local "account" session.
//!
//! There is no credential check: signing in just records `{email, password}`
//! under [`CURRENT_USER_KEY`]. Registering is the same operation. This is a
//! demo placeholder and must not be mistaken for authentication.

use serde::{Deserialize, Serialize};

use crate::console;
use crate::error::{Error, Result};
use crate::storage::KeyValueStore;

/// Storage key of the active session pointer.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A locally stored account record. Stored verbatim, unhashed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
}

/// The signed-in account, handed to whichever screen needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    account: Account,
}

impl Session {
    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn email(&self) -> &str {
        &self.account.email
    }
}

/// Record `{email, password}` as the active session.
///
/// Fails only when the password is shorter than [`MIN_PASSWORD_LEN`]; in
/// that case the store is left untouched.
pub fn login<S: KeyValueStore>(store: &mut S, email: &str, password: &str) -> Result<Session> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }

    let account = Account {
        email: email.to_string(),
        password: password.to_string(),
    };
    let json = serde_json::to_string(&account)?;
    store.set(CURRENT_USER_KEY, &json)?;
    console::log(&format!("signed in as {email}"));
    Ok(Session { account })
}

/// Same as [`login`]: no existing-account check is made.
pub fn register<S: KeyValueStore>(
    store: &mut S,
    email: &str,
    password: &str,
) -> Result<Session> {
    login(store, email, password)
}

/// Clear the active session pointer.
pub fn logout<S: KeyValueStore>(store: &mut S) -> Result<()> {
    store.remove(CURRENT_USER_KEY)
}

/// Read the active session at startup, if any.
///
/// A record that does not parse is discarded.
pub fn restore<S: KeyValueStore>(store: &mut S) -> Option<Session> {
    let json = match store.get(CURRENT_USER_KEY) {
        Ok(Some(j)) => j,
        Ok(None) => return None,
        Err(e) => {
            console::warn(&format!("could not read session: {e}"));
            return None;
        }
    };

    match serde_json::from_str::<Account>(&json) {
        Ok(account) => Some(Session { account }),
        Err(e) => {
            console::warn(&format!("discarding unreadable session: {e}"));
            let _ = store.remove(CURRENT_USER_KEY);
            None
        }
    }
}
