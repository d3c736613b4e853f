//! Cash Flow: an idle clicker that runs in the browser terminal.
//!
//! Game state lives in `localStorage` (see [`storage`]); everything above
//! that layer is plain Rust and runs under `cargo test` on the host.

pub mod app;
pub mod console;
pub mod error;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod login;
pub mod session;
pub mod storage;
pub mod time;
pub mod widgets;
