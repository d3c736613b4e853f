//! Action IDs for login screen click targets.

pub const FOCUS_EMAIL: u16 = 900;
pub const FOCUS_PASSWORD: u16 = 901;
pub const SUBMIT: u16 = 902;
pub const TOGGLE_MODE: u16 = 903;
