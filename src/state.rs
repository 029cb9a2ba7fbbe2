// src/state.rs

use crate::sessions::FormSessions;

#[derive(Clone)]
pub struct AppState {
    pub forms: FormSessions,
}
