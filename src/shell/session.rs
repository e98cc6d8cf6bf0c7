//! Shell session state
//!
//! Tracks the acting user for the current session.

/// State of one interactive session
#[derive(Debug, Clone)]
pub struct Session {
    user: String,
    max_name_length: usize,
}

impl Session {
    pub fn new(user: String, max_name_length: usize) -> Self {
        Self {
            user,
            max_name_length,
        }
    }

    /// Returns the acting user
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Switches the acting user
    pub fn set_user(&mut self, user: String) {
        self.user = user;
    }

    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }
}
