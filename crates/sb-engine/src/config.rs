//! Configuration for a session engine.

/// Player-facing texts emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Shown when the player quits from the start prompt.
    pub farewell: String,
    /// Appended when a fixed event ends the session.
    pub failure_suffix: String,
    /// Appended when a random event ends the session.
    pub game_over_suffix: String,
    /// Appended when the random pool runs out.
    pub all_complete_suffix: String,
    /// Apology for a missing branch.
    pub unknown_branch: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            farewell: "Thanks for playing, see you next time!".to_string(),
            failure_suffix: "You failed. Game over!".to_string(),
            game_over_suffix: "Game over!".to_string(),
            all_complete_suffix: "All events completed. Game over!".to_string(),
            unknown_branch: "Sorry, that story is not available.".to_string(),
        }
    }
}

/// Configuration for a session engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// RNG seed for reproducible outcome rolls and pool draws.
    pub seed: u64,
    /// Start key that quits instead of starting a branch.
    pub quit_key: String,
    /// Texts used in transition messages.
    pub messages: Messages,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            quit_key: "q".to_string(),
            messages: Messages::default(),
        }
    }
}

impl EngineConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the quit key. Surrounding whitespace is ignored.
    pub fn with_quit_key(mut self, key: impl Into<String>) -> Self {
        self.quit_key = key.into().trim().to_string();
        self
    }

    /// Replace the message texts.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }
}
