use thiserror::Error;

/// Errors produced by game operations.
///
/// Every variant belongs to one of four broad classes (see [`ErrorCategory`]);
/// the command layer turns them into user-facing messages.
#[derive(Debug, Error)]
pub enum GameError {
    /// Malformed input: bad skill index, unknown stat, over-allocation, etc.
    #[error("{0}")]
    Validation(String),

    /// Skill cost exceeds the player's current mana.
    #[error("Not enough MP! Need {needed}, have {available}")]
    InsufficientMana { needed: u32, available: u32 },

    /// The daily battle quota is used up.
    #[error("Daily battle limit reached! Next reset in {}", reset_label(.resets_in_secs))]
    DailyLimitReached { resets_in_secs: i64 },

    /// An item could not be added because the bag is full.
    #[error("Inventory is full, cannot add {0}")]
    InventoryFull(String),

    /// Command invoked outside the state it requires.
    #[error("{0}")]
    InvalidState(String),

    /// Another command for the same player is still running.
    #[error("a command for player {0} is already in progress")]
    Busy(String),

    /// No character or save exists for the identifier.
    #[error("{0}")]
    NotFound(String),

    /// Wrapper around IO errors (save directory, record files).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON encode/decode failures of player records.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around config parse failures.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Coarse error classes used when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    State,
    Persistence,
    NotFound,
}

impl GameError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GameError::Validation(_)
            | GameError::InsufficientMana { .. }
            | GameError::DailyLimitReached { .. }
            | GameError::InventoryFull(_) => ErrorCategory::Validation,
            GameError::InvalidState(_) | GameError::Busy(_) => ErrorCategory::State,
            GameError::Io(_) | GameError::Json(_) | GameError::Config(_) => {
                ErrorCategory::Persistence
            }
            GameError::NotFound(_) => ErrorCategory::NotFound,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;

fn reset_label(secs: &i64) -> String {
    format_duration_secs(*secs)
}

/// Formats a number of seconds as `"{h}h {m}m"`.
pub fn format_duration_secs(secs: i64) -> String {
    let secs = secs.max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}
