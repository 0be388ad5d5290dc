//! Core game rules: constants, math, configuration, limits and errors.

pub mod combat_math;
pub mod config;
pub mod constants;
pub mod daily_limit;
pub mod errors;

pub use config::{CombatTuning, GameConfig};
pub use daily_limit::{time_until_reset, Clock, DailyLimit, SystemClock};
pub use errors::{ErrorCategory, GameError, GameResult};
