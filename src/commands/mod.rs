//! Transport-independent command surface.

pub mod parse;
pub mod render;
pub mod service;

pub use parse::Command;
pub use service::{AutoBattleReport, BattleTurn, CommandOutcome, GameService, ItemUse};
