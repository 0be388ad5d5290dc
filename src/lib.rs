//! Battlebot - turn-based RPG battle engine for chat-bot hosts
//!
//! Players create a character, explore for monsters and fight them round by
//! round with attacks, skills and fleeing. Records persist as JSON between
//! commands. Hosts drive everything through [`commands::GameService`].

pub mod character;
pub mod combat;
pub mod commands;
pub mod core;
pub mod items;
pub mod session;

pub use commands::{Command, CommandOutcome, GameService};
pub use crate::core::{GameConfig, GameError, GameResult};
