//! Combat system: monsters, status effects, turn resolution and rewards.

pub mod logic;
pub mod monsters;
pub mod rewards;
pub mod status;
pub mod types;

pub use logic::resolve_round;
pub use monsters::{generate_encounter, spawn_monster, Species};
pub use rewards::{resolve_victory, VictoryReport};
pub use status::{StatusEffect, StatusKind};
pub use types::*;
