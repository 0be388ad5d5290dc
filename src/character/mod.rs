//! Player records, stat growth and persistence.

pub mod attributes;
pub mod derived_stats;
pub mod player;
pub mod progression;
pub mod save;

pub use attributes::{AttributeType, Attributes, StatAllocation};
pub use derived_stats::DerivedStats;
pub use player::{validate_name, Player, PlayerId, Recovery};
pub use progression::{apply_experience, LevelUpReport};
pub use save::{JsonPlayerStore, MemoryPlayerStore, PlayerStore};
