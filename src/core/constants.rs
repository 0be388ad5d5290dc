// Character growth
pub const BASE_HP_PER_LEVEL: u32 = 100;
pub const BASE_MP_PER_LEVEL: u32 = 3;
pub const BASE_MP_FLAT: u32 = 20;
pub const BASE_ATK_PER_LEVEL: u32 = 3;
pub const BASE_ATK_FLAT: u32 = 5;
pub const BASE_DEF_PER_LEVEL: u32 = 3;
pub const BASE_DEF_FLAT: u32 = 5;
pub const BASE_SPEED: u32 = 10;
pub const MAX_LEVEL: u32 = 100;

// Status point bonuses
pub const NUM_ATTRIBUTES: usize = 5;
pub const HP_PER_VIT: u32 = 30;
pub const MP_PER_INT: u32 = 5;
pub const ATK_PER_INT: u32 = 2;
pub const ATK_PER_STR: u32 = 2;
pub const DEF_PER_DEF: u32 = 1;
pub const SPEED_PER_AGI: u32 = 1;
pub const STARTING_STAT_POINTS: u32 = 3;
pub const LEVEL_UP_STAT_POINTS: u32 = 3;

// Ascension: +10% to hp/mp/atk/def bases at each listed level
pub const ASCENSION_LEVELS: [u32; 4] = [25, 50, 75, 100];
pub const ASCENSION_BONUS: f64 = 0.10;

// Experience
pub const STARTING_XP_TO_NEXT: u64 = 100;
pub const XP_CURVE_GROWTH: f64 = 1.2;
pub const BONUS_XP_BATTLE_INTERVAL: u32 = 10;
pub const BONUS_XP_PER_LEVEL: u64 = 20;

// Combat tuning defaults
pub const DEFENSE_REDUCTION: f64 = 0.5;
pub const SKILL_DEFENSE_REDUCTION: f64 = 0.5;
pub const DAMAGE_JITTER_MIN: f64 = 0.9;
pub const DAMAGE_JITTER_MAX: f64 = 1.1;
pub const FLEE_CHANCE: f64 = 0.5;
pub const PLAYER_DODGE_PER_AGI: f64 = 0.005;
pub const EVASIVE_SKIP_CHANCE: f64 = 0.3;
pub const WET_REACTION_MULTIPLIER: f64 = 1.5;

// Monster on-hit effects
pub const HYDRO_FREEZE_MIN_LEVEL: u32 = 3;
pub const HYDRO_FREEZE_CHANCE: f64 = 0.3;
pub const GOBLIN_BLEED_CHANCE: f64 = 0.2;
pub const SHAMAN_SUMMON_CHANCE: f64 = 0.25;
pub const MONSTER_LEVEL_SPREAD: i32 = 2;
pub const GOBLIN_MIN_PLAYER_LEVEL: u32 = 5;

// Status effect durations (ticks)
pub const BURN_DURATION: u32 = 3;
pub const WET_DURATION: u32 = 3;
pub const FROZEN_DURATION: u32 = 2;
pub const POISON_DURATION: u32 = 3;

// Post-victory recovery
pub const VICTORY_HP_RECOVERY_MIN: u32 = 10;
pub const VICTORY_MP_RECOVERY_MIN: u32 = 5;
pub const VICTORY_RECOVERY_DIVISOR: u32 = 10;

// Daily limits and housekeeping
pub const DAILY_BATTLE_QUOTA: u32 = 10;
pub const INVENTORY_CAPACITY: usize = 20;
pub const CONFIRM_TIMEOUT_SECONDS: i64 = 30;
pub const MAX_NAME_LENGTH: usize = 32;

// Auto-battle gives up (counted as fled) after this many rounds
pub const MAX_AUTO_BATTLE_ROUNDS: u32 = 100;
