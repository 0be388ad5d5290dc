//! Experience curve, level-ups and ascension.

use super::player::Player;
use crate::core::constants::*;

/// Result of applying experience to a player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub ascensions: u32,
    pub points_awarded: u32,
    pub new_level: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Experience needed for the level after one that required `current`.
pub fn next_xp_requirement(current: u64) -> u64 {
    ((current as f64) * XP_CURVE_GROWTH) as u64
}

/// True when reaching `level` triggers an ascension.
pub fn is_ascension_level(level: u32) -> bool {
    ASCENSION_LEVELS.contains(&level)
}

/// Bonus experience granted on every tenth lifetime battle.
pub fn battle_milestone_bonus(total_battles: u32, level: u32) -> u64 {
    if total_battles > 0 && total_battles % BONUS_XP_BATTLE_INTERVAL == 0 {
        level as u64 * BONUS_XP_PER_LEVEL
    } else {
        0
    }
}

/// Adds experience and processes every level-up it pays for.
///
/// While experience covers the current requirement: subtract it, gain a level,
/// grow the requirement, award status points, ascend on milestone levels.
/// Stats are recalculated and the player is restored to full afterwards.
pub fn apply_experience(player: &mut Player, amount: u64, points_per_level: u32) -> LevelUpReport {
    let mut report = LevelUpReport {
        new_level: player.level,
        ..LevelUpReport::default()
    };
    player.experience = player.experience.saturating_add(amount);

    while player.level < MAX_LEVEL
        && player.experience_to_next > 0
        && player.experience >= player.experience_to_next
    {
        player.experience -= player.experience_to_next;
        player.level += 1;
        player.experience_to_next = next_xp_requirement(player.experience_to_next);
        player.unallocated_points += points_per_level;
        report.levels_gained += 1;
        report.points_awarded += points_per_level;
        if is_ascension_level(player.level) {
            player.ascension_count += 1;
            report.ascensions += 1;
        }
    }

    if report.leveled_up() {
        player.refresh_max_stats();
        player.restore_full();
        report.new_level = player.level;
    }
    report
}
