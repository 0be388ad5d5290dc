//! Victory payouts: experience, loot, gold and recovery.

use super::types::Monster;
use crate::character::progression::battle_milestone_bonus;
use crate::character::{apply_experience, LevelUpReport, Player};
use crate::core::config::GameConfig;
use crate::core::constants::*;
use crate::items::{roll_gold, roll_loot, LootDrop};
use log::info;
use rand::Rng;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VictoryReport {
    pub experience: u64,
    /// Extra experience from the every-tenth-battle milestone.
    pub bonus_experience: u64,
    pub gold: u64,
    pub loot: Vec<LootDrop>,
    /// Drops that did not fit in the inventory.
    pub lost: Vec<LootDrop>,
    pub level_up: LevelUpReport,
    pub hp_recovered: u32,
    pub mp_recovered: u32,
}

impl VictoryReport {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Gained {} EXP!", self.experience)];
        if self.bonus_experience > 0 {
            lines.push(format!(
                "Milestone battle! Bonus {} EXP!",
                self.bonus_experience
            ));
        }
        if self.level_up.leveled_up() {
            lines.push(format!(
                "Level up! You are now level {} and gained {} status points.",
                self.level_up.new_level, self.level_up.points_awarded
            ));
        }
        if self.level_up.ascensions > 0 {
            lines.push("You have ascended! Base stats increased by 10%.".to_string());
        }
        lines.push(format!("Found {} gold!", self.gold));
        for drop in &self.loot {
            lines.push(format!("Obtained {} x{}", drop.item, drop.quantity));
        }
        for drop in &self.lost {
            lines.push(format!(
                "Inventory full! {} x{} was left behind.",
                drop.item, drop.quantity
            ));
        }
        if self.hp_recovered > 0 || self.mp_recovered > 0 {
            lines.push(format!(
                "Recovered {} HP and {} MP.",
                self.hp_recovered, self.mp_recovered
            ));
        }
        lines
    }
}

/// Pays out a won battle.
///
/// Experience from every defeated monster (plus the milestone bonus) goes
/// through the level-up loop. Each monster's loot table and gold range are
/// rolled independently. Finally the player recovers a slice of HP and MP.
pub fn resolve_victory(
    player: &mut Player,
    monsters: &[Monster],
    config: &GameConfig,
    rng: &mut impl Rng,
) -> VictoryReport {
    let defeated: Vec<&Monster> = monsters.iter().filter(|m| !m.is_alive()).collect();
    let mut report = VictoryReport {
        experience: defeated.iter().map(|m| m.exp_reward).sum(),
        bonus_experience: battle_milestone_bonus(player.total_battles, player.level),
        ..VictoryReport::default()
    };

    for monster in &defeated {
        let template = monster.species.template();
        for drop in roll_loot(template.loot, rng) {
            match player
                .inventory
                .add_item(&drop.item, drop.quantity, config.inventory_capacity)
            {
                Ok(()) => report.loot.push(drop),
                Err(_) => report.lost.push(drop),
            }
        }
        report.gold += roll_gold(template.gold, rng) as u64;
    }
    player.gold += report.gold;
    player.kills += defeated.len() as u32;

    report.level_up = apply_experience(
        player,
        report.experience + report.bonus_experience,
        config.level_up_stat_points,
    );
    if report.level_up.leveled_up() {
        info!(
            "player {} reached level {}",
            player.id, report.level_up.new_level
        );
    }

    let hp_before = player.current_hp;
    let mp_before = player.current_mp;
    player.heal((player.max_hp / VICTORY_RECOVERY_DIVISOR).max(VICTORY_HP_RECOVERY_MIN));
    player.restore_mana((player.max_mp / VICTORY_RECOVERY_DIVISOR).max(VICTORY_MP_RECOVERY_MIN));
    report.hp_recovered = player.current_hp - hp_before;
    report.mp_recovered = player.current_mp - mp_before;

    report
}
