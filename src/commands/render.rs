//! Plain-text views sent back to the chat host.

use crate::character::{AttributeType, Player};
use crate::combat::SKILLS;
use crate::items::EquipmentSlot;

pub fn render_stats(player: &Player) -> String {
    let stats = player.stats();
    let mut out = format!("{}'s Stats", player.name);
    out += &format!("\nLevel: {}", player.level);
    out += &format!("\nEXP: {}/{}", player.experience, player.experience_to_next);
    out += &format!("\nHP: {}/{}", player.current_hp, player.max_hp);
    out += &format!("\nMP: {}/{}", player.current_mp, player.max_mp);
    out += &format!(
        "\nATK: {} (Base: {} + Gear: {})",
        stats.attack,
        stats.attack - player.equipment.total_attack(),
        player.equipment.total_attack()
    );
    out += &format!(
        "\nDEF: {} (Base: {} + Gear: {})",
        stats.defense,
        stats.defense - player.equipment.total_defense(),
        player.equipment.total_defense()
    );
    out += &format!("\nSpeed: {}", stats.speed);
    out += &format!("\nGold: {}", player.gold);
    if player.ascension_count > 0 {
        out += &format!("\nAscensions: {}", player.ascension_count);
    }

    let points: Vec<String> = AttributeType::all()
        .iter()
        .map(|attr| format!("{} {}", attr.abbrev(), player.attributes.get(*attr)))
        .collect();
    out += &format!("\nStatus Points: {}", points.join(" | "));
    if player.unallocated_points > 0 {
        out += &format!(
            "\nUnallocated Points: {} (use `!allocate vit=1 str=2`)",
            player.unallocated_points
        );
    }

    out += "\n\nEquipment:";
    for slot in EquipmentSlot::all() {
        let item = match player.equipment.get(slot) {
            Some(item) => item.describe(),
            None => "(empty)".to_string(),
        };
        out += &format!("\n{}: {}", slot, item);
    }

    out += &format!(
        "\n\nRecord: {} kills, {} deaths, {} battles",
        player.kills, player.deaths, player.total_battles
    );
    out
}

pub fn render_inventory(player: &Player, capacity: usize) -> String {
    if player.inventory.is_empty() {
        return "Your inventory is empty.".to_string();
    }
    let mut out = format!(
        "{}'s Inventory ({}/{})",
        player.name,
        player.inventory.len(),
        capacity
    );
    for (name, count) in player.inventory.iter() {
        out += &format!("\n{}: {}", name, count);
    }
    out
}

pub fn render_skills(current_mp: Option<u32>) -> String {
    let mut out = String::from("Skills:");
    for (i, skill) in SKILLS.iter().enumerate() {
        out += &format!(
            "\n{}. {} (MP: {}) - {}",
            i + 1,
            skill.name,
            skill.mp_cost,
            skill.description
        );
    }
    if let Some(mp) = current_mp {
        out += &format!("\nCurrent MP: {}", mp);
    }
    out
}

pub fn render_help() -> String {
    [
        "Commands:",
        "!create <name> - create your character",
        "!stats - show your character",
        "!inventory - show your items",
        "!skills - list your skills",
        "!explore - look for a monster to fight",
        "!attack - basic attack",
        "!skill <number> - use a skill",
        "!flee - try to escape",
        "!auto-battle - fight one encounter automatically",
        "!allocate vit=1 str=2 - spend status points (VIT, INT, STR, DEF, AGI)",
        "!equip <weapon|armor|accessory> <item> - equip an item from your inventory",
        "!use <item> - drink a potion (takes your turn in combat)",
        "!rest - restore HP and MP",
        "!remaining - battles left today",
        "!reset - time until the daily reset",
        "!save / !load - write or reload your save",
        "!delete - delete your character (asks for confirmation)",
    ]
    .join("\n")
}
