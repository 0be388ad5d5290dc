use super::attributes::{AttributeType, Attributes};
use crate::core::constants::*;
use crate::items::Equipment;

/// Final combat stats computed from level, ascensions, status points and gear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedStats {
    pub base_hp: u32,
    pub base_mp: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    pub max_hp: u32,
    pub max_mp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl DerivedStats {
    /// Calculates the full stat block.
    ///
    /// Level bases are `100L` HP, `3L+20` MP, `3L+5` ATK and DEF; each ascension
    /// adds 10% to those four bases. Status points then add VIT×30 HP,
    /// INT×5 MP, STR×2 + INT×2 ATK, DEF×1 DEF and AGI×1 speed; gear adds its
    /// flat bonuses last.
    pub fn calculate_derived_stats(
        level: u32,
        ascension_count: u32,
        attrs: &Attributes,
        equipment: &Equipment,
    ) -> Self {
        let level = level.max(1);
        let ascension = 1.0 + ascension_count as f64 * ASCENSION_BONUS;
        // float-to-int `as` saturates
        let ascend = |value: u32| (value as f64 * ascension).round() as u32;

        let base_hp = ascend(BASE_HP_PER_LEVEL.saturating_mul(level));
        let base_mp = ascend(BASE_MP_PER_LEVEL.saturating_mul(level).saturating_add(BASE_MP_FLAT));
        let base_attack = ascend(BASE_ATK_PER_LEVEL.saturating_mul(level).saturating_add(BASE_ATK_FLAT));
        let base_defense = ascend(BASE_DEF_PER_LEVEL.saturating_mul(level).saturating_add(BASE_DEF_FLAT));

        let vit = attrs.get(AttributeType::Vitality);
        let int = attrs.get(AttributeType::Intelligence);
        let str = attrs.get(AttributeType::Strength);
        let def = attrs.get(AttributeType::Defense);
        let agi = attrs.get(AttributeType::Agility);

        let gear_attack = equipment.total_attack();
        let gear_defense = equipment.total_defense();

        Self {
            base_hp,
            base_mp,
            base_attack,
            base_defense,
            max_hp: base_hp.saturating_add(vit.saturating_mul(HP_PER_VIT)),
            max_mp: base_mp.saturating_add(int.saturating_mul(MP_PER_INT)),
            attack: base_attack
                .saturating_add(str.saturating_mul(ATK_PER_STR))
                .saturating_add(int.saturating_mul(ATK_PER_INT))
                .saturating_add(gear_attack),
            defense: base_defense
                .saturating_add(def.saturating_mul(DEF_PER_DEF))
                .saturating_add(gear_defense),
            speed: BASE_SPEED.saturating_add(agi.saturating_mul(SPEED_PER_AGI)),
        }
    }
}
