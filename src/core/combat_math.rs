//! Shared combat math functions.
//!
//! These pure functions calculate combat outcomes without side effects.
//! The turn resolver and the reward resolver both build on them.

use rand::Rng;

/// Roll a uniform damage multiplier in `[min, max]`.
///
/// A degenerate range (`max <= min`) always yields `min`, which lets tests pin
/// the jitter to exactly 1.0.
pub fn roll_jitter(min: f64, max: f64, rng: &mut impl Rng) -> f64 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Damage of a basic hit after defense.
///
/// `round(max(1, attack - defense * reduction) * jitter)`, never below 1.
///
/// # Arguments
/// * `attack` - Attacker's attack stat
/// * `defense` - Defender's defense stat
/// * `reduction` - Fraction of defense that applies (0.5 by default)
/// * `jitter` - Random multiplier from [`roll_jitter`]
pub fn calculate_damage(attack: f64, defense: u32, reduction: f64, jitter: f64) -> u32 {
    let base = (attack - defense as f64 * reduction).max(1.0);
    (base * jitter).round().max(1.0) as u32
}

/// Damage of an offensive skill: the attack stat is scaled by the skill's power
/// coefficient before defense is applied.
pub fn calculate_skill_damage(
    attack: f64,
    power_multiplier: f64,
    defense: u32,
    reduction: f64,
    jitter: f64,
) -> u32 {
    calculate_damage(attack * power_multiplier, defense, reduction, jitter)
}

/// Amount restored by a healing skill: a fraction of max HP, at least 1.
pub fn calculate_heal(max_hp: u32, power_multiplier: f64) -> u32 {
    (max_hp as f64 * power_multiplier).round().max(1.0) as u32
}

/// Scale damage by an elemental reaction multiplier.
pub fn apply_multiplier(damage: u32, multiplier: f64) -> u32 {
    (damage as f64 * multiplier).round() as u32
}

/// Roll a probability in `[0, 1]`.
pub fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    chance > 0.0 && rng.gen::<f64>() < chance
}

/// Apply damage to HP, returning remaining HP (minimum 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

/// Apply healing, never exceeding `max_hp`.
pub fn apply_heal(current_hp: u32, amount: u32, max_hp: u32) -> u32 {
    current_hp.saturating_add(amount).min(max_hp)
}

/// Check if entity is still alive.
pub fn is_alive(current_hp: u32) -> bool {
    current_hp > 0
}
