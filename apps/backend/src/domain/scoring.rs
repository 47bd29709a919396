//! Pick desirability scoring.
//!
//! `score_pick` only sees the candidate and the two current line-ups, so a
//! draft can be replayed against a fixed catalog and yield identical scores.
//! The weights below are policy and may be tuned freely.

use crate::domain::catalog::{CrowdControl, DamageType, Engage, Item};

pub const BASE_SCORE: i32 = 100;
/// Applied when the candidate would be the third damage dealer of its kind.
pub const DAMAGE_STACK_PENALTY: i32 = 20;
pub const DAMAGE_STACK_THRESHOLD: usize = 2;
pub const HIGH_CC_BONUS: i32 = 30;
pub const PRIMARY_ENGAGE_BONUS: i32 = 35;
/// Per direction: ally lists candidate, candidate lists ally.
pub const SYNERGY_BONUS: i32 = 25;
pub const COUNTERS_ENEMY_BONUS: i32 = 15;
/// Stays below `COUNTERS_ENEMY_BONUS`.
pub const COUNTERED_BY_ENEMY_PENALTY: i32 = 10;

pub fn score_pick(candidate: &Item, allied: &[&Item], enemy: &[&Item]) -> i32 {
    let mut score = BASE_SCORE;

    score -= damage_stack_penalty(candidate, allied);

    if candidate.crowd_control == Some(CrowdControl::High)
        && !allied
            .iter()
            .any(|ally| ally.crowd_control == Some(CrowdControl::High))
    {
        score += HIGH_CC_BONUS;
    }

    if candidate.engage == Some(Engage::Primary)
        && !allied.iter().any(|ally| ally.engage == Some(Engage::Primary))
    {
        score += PRIMARY_ENGAGE_BONUS;
    }

    for ally in allied {
        if ally.synergizes_with(candidate) {
            score += SYNERGY_BONUS;
        }
        if candidate.synergizes_with(ally) {
            score += SYNERGY_BONUS;
        }
    }

    for foe in enemy {
        if candidate.counters_item(foe) || foe.is_countered_by(candidate) {
            score += COUNTERS_ENEMY_BONUS;
        }
        if foe.counters_item(candidate) || candidate.is_countered_by(foe) {
            score -= COUNTERED_BY_ENEMY_PENALTY;
        }
    }

    score.max(0)
}

fn damage_stack_penalty(candidate: &Item, allied: &[&Item]) -> i32 {
    let Some(damage) = candidate.damage_type else {
        return 0;
    };

    let physical = allied
        .iter()
        .filter(|a| a.damage_type.is_some_and(DamageType::deals_physical))
        .count();
    let magic = allied
        .iter()
        .filter(|a| a.damage_type.is_some_and(DamageType::deals_magic))
        .count();

    let mut penalty = 0;
    if damage == DamageType::Physical && physical >= DAMAGE_STACK_THRESHOLD {
        penalty += DAMAGE_STACK_PENALTY;
    }
    if damage == DamageType::Magic && magic >= DAMAGE_STACK_THRESHOLD {
        penalty += DAMAGE_STACK_PENALTY;
    }
    penalty
}
