use proptest::prelude::*;

use crate::domain::catalog::{CrowdControl, DamageType, Engage, Item};
use crate::domain::scoring::*;
use crate::domain::{test_gens, test_prelude};

fn with_damage(id: &str, damage: DamageType) -> Item {
    Item {
        damage_type: Some(damage),
        ..Item::new(id, id)
    }
}

#[test]
fn unclassified_candidate_scores_base() {
    let candidate = Item::new("a", "A");
    assert_eq!(score_pick(&candidate, &[], &[]), BASE_SCORE);

    let ally = Item::new("b", "B");
    let foe = Item::new("c", "C");
    assert_eq!(score_pick(&candidate, &[&ally], &[&foe]), BASE_SCORE);
}

#[test]
fn third_physical_dealer_is_penalized() {
    let candidate = with_damage("c", DamageType::Physical);
    let ad = with_damage("a1", DamageType::Physical);
    let hybrid = with_damage("a2", DamageType::Hybrid);
    let ap = with_damage("a3", DamageType::Magic);

    assert_eq!(score_pick(&candidate, &[&ad], &[]), BASE_SCORE);
    assert_eq!(score_pick(&candidate, &[&ad, &ap], &[]), BASE_SCORE);
    // Hybrid allies count toward the physical stack.
    assert_eq!(
        score_pick(&candidate, &[&ad, &hybrid], &[]),
        BASE_SCORE - DAMAGE_STACK_PENALTY
    );
}

#[test]
fn third_magic_dealer_is_penalized() {
    let candidate = with_damage("c", DamageType::Magic);
    let ap1 = with_damage("a1", DamageType::Magic);
    let ap2 = with_damage("a2", DamageType::Magic);
    assert_eq!(
        score_pick(&candidate, &[&ap1, &ap2], &[]),
        BASE_SCORE - DAMAGE_STACK_PENALTY
    );
}

#[test]
fn hybrid_candidate_is_never_stack_penalized() {
    let candidate = with_damage("c", DamageType::Hybrid);
    let ad1 = with_damage("a1", DamageType::Physical);
    let ad2 = with_damage("a2", DamageType::Physical);
    let ap1 = with_damage("a3", DamageType::Magic);
    let ap2 = with_damage("a4", DamageType::Magic);
    assert_eq!(
        score_pick(&candidate, &[&ad1, &ad2, &ap1, &ap2], &[]),
        BASE_SCORE
    );
}

#[test]
fn high_cc_bonus_only_when_team_lacks_it() {
    let candidate = Item {
        crowd_control: Some(CrowdControl::High),
        ..Item::new("c", "C")
    };
    let medium = Item {
        crowd_control: Some(CrowdControl::Medium),
        ..Item::new("m", "M")
    };
    let high = Item {
        crowd_control: Some(CrowdControl::High),
        ..Item::new("h", "H")
    };

    assert_eq!(score_pick(&candidate, &[], &[]), BASE_SCORE + HIGH_CC_BONUS);
    assert_eq!(
        score_pick(&candidate, &[&medium], &[]),
        BASE_SCORE + HIGH_CC_BONUS
    );
    assert_eq!(score_pick(&candidate, &[&high], &[]), BASE_SCORE);
}

#[test]
fn primary_engage_bonus_only_when_team_lacks_it() {
    let candidate = Item {
        engage: Some(Engage::Primary),
        ..Item::new("c", "C")
    };
    let secondary = Item {
        engage: Some(Engage::Secondary),
        ..Item::new("s", "S")
    };
    let primary = Item {
        engage: Some(Engage::Primary),
        ..Item::new("p", "P")
    };

    assert_eq!(
        score_pick(&candidate, &[&secondary], &[]),
        BASE_SCORE + PRIMARY_ENGAGE_BONUS
    );
    assert_eq!(score_pick(&candidate, &[&primary], &[]), BASE_SCORE);
}

#[test]
fn synergy_counts_each_direction() {
    let candidate = Item {
        synergies: vec!["a".into()],
        ..Item::new("c", "C")
    };
    let one_way = Item::new("a", "A");
    let mutual = Item {
        synergies: vec!["c".into()],
        ..Item::new("a", "A")
    };
    let listed_by_ally_only = Item {
        synergies: vec!["c".into()],
        ..Item::new("b", "B")
    };

    assert_eq!(
        score_pick(&candidate, &[&one_way], &[]),
        BASE_SCORE + SYNERGY_BONUS
    );
    assert_eq!(
        score_pick(&candidate, &[&mutual], &[]),
        BASE_SCORE + 2 * SYNERGY_BONUS
    );
    assert_eq!(
        score_pick(&candidate, &[&one_way, &listed_by_ally_only], &[]),
        BASE_SCORE + 2 * SYNERGY_BONUS
    );
}

#[test]
fn countering_an_enemy_is_rewarded_from_either_list() {
    let candidate = Item {
        counters: vec!["e1".into()],
        ..Item::new("c", "C")
    };
    let listed = Item::new("e1", "E1");
    let self_declared = Item {
        countered_by: vec!["c".into()],
        ..Item::new("e2", "E2")
    };
    let both = Item {
        countered_by: vec!["c".into()],
        ..Item::new("e1", "E1")
    };

    assert_eq!(
        score_pick(&candidate, &[], &[&listed]),
        BASE_SCORE + COUNTERS_ENEMY_BONUS
    );
    assert_eq!(
        score_pick(&candidate, &[], &[&listed, &self_declared]),
        BASE_SCORE + 2 * COUNTERS_ENEMY_BONUS
    );
    // Listed on both sides still counts once per enemy.
    assert_eq!(
        score_pick(&candidate, &[], &[&both]),
        BASE_SCORE + COUNTERS_ENEMY_BONUS
    );
}

#[test]
fn being_countered_is_penalized() {
    let candidate = Item {
        countered_by: vec!["e1".into()],
        ..Item::new("c", "C")
    };
    let e1 = Item::new("e1", "E1");
    let e2 = Item {
        counters: vec!["c".into()],
        ..Item::new("e2", "E2")
    };

    assert_eq!(
        score_pick(&candidate, &[], &[&e1, &e2]),
        BASE_SCORE - 2 * COUNTERED_BY_ENEMY_PENALTY
    );
}

#[test]
fn enemy_relations_do_not_score_for_allies() {
    let candidate = Item {
        counters: vec!["a".into()],
        ..Item::new("c", "C")
    };
    let ally = Item::new("a", "A");
    assert_eq!(score_pick(&candidate, &[&ally], &[]), BASE_SCORE);
}

#[test]
fn rules_combine_additively() {
    let catalog = crate::domain::test_fixtures::sample_catalog();
    let malphite = catalog.get("Malphite").unwrap();
    let yasuo = catalog.get("Yasuo").unwrap();

    // High CC + primary engage, counters Yasuo from both lists.
    assert_eq!(
        score_pick(malphite, &[], &[yasuo.as_ref()]),
        BASE_SCORE + HIGH_CC_BONUS + PRIMARY_ENGAGE_BONUS + COUNTERS_ENEMY_BONUS
    );
    // And the reverse pairing costs Yasuo the countered penalty.
    assert_eq!(
        score_pick(yasuo, &[], &[malphite.as_ref()]),
        BASE_SCORE - COUNTERED_BY_ENEMY_PENALTY
    );
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: score is a pure function of its inputs and never negative.
    #[test]
    fn prop_score_is_deterministic_and_non_negative(
        candidate in test_gens::item(),
        allied in test_gens::lineup(4),
        enemy in test_gens::lineup(5),
    ) {
        let allied_refs: Vec<&Item> = allied.iter().collect();
        let enemy_refs: Vec<&Item> = enemy.iter().collect();

        let first = score_pick(&candidate, &allied_refs, &enemy_refs);
        let second = score_pick(&candidate.clone(), &allied_refs, &enemy_refs);
        prop_assert_eq!(first, second);
        prop_assert!(first >= 0);
    }

    /// Property: lineup order does not matter.
    #[test]
    fn prop_score_ignores_lineup_order(
        candidate in test_gens::item(),
        allied in test_gens::lineup(4),
        enemy in test_gens::lineup(5),
    ) {
        let allied_refs: Vec<&Item> = allied.iter().collect();
        let enemy_refs: Vec<&Item> = enemy.iter().collect();
        let allied_rev: Vec<&Item> = allied.iter().rev().collect();
        let enemy_rev: Vec<&Item> = enemy.iter().rev().collect();

        prop_assert_eq!(
            score_pick(&candidate, &allied_refs, &enemy_refs),
            score_pick(&candidate, &allied_rev, &enemy_rev)
        );
    }
}
