// Proptest generators for draft domain types.

use proptest::prelude::*;

use crate::domain::catalog::{CrowdControl, DamageType, Engage, Item};
use crate::domain::rules::{Role, Side};

pub fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::First), Just(Side::Second)]
}

pub fn role() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Top),
        Just(Role::Jungle),
        Just(Role::Mid),
        Just(Role::Bottom),
        Just(Role::Support),
    ]
}

pub fn damage_type() -> impl Strategy<Value = Option<DamageType>> {
    prop_oneof![
        Just(None),
        Just(Some(DamageType::Physical)),
        Just(Some(DamageType::Magic)),
        Just(Some(DamageType::Hybrid)),
    ]
}

pub fn crowd_control() -> impl Strategy<Value = Option<CrowdControl>> {
    prop_oneof![
        Just(None),
        Just(Some(CrowdControl::Low)),
        Just(Some(CrowdControl::Medium)),
        Just(Some(CrowdControl::High)),
    ]
}

pub fn engage() -> impl Strategy<Value = Option<Engage>> {
    prop_oneof![
        Just(None),
        Just(Some(Engage::Primary)),
        Just(Some(Engage::Secondary)),
    ]
}

/// Ids drawn from a small pool so relation lists actually hit other items.
fn pool_id() -> impl Strategy<Value = String> {
    (0usize..8).prop_map(|n| format!("p{n}"))
}

/// An item with arbitrary attributes and relations into the `p0..p7` pool.
pub fn item() -> impl Strategy<Value = Item> {
    (
        pool_id(),
        damage_type(),
        crowd_control(),
        engage(),
        prop::collection::vec(pool_id(), 0..3),
        prop::collection::vec(pool_id(), 0..3),
        prop::collection::vec(pool_id(), 0..3),
    )
        .prop_map(
            |(id, damage_type, crowd_control, engage, synergies, counters, countered_by)| Item {
                damage_type,
                crowd_control,
                engage,
                synergies,
                counters,
                countered_by,
                ..Item::new(id.clone(), id)
            },
        )
}

pub fn lineup(max: usize) -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item(), 0..=max)
}

/// Raw choices used to drive a draft: one `(item index, role index)` pair
/// per turn, resolved against whatever is still legal at that point.
pub fn draft_choices() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..64, 0usize..5), 0..=20)
}
