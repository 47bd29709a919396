// Shared catalog fixtures for domain tests.

use std::sync::Arc;

use crate::domain::catalog::{Catalog, CrowdControl, DamageType, Engage, Item};
use crate::domain::rules::Role;
use crate::domain::state::DraftAction;

/// Number of plain items in `sample_catalog`, enough for any full draft.
pub const PLAIN_ITEMS: usize = 24;

pub fn plain_id(n: usize) -> String {
    format!("item{n:02}")
}

/// Catalog with `PLAIN_ITEMS` attribute-free items plus a handful of
/// classified ones used by scenario tests.
pub fn sample_catalog() -> Catalog {
    let mut items: Vec<Item> = (0..PLAIN_ITEMS)
        .map(|n| Item::new(plain_id(n), format!("Item {n:02}")))
        .collect();

    items.push(Item {
        damage_type: Some(DamageType::Physical),
        synergies: vec!["Yuumi".into()],
        ..Item::new("Garen", "Garen")
    });
    items.push(Item {
        damage_type: Some(DamageType::Magic),
        crowd_control: Some(CrowdControl::High),
        engage: Some(Engage::Primary),
        counters: vec!["Yasuo".into()],
        ..Item::new("Malphite", "Malphite")
    });
    items.push(Item {
        damage_type: Some(DamageType::Physical),
        countered_by: vec!["Malphite".into()],
        ..Item::new("Yasuo", "Yasuo")
    });
    items.push(Item {
        damage_type: Some(DamageType::Magic),
        synergies: vec!["Garen".into()],
        ..Item::new("Yuumi", "Yuumi")
    });

    Catalog::from_items(items).expect("fixture catalog is valid")
}

pub fn item(catalog: &Catalog, id: &str) -> Arc<Item> {
    catalog
        .get(id)
        .cloned()
        .unwrap_or_else(|| panic!("fixture item {id} missing"))
}

pub fn ban(catalog: &Catalog, id: &str) -> DraftAction {
    DraftAction::Ban {
        item: item(catalog, id),
    }
}

pub fn pick(catalog: &Catalog, id: &str, role: Role) -> DraftAction {
    DraftAction::Pick {
        item: item(catalog, id),
        role,
    }
}
