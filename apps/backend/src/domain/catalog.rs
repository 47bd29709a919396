//! Read-only item catalog.
//!
//! The catalog is loaded once at process start and shared behind `Arc`.
//! Sessions hold `Arc<Item>` handles into it and never mutate items.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    #[serde(rename = "AD")]
    Physical,
    #[serde(rename = "AP")]
    Magic,
    #[serde(rename = "HYBRID")]
    Hybrid,
}

impl DamageType {
    /// Infer the dominant damage type from 0..=10 offensive ratings.
    ///
    /// A side only dominates when the other rating stays below 4;
    /// everything else counts as hybrid.
    pub fn from_ratings(physical: u8, magic: u8) -> Self {
        if magic > physical && physical < 4 {
            DamageType::Magic
        } else if physical > magic && magic < 4 {
            DamageType::Physical
        } else {
            DamageType::Hybrid
        }
    }

    pub fn deals_physical(self) -> bool {
        matches!(self, DamageType::Physical | DamageType::Hybrid)
    }

    pub fn deals_magic(self) -> bool {
        matches!(self, DamageType::Magic | DamageType::Hybrid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdControl {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engage {
    Primary,
    Secondary,
}

/// A selectable item. Relations reference other items by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_type: Option<DamageType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crowd_control: Option<CrowdControl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engage: Option<Engage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synergies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub counters: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub countered_by: Vec<String>,
}

impl Item {
    /// Bare item with no classification attributes.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: Vec::new(),
            damage_type: None,
            crowd_control: None,
            engage: None,
            synergies: Vec::new(),
            counters: Vec::new(),
            countered_by: Vec::new(),
        }
    }

    pub fn synergizes_with(&self, other: &Item) -> bool {
        self.synergies.iter().any(|id| *id == other.id)
    }

    pub fn counters_item(&self, other: &Item) -> bool {
        self.counters.iter().any(|id| *id == other.id)
    }

    pub fn is_countered_by(&self, other: &Item) -> bool {
        self.countered_by.iter().any(|id| *id == other.id)
    }
}

/// Raw offensive ratings, accepted in place of an explicit damage type.
#[derive(Debug, Clone, Copy, Deserialize)]
struct Ratings {
    physical: u8,
    magic: u8,
}

#[derive(Debug, Deserialize)]
struct ItemRecord {
    #[serde(flatten)]
    item: Item,
    #[serde(default)]
    ratings: Option<Ratings>,
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        let mut item = record.item;
        if item.damage_type.is_none() {
            item.damage_type = record
                .ratings
                .map(|r| DamageType::from_ratings(r.physical, r.magic));
        }
        item
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog item has an empty id (name: {name:?})")]
    EmptyId { name: String },
    #[error("duplicate catalog item id: {0}")]
    DuplicateId(String),
}

/// Immutable, name-ordered collection of items with O(1) id lookup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<Item>>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self, CatalogError> {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut by_id = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(CatalogError::EmptyId {
                    name: item.name.clone(),
                });
            }
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
            by_id,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ItemRecord> = serde_json::from_str(json)?;
        Self::from_items(records.into_iter().map(Item::from))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Item>> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn items(&self) -> &[Arc<Item>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
