//! Static, read-only game tables: obstacles, loot items and item specials.
//!
//! The default tables ship with the crate as JSON assets and are parsed once on
//! first use. Callers that need different data can build their own [`Catalog`]
//! with [`Catalog::from_json_parts`].

use crate::items::{ItemId, ItemMeta};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_OBSTACLES_DATA: &str = include_str!("../assets/data/obstacles.json");
const DEFAULT_ITEMS_DATA: &str = include_str!("../assets/data/items.json");
const DEFAULT_SPECIALS_DATA: &str = include_str!("../assets/data/specials.json");

/// Errors raised while building a catalog from JSON tables.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse {table} table: {source}")]
    Parse {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("obstacle id {0} appears more than once")]
    DuplicateObstacle(u8),
    #[error("item id {0} appears more than once")]
    DuplicateItem(ItemId),
    #[error("{0} table must not be empty")]
    EmptyTable(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleEntry {
    pub id: u8,
    pub name: String,
}

/// A bonus-stat special ("of Power") and the stat text it grants ("+3 STR").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSpecial {
    pub name: String,
    pub bonus: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ObstacleTable {
    #[serde(default)]
    obstacles: Vec<ObstacleEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ItemTable {
    #[serde(default)]
    items: Vec<ItemMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
struct SpecialsTable {
    #[serde(default)]
    name_prefixes: Vec<String>,
    #[serde(default)]
    name_suffixes: Vec<String>,
    #[serde(default)]
    bonus_specials: Vec<BonusSpecial>,
}

/// Lookup tables shared by every presenter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    obstacles: BTreeMap<u8, String>,
    items: BTreeMap<ItemId, ItemMeta>,
    specials: SpecialsTable,
}

impl Catalog {
    /// Build a catalog from the three JSON documents.
    ///
    /// # Errors
    ///
    /// Returns an error if any document fails to parse, an id is repeated, or a
    /// specials table is empty.
    pub fn from_json_parts(
        obstacles_json: &str,
        items_json: &str,
        specials_json: &str,
    ) -> Result<Self, CatalogError> {
        let obstacles: ObstacleTable = parse_table("obstacles", obstacles_json)?;
        let items: ItemTable = parse_table("items", items_json)?;
        let specials: SpecialsTable = parse_table("specials", specials_json)?;

        let mut catalog = Self {
            specials,
            ..Self::default()
        };
        for entry in obstacles.obstacles {
            if catalog.obstacles.insert(entry.id, entry.name).is_some() {
                return Err(CatalogError::DuplicateObstacle(entry.id));
            }
        }
        for meta in items.items {
            let id = meta.id;
            if catalog.items.insert(id, meta).is_some() {
                return Err(CatalogError::DuplicateItem(id));
            }
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse the tables embedded in the crate.
    ///
    /// Falls back to an empty catalog (every lookup degrades to its placeholder)
    /// if the embedded data is malformed.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json_parts(
            DEFAULT_OBSTACLES_DATA,
            DEFAULT_ITEMS_DATA,
            DEFAULT_SPECIALS_DATA,
        )
        .unwrap_or_else(|err| {
            log::warn!("embedded catalog rejected, using empty tables: {err}");
            Self::default()
        })
    }

    /// Check the invariants the specials derivation relies on.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyTable` naming the first empty specials table.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.specials.name_prefixes.is_empty() {
            return Err(CatalogError::EmptyTable("name_prefixes"));
        }
        if self.specials.name_suffixes.is_empty() {
            return Err(CatalogError::EmptyTable("name_suffixes"));
        }
        if self.specials.bonus_specials.is_empty() {
            return Err(CatalogError::EmptyTable("bonus_specials"));
        }
        Ok(())
    }

    #[must_use]
    pub fn obstacle_name(&self, id: u8) -> Option<&str> {
        self.obstacles.get(&id).map(String::as_str)
    }

    /// Obstacles in ascending id order.
    pub fn obstacles(&self) -> impl Iterator<Item = (u8, &str)> {
        self.obstacles.iter().map(|(id, name)| (*id, name.as_str()))
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&ItemMeta> {
        self.items.get(&id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemMeta> {
        self.items.values()
    }

    #[must_use]
    pub fn name_prefixes(&self) -> &[String] {
        &self.specials.name_prefixes
    }

    #[must_use]
    pub fn name_suffixes(&self) -> &[String] {
        &self.specials.name_suffixes
    }

    #[must_use]
    pub fn bonus_specials(&self) -> &[BonusSpecial] {
        &self.specials.bonus_specials
    }

    /// Stat text granted by a bonus special, e.g. `"+3 STR"` for `"of Power"`.
    #[must_use]
    pub fn stat_bonus(&self, special: &str) -> Option<&str> {
        self.specials
            .bonus_specials
            .iter()
            .find(|entry| entry.name == special)
            .map(|entry| entry.bonus.as_str())
    }
}

fn parse_table<T>(table: &'static str, json: &str) -> Result<T, CatalogError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json).map_err(|source| CatalogError::Parse { table, source })
}

/// The embedded catalog, parsed on first access.
#[must_use]
pub fn catalog() -> &'static Catalog {
    static CATALOG: OnceLock<Catalog> = OnceLock::new();
    CATALOG.get_or_init(Catalog::load_from_static)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemType, Slot, Tier};

    const SPECIALS: &str = r#"{
        "name_prefixes": ["Agony"],
        "name_suffixes": ["Bane"],
        "bonus_specials": [{"name": "of Power", "bonus": "+3 STR"}]
    }"#;

    #[test]
    fn embedded_tables_are_complete() {
        let catalog = catalog();
        assert_eq!(catalog.obstacles().count(), 75);
        assert_eq!(catalog.items().count(), 101);
        assert_eq!(catalog.name_prefixes().len(), 69);
        assert_eq!(catalog.name_suffixes().len(), 18);
        assert_eq!(catalog.bonus_specials().len(), 16);
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn embedded_lookups_resolve_known_entries() {
        let catalog = catalog();
        assert_eq!(catalog.obstacle_name(1), Some("Demonic Altar"));
        assert_eq!(catalog.obstacle_name(0), None);
        assert_eq!(catalog.stat_bonus("of Power"), Some("+3 STR"));
        assert_eq!(catalog.stat_bonus("of Nothing"), None);

        let katana = catalog.item(ItemId(42)).expect("katana");
        assert_eq!(katana.name, "Katana");
        assert_eq!(katana.tier, Tier::T1);
        assert_eq!(katana.item_type, ItemType::Blade);
        assert_eq!(katana.slot, Slot::Weapon);
    }

    #[test]
    fn every_embedded_item_has_consistent_jewelry_slots() {
        for meta in catalog().items() {
            let jewelry_slot = matches!(meta.slot, Slot::Neck | Slot::Ring);
            assert_eq!(meta.item_type.is_jewelry(), jewelry_slot, "{}", meta.name);
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let obstacles = r#"{"obstacles": [{"id": 1, "name": "A"}, {"id": 1, "name": "B"}]}"#;
        let err = Catalog::from_json_parts(obstacles, r#"{"items": []}"#, SPECIALS).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateObstacle(1)));

        let items = r#"{"items": [
            {"id": 3, "name": "Amulet", "tier": 1, "type": "Necklace", "slot": "Neck"},
            {"id": 3, "name": "Amulet", "tier": 1, "type": "Necklace", "slot": "Neck"}
        ]}"#;
        let err = Catalog::from_json_parts("{}", items, SPECIALS).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateItem(ItemId(3))));
    }

    #[test]
    fn malformed_or_empty_tables_are_rejected() {
        let err = Catalog::from_json_parts("not json", "{}", SPECIALS).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { table: "obstacles", .. }));

        let err = Catalog::from_json_parts("{}", "{}", "{}").unwrap_err();
        assert!(matches!(err, CatalogError::EmptyTable("name_prefixes")));
        assert_eq!(err.to_string(), "name_prefixes table must not be empty");
    }

    #[test]
    fn bad_tier_in_item_table_is_a_parse_error() {
        let items = r#"{"items": [{"id": 9, "name": "Odd", "tier": 6, "type": "Magic", "slot": "Weapon"}]}"#;
        let err = Catalog::from_json_parts("{}", items, SPECIALS).unwrap_err();
        assert!(matches!(err, CatalogError::Parse { table: "items", .. }));
    }
}
