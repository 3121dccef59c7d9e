//! Loot Survivor Game Model
//!
//! Platform-agnostic domain types for the Loot Survivor client: explore-log
//! events, loot items, the item level curve, deterministic item specials and the
//! static tables they are looked up in. Nothing here renders anything.

pub mod catalog;
pub mod events;
pub mod items;
pub mod numbers;
pub mod progression;
pub mod specials;

// Re-export commonly used types
pub use catalog::{BonusSpecial, Catalog, CatalogError, ObstacleEntry, catalog};
pub use events::{
    BeastSighting, Discovery, DiscoveryKind, EventKind, EventLogError, ExploreEvent, ExploreLog,
    Obstacle, StatDeltas,
};
pub use items::{InvalidTier, Item, ItemId, ItemMeta, ItemType, Slot, Tier};
pub use progression::{LevelCurve, MAX_ITEM_LEVEL, SquareRootCurve};
pub use specials::{BONUS_UNLOCK_LEVEL, ItemSpecials, NAME_UNLOCK_LEVEL, derive_specials};

/// Source of the already-computed game state the presenters read.
/// Platform-specific implementations should provide this
pub trait GameStateSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the explore log, newest event first
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be read or decoded.
    fn load_explore_log(&self) -> Result<ExploreLog, Self::Error>;

    /// Load the adventurer's items together with the seed their specials derive from
    ///
    /// # Errors
    ///
    /// Returns an error if the items cannot be read or decoded.
    fn load_items(&self) -> Result<(Vec<Item>, u64), Self::Error>;
}
