//! Loot items, their quality tiers, types and equipment slots.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Identifier of a loot item in the static item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u8);

impl ItemId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item instance owned by an adventurer.
///
/// `xp` only ever grows over the item's life; level and progress are derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub xp: u16,
}

impl Item {
    #[must_use]
    pub const fn new(id: ItemId, xp: u16) -> Self {
        Self { id, xp }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("item tier must be within 1..=5, got {0}")]
pub struct InvalidTier(pub u8);

/// Coarse quality bucket, `T1` being the best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    T1,
    T2,
    T3,
    T4,
    T5,
}

impl Tier {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::T1 => 1,
            Self::T2 => 2,
            Self::T3 => 3,
            Self::T4 => 4,
            Self::T5 => 5,
        }
    }

    /// Multiplier used by the power rating, always in `1..=5`.
    #[must_use]
    pub const fn power_multiplier(self) -> u8 {
        6 - self.number()
    }
}

impl TryFrom<u8> for Tier {
    type Error = InvalidTier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::T1),
            2 => Ok(Self::T2),
            3 => Ok(Self::T3),
            4 => Ok(Self::T4),
            5 => Ok(Self::T5),
            other => Err(InvalidTier(other)),
        }
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> Self {
        tier.number()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.number())
    }
}

/// Material class of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Necklace,
    Ring,
    Magic,
    Cloth,
    Blade,
    Hide,
    Bludgeon,
    Metal,
}

impl ItemType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Necklace => "Necklace",
            Self::Ring => "Ring",
            Self::Magic => "Magic",
            Self::Cloth => "Cloth",
            Self::Blade => "Blade",
            Self::Hide => "Hide",
            Self::Bludgeon => "Bludgeon",
            Self::Metal => "Metal",
        }
    }

    #[must_use]
    pub const fn is_jewelry(self) -> bool {
        matches!(self, Self::Necklace | Self::Ring)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Equipment slot an item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Weapon,
    Chest,
    Head,
    Waist,
    Foot,
    Hand,
    Neck,
    Ring,
}

impl Slot {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weapon => "Weapon",
            Self::Chest => "Chest",
            Self::Head => "Head",
            Self::Waist => "Waist",
            Self::Foot => "Foot",
            Self::Hand => "Hand",
            Self::Neck => "Neck",
            Self::Ring => "Ring",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static metadata for one entry of the item table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub id: ItemId,
    pub name: String,
    pub tier: Tier,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub slot: Slot,
}
