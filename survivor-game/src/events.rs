//! Exploration outcomes recorded in the adventurer's explore log.
//!
//! The game store hands events over as flat JSON records discriminated by a
//! `type` string with one optional payload object per kind. On decode they
//! become an [`EventKind`] carrying only the payload that kind needs; an
//! unrecognised `type` decodes to [`EventKind::Unknown`] instead of failing.

use crate::items::ItemId;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;

/// Reward category of a discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscoveryKind {
    Gold,
    Health,
    Loot,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Discovery {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: DiscoveryKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Obstacle {
    /// Catalog id; 0 is never assigned.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u8,
    /// Body location that was hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// `None` when the record did not say how much damage was taken.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<u16>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_hit: bool,
}

impl Obstacle {
    /// Only an explicit zero counts as dodged.
    #[must_use]
    pub const fn avoided(&self) -> bool {
        matches!(self.damage, Some(0))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeastSighting {
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tier: u8,
}

impl BeastSighting {
    #[must_use]
    pub fn power(&self) -> u32 {
        u32::from(self.tier).saturating_mul(u32::from(self.level))
    }
}

/// Stat increases in the order the game reported them.
///
/// Decoding keeps JSON field order and skips values that are not non-negative
/// integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StatDeltas(SmallVec<[(String, u32); 7]>);

impl StatDeltas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stat: impl Into<String>, value: u32) {
        self.0.push((stat.into(), value));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(stat, value)| (stat.as_str(), *value))
    }

    /// Stats that actually went up.
    pub fn increases(&self) -> impl Iterator<Item = (&str, u32)> {
        self.iter().filter(|(_, value)| *value > 0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for StatDeltas {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(stat, value)| (stat.into(), value))
                .collect(),
        )
    }
}

impl Serialize for StatDeltas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (stat, value) in &self.0 {
            map.serialize_entry(stat, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatDeltas {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatDeltasVisitor;

        impl<'de> Visitor<'de> for StatDeltasVisitor {
            type Value = StatDeltas;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of stat names to increases")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut deltas = StatDeltas::new();
                while let Some((stat, value)) =
                    access.next_entry::<String, serde_json::Value>()?
                {
                    if let Some(value) = value.as_u64().and_then(|v| u32::try_from(v).ok()) {
                        deltas.push(stat, value);
                    }
                }
                Ok(deltas)
            }
        }

        deserializer.deserialize_map(StatDeltasVisitor)
    }
}

/// What happened, with exactly the payload that outcome carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    Discovery(Discovery),
    Obstacle(Obstacle),
    DefeatedBeast,
    FledBeast,
    StatUpgrade(StatDeltas),
    LevelUp { level: Option<u16> },
    BuyItems { potions: Option<u32> },
    /// Beast encounter; `None` when the record carried no beast details.
    Beast(Option<BeastSighting>),
    /// A `type` this client does not know.
    Unknown { tag: String },
}

impl EventKind {
    /// Wire discriminator for this kind.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Discovery(_) => "discovery",
            Self::Obstacle(_) => "obstacle",
            Self::DefeatedBeast => "defeated_beast",
            Self::FledBeast => "fled_beast",
            Self::StatUpgrade(_) => "stat_upgrade",
            Self::LevelUp { .. } => "level_up",
            Self::BuyItems { .. } => "buy_items",
            Self::Beast(_) => "beast",
            Self::Unknown { tag } => tag,
        }
    }
}

/// One entry of the explore log. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawExploreEvent", into = "RawExploreEvent")]
pub struct ExploreEvent {
    pub kind: EventKind,
    pub xp_reward: Option<u32>,
    pub gold_reward: Option<u32>,
    /// Items equipped as part of this event.
    pub items: SmallVec<[ItemId; 4]>,
}

impl ExploreEvent {
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            xp_reward: None,
            gold_reward: None,
            items: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn with_xp(mut self, xp: u32) -> Self {
        self.xp_reward = Some(xp);
        self
    }

    #[must_use]
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold_reward = Some(gold);
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = ItemId>) -> Self {
        self.items = items.into_iter().collect();
        self
    }
}

/// Flat record shape used by the game store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawExploreEvent {
    #[serde(rename = "type", default)]
    tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xp_reward: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gold_reward: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<SmallVec<[ItemId; 4]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discovery: Option<Discovery>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    obstacle: Option<Obstacle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stats: Option<StatDeltas>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    potions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    beast: Option<BeastSighting>,
}

impl RawExploreEvent {
    fn into_kind(self) -> EventKind {
        let Self {
            tag,
            discovery,
            obstacle,
            stats,
            level,
            potions,
            beast,
            ..
        } = self;
        match tag.as_str() {
            "discovery" => EventKind::Discovery(discovery.unwrap_or_default()),
            "obstacle" => EventKind::Obstacle(obstacle.unwrap_or_default()),
            "defeated_beast" => EventKind::DefeatedBeast,
            "fled_beast" => EventKind::FledBeast,
            "stat_upgrade" => EventKind::StatUpgrade(stats.unwrap_or_default()),
            "level_up" => EventKind::LevelUp { level },
            "buy_items" => EventKind::BuyItems { potions },
            "beast" => EventKind::Beast(beast),
            _ => {
                log::debug!("explore event `{tag}` has no known shape");
                EventKind::Unknown { tag }
            }
        }
    }
}

impl From<RawExploreEvent> for ExploreEvent {
    fn from(mut raw: RawExploreEvent) -> Self {
        let xp_reward = raw.xp_reward;
        let gold_reward = raw.gold_reward;
        let items = raw.items.take().unwrap_or_default();
        Self {
            kind: raw.into_kind(),
            xp_reward,
            gold_reward,
            items,
        }
    }
}

impl From<ExploreEvent> for RawExploreEvent {
    fn from(event: ExploreEvent) -> Self {
        let mut raw = Self {
            tag: event.kind.tag().to_string(),
            xp_reward: event.xp_reward,
            gold_reward: event.gold_reward,
            items: (!event.items.is_empty()).then_some(event.items),
            ..Self::default()
        };
        match event.kind {
            EventKind::Discovery(discovery) => raw.discovery = Some(discovery),
            EventKind::Obstacle(obstacle) => raw.obstacle = Some(obstacle),
            EventKind::StatUpgrade(stats) => raw.stats = Some(stats),
            EventKind::LevelUp { level } => raw.level = level,
            EventKind::BuyItems { potions } => raw.potions = potions,
            EventKind::Beast(beast) => raw.beast = beast,
            EventKind::DefeatedBeast | EventKind::FledBeast | EventKind::Unknown { .. } => {}
        }
        raw
    }
}

/// Reads `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("explore log JSON is invalid: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exploration history, newest event first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExploreLog {
    events: VecDeque<ExploreEvent>,
}

impl ExploreLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new outcome at the head of the log.
    pub fn push_newest(&mut self, event: ExploreEvent) {
        self.events.push_front(event);
    }

    #[must_use]
    pub fn newest(&self) -> Option<&ExploreEvent> {
        self.events.front()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ExploreEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Parse a JSON array of events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not an array of event records.
    pub fn from_json(json: &str) -> Result<Self, EventLogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, EventLogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<'a> IntoIterator for &'a ExploreLog {
    type Item = &'a ExploreEvent;
    type IntoIter = std::collections::vec_deque::Iter<'a, ExploreEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
