//! Explore log rows: icon, title and reward annotations per event.

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;
use survivor_game::{Catalog, DiscoveryKind, EventKind, ExploreEvent, ExploreLog, Obstacle, catalog};

const UNKNOWN_OBSTACLE: &str = "Unknown Obstacle";
const UNKNOWN_LOCATION: &str = "None";

/// Icon shown next to a log row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Discovery,
    Obstacle,
    Beast,
    Fled,
    StatUpgrade,
    LevelUp,
    Market,
    Unknown,
}

impl Glyph {
    #[must_use]
    pub const fn for_kind(kind: &EventKind) -> Self {
        match kind {
            EventKind::Discovery(_) => Self::Discovery,
            EventKind::Obstacle(_) => Self::Obstacle,
            EventKind::DefeatedBeast | EventKind::Beast(_) => Self::Beast,
            EventKind::FledBeast => Self::Fled,
            EventKind::StatUpgrade(_) => Self::StatUpgrade,
            EventKind::LevelUp { .. } => Self::LevelUp,
            EventKind::BuyItems { .. } => Self::Market,
            EventKind::Unknown { .. } => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovery => "🌟",
            Self::Obstacle => "🕳️",
            Self::Beast => "👹",
            Self::Fled => "🏃",
            Self::StatUpgrade => "📈",
            Self::LevelUp => "🔝",
            Self::Market => "🏪",
            Self::Unknown => "❓",
        }
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub icon: Glyph,
    pub title: String,
    /// Reward and penalty chips, in display order.
    pub annotations: SmallVec<[String; 4]>,
}

/// One rendered row plus the stable key the list keys it by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntryView {
    pub key: usize,
    #[serde(flatten)]
    pub event: EventView,
}

/// Format one explore event. Missing catalog entries degrade to placeholders.
#[must_use]
pub fn present_event(catalog: &Catalog, event: &ExploreEvent) -> EventView {
    EventView {
        icon: Glyph::for_kind(&event.kind),
        title: title(catalog, &event.kind),
        annotations: annotations(event),
    }
}

/// Rows for the whole log, newest first, keyed `len..=1`.
#[must_use]
pub fn present_log(catalog: &Catalog, log: &ExploreLog) -> Vec<LogEntryView> {
    let len = log.len();
    log.iter()
        .enumerate()
        .map(|(index, event)| LogEntryView {
            key: len - index,
            event: present_event(catalog, event),
        })
        .collect()
}

fn title(catalog: &Catalog, kind: &EventKind) -> String {
    match kind {
        EventKind::Beast(_) => "Encountered beast".to_string(),
        EventKind::Discovery(discovery) => match discovery.kind {
            DiscoveryKind::Gold => "Discovered Gold".to_string(),
            DiscoveryKind::Health => "Discovered Health".to_string(),
            DiscoveryKind::Loot => "Discovered Loot".to_string(),
            DiscoveryKind::Unknown => {
                log::debug!("discovery of unknown kind");
                "Discovered Unknown".to_string()
            }
        },
        EventKind::Obstacle(obstacle) => obstacle_title(catalog, obstacle),
        EventKind::DefeatedBeast => "Defeated Beast".to_string(),
        EventKind::FledBeast => "Fled from Beast".to_string(),
        EventKind::LevelUp { .. } => "Level Up".to_string(),
        EventKind::StatUpgrade(_) => "Stats Upgraded".to_string(),
        EventKind::BuyItems { .. } => "Visited Market".to_string(),
        EventKind::Unknown { tag } => {
            log::debug!("no title for explore event `{tag}`");
            "Unknown Event".to_string()
        }
    }
}

fn obstacle_title(catalog: &Catalog, obstacle: &Obstacle) -> String {
    let name = catalog.obstacle_name(obstacle.id).unwrap_or_else(|| {
        log::debug!("obstacle id {} missing from catalog", obstacle.id);
        UNKNOWN_OBSTACLE
    });
    if obstacle.avoided() {
        return format!("Avoided {name}");
    }
    let location = obstacle
        .location
        .as_deref()
        .filter(|location| !location.is_empty())
        .unwrap_or(UNKNOWN_LOCATION);
    format!("{name} hit your {location}")
}

fn annotations(event: &ExploreEvent) -> SmallVec<[String; 4]> {
    let mut out = SmallVec::new();

    if let Some(xp) = event.xp_reward.filter(|xp| *xp > 0) {
        out.push(format!("+{xp} XP"));
    }

    if let EventKind::Obstacle(obstacle) = &event.kind {
        match obstacle.damage {
            Some(0) => out.push("Avoided".to_string()),
            Some(damage) => {
                let mut text = format!("-{damage} Health");
                if obstacle.critical_hit {
                    text.push_str(" critical hit!");
                }
                out.push(text);
            }
            None => log::debug!("obstacle {} recorded without damage", obstacle.id),
        }
    }

    if let Some(gold) = event.gold_reward.filter(|gold| *gold > 0) {
        out.push(format!("+{gold} Gold"));
    }

    match &event.kind {
        EventKind::Discovery(discovery) => {
            let amount = discovery.amount;
            match discovery.kind {
                DiscoveryKind::Gold => out.push(format!("+{amount} Gold")),
                DiscoveryKind::Health => out.push(format!("+{amount} Health")),
                DiscoveryKind::Loot => out.push(format!("+{amount} Loot")),
                DiscoveryKind::Unknown => {}
            }
        }
        EventKind::StatUpgrade(stats) => {
            let increases: Vec<String> = stats
                .increases()
                .map(|(stat, value)| format!("+{value} {}", stat_abbreviation(stat)))
                .collect();
            if !increases.is_empty() {
                out.push(increases.join(", "));
            }
        }
        EventKind::LevelUp { level: Some(level) } if *level > 0 => {
            out.push(format!("Reached Level {level}"));
        }
        EventKind::BuyItems {
            potions: Some(potions),
        } => {
            if *potions > 0 {
                out.push(format!("+{potions} Potions"));
            } else {
                out.push("No Potions".to_string());
            }
        }
        _ => {}
    }

    if !event.items.is_empty() {
        out.push(format!("Equipped {} items", event.items.len()));
    }

    if let EventKind::Beast(Some(beast)) = &event.kind {
        out.push(format!("Level {} Power {}", beast.level, beast.power()));
    }

    out
}

/// First three characters of a stat name, uppercased: `strength` -> `STR`.
#[must_use]
pub fn stat_abbreviation(stat: &str) -> String {
    stat.chars().take(3).collect::<String>().to_uppercase()
}

/// Build a row view model against the embedded catalog.
#[must_use]
pub fn build_event_viewmodel(event: &ExploreEvent) -> EventView {
    present_event(catalog(), event)
}
