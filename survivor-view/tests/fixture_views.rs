use std::hash::Hasher;

use serde::Deserialize;
use survivor_game::{ExploreLog, Item, SquareRootCurve, catalog};
use survivor_view::{Glyph, TooltipCache, build_item_viewmodel, present_item, present_log};
use twox_hash::XxHash64;

const LOG: &str = include_str!("../../survivor-game/tests/fixtures/explore_log.json");
const ITEMS: &str = include_str!("../../survivor-game/tests/fixtures/items.json");

#[derive(Deserialize)]
struct ItemsFixture {
    seed: u64,
    items: Vec<Item>,
}

fn fixture_log() -> ExploreLog {
    ExploreLog::from_json(LOG).unwrap()
}

#[test]
fn fixture_log_renders_every_row() {
    let rows = present_log(catalog(), &fixture_log());
    let rendered: Vec<(usize, Glyph, &str, Vec<&str>)> = rows
        .iter()
        .map(|row| {
            (
                row.key,
                row.event.icon,
                row.event.title.as_str(),
                row.event.annotations.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    assert_eq!(
        rendered,
        vec![
            (10, Glyph::Beast, "Encountered beast", vec!["Level 5 Power 15"]),
            (
                9,
                Glyph::Market,
                "Visited Market",
                vec!["+2 Potions", "Equipped 2 items"]
            ),
            (
                8,
                Glyph::StatUpgrade,
                "Stats Upgraded",
                vec!["+1 STR, +2 VIT, +1 CHA"]
            ),
            (7, Glyph::LevelUp, "Level Up", vec!["Reached Level 7"]),
            (
                6,
                Glyph::Obstacle,
                "Pendulum Blades hit your Chest",
                vec!["+3 XP", "-14 Health critical hit!"]
            ),
            (
                5,
                Glyph::Obstacle,
                "Avoided Demonic Altar",
                vec!["+3 XP", "Avoided"]
            ),
            (
                4,
                Glyph::Discovery,
                "Discovered Gold",
                vec!["+1 XP", "+18 Gold"]
            ),
            (
                3,
                Glyph::Beast,
                "Defeated Beast",
                vec!["+20 XP", "+9 Gold"]
            ),
            (2, Glyph::Fled, "Fled from Beast", vec!["+2 XP"]),
            (1, Glyph::Unknown, "Unknown Event", vec![]),
        ]
    );
}

#[test]
fn avoided_obstacles_always_read_avoided() {
    for row in present_log(catalog(), &fixture_log()) {
        if row.event.annotations.iter().any(|a| a == "Avoided") {
            assert!(row.event.title.starts_with("Avoided "), "{}", row.event.title);
        }
    }
}

#[test]
fn log_rows_serialize_flat() {
    let rows = present_log(catalog(), &fixture_log());
    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["key"], 10);
    assert_eq!(json["icon"], "beast");
    assert_eq!(json["title"], "Encountered beast");
    assert_eq!(json["annotations"][0], "Level 5 Power 15");
}

#[test]
fn fixture_items_present_with_levels_and_power() {
    let fixture: ItemsFixture = serde_json::from_str(ITEMS).unwrap();
    let summary: Vec<(String, u16, u32, u32)> = fixture
        .items
        .iter()
        .map(|item| {
            let view = build_item_viewmodel(*item, fixture.seed).unwrap();
            (view.tier.to_string(), view.level, view.power, view.xp_to_next)
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            ("T1".to_string(), 10, 50, 121),
            ("T5".to_string(), 15, 15, 256),
            ("T3".to_string(), 20, 60, 400),
            ("T1".to_string(), 1, 5, 4),
        ]
    );
}

#[test]
fn tooltip_snapshot_is_stable_through_cache() {
    let fixture: ItemsFixture = serde_json::from_str(ITEMS).unwrap();
    let mut cache = TooltipCache::new(catalog(), SquareRootCurve::ITEMS);

    let direct = tooltip_digest(fixture.items.iter().map(|item| {
        present_item(catalog(), &SquareRootCurve::ITEMS, *item, fixture.seed).unwrap()
    }));
    let cached = tooltip_digest(
        fixture
            .items
            .iter()
            .map(|item| cache.present(*item, fixture.seed).unwrap()),
    );
    assert_eq!(direct, cached);
}

fn tooltip_digest(views: impl Iterator<Item = survivor_view::ItemTooltipView>) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    for view in views {
        hasher.write(serde_json::to_string(&view).unwrap().as_bytes());
    }
    hasher.finish()
}
