//! Item tooltip: level, power and specials for one loot item.

use serde::Serialize;
use std::collections::HashMap;
use survivor_game::numbers::fraction_to_percent;
use survivor_game::{
    Catalog, Item, ItemId, ItemMeta, ItemType, LevelCurve, Slot, SquareRootCurve, Tier, catalog,
    derive_specials,
};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PresentError {
    #[error("item {0} is not in the item table")]
    UnknownItem(ItemId),
}

/// Bonus-stat chip, e.g. `of Power` / `+3 STR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StatBonusView {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTooltipView {
    /// Base name, decorated with prefix and suffix once unlocked.
    pub name: String,
    pub tier: Tier,
    pub item_type: ItemType,
    pub slot: Slot,
    pub level: u16,
    pub power: u32,
    pub xp: u16,
    pub xp_to_next: u32,
    pub progress: f64,
    pub bonus: Option<StatBonusView>,
}

impl ItemTooltipView {
    #[must_use]
    pub fn xp_label(&self) -> String {
        format!("{}/{}", self.xp, self.xp_to_next)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        fraction_to_percent(self.progress)
    }
}

/// Present one item at its current xp.
///
/// # Errors
///
/// Returns [`PresentError::UnknownItem`] if `item.id` has no catalog entry.
pub fn present_item(
    catalog: &Catalog,
    curve: &impl LevelCurve,
    item: Item,
    seed: u64,
) -> Result<ItemTooltipView, PresentError> {
    let meta = catalog
        .item(item.id)
        .ok_or(PresentError::UnknownItem(item.id))?;
    let level = curve.level(u32::from(item.xp));
    let (name, bonus) = decorate(catalog, meta, level, seed);
    Ok(assemble(meta, curve, item, level, name, bonus))
}

/// Present an item against the embedded catalog and the item level curve.
///
/// # Errors
///
/// Returns [`PresentError::UnknownItem`] if `item.id` has no catalog entry.
pub fn build_item_viewmodel(item: Item, seed: u64) -> Result<ItemTooltipView, PresentError> {
    present_item(catalog(), &SquareRootCurve::ITEMS, item, seed)
}

fn decorate(
    catalog: &Catalog,
    meta: &ItemMeta,
    level: u16,
    seed: u64,
) -> (String, Option<StatBonusView>) {
    let specials = derive_specials(catalog, meta.id, level, seed);
    let bonus = specials
        .special1
        .filter(|label| !label.is_empty())
        .map(|label| StatBonusView {
            label: label.to_string(),
            value: catalog
                .stat_bonus(label)
                .unwrap_or_else(|| {
                    log::debug!("no stat bonus text for special `{label}`");
                    ""
                })
                .to_string(),
        });
    (specials.display_name(&meta.name), bonus)
}

fn assemble(
    meta: &ItemMeta,
    curve: &impl LevelCurve,
    item: Item,
    level: u16,
    name: String,
    bonus: Option<StatBonusView>,
) -> ItemTooltipView {
    let xp = u32::from(item.xp);
    ItemTooltipView {
        name,
        tier: meta.tier,
        item_type: meta.item_type,
        slot: meta.slot,
        level,
        power: u32::from(level) * u32::from(meta.tier.power_multiplier()),
        xp: item.xp,
        xp_to_next: curve.next_level_xp(level),
        progress: curve.progress(xp),
        bonus,
    }
}

type DecorationKey = (ItemId, u16, u64);

/// Memoizes the specials-derived part of tooltips by `(id, level, seed)`.
///
/// Level, power and progress are recomputed on every call, so a cached entry
/// never goes stale as xp grows within a level.
#[derive(Debug)]
pub struct TooltipCache<'c, C> {
    catalog: &'c Catalog,
    curve: C,
    decorations: HashMap<DecorationKey, (String, Option<StatBonusView>)>,
}

impl<'c, C: LevelCurve> TooltipCache<'c, C> {
    #[must_use]
    pub fn new(catalog: &'c Catalog, curve: C) -> Self {
        Self {
            catalog,
            curve,
            decorations: HashMap::new(),
        }
    }

    /// Same result as [`present_item`], reusing previously derived specials.
    ///
    /// # Errors
    ///
    /// Returns [`PresentError::UnknownItem`] if `item.id` has no catalog entry.
    pub fn present(&mut self, item: Item, seed: u64) -> Result<ItemTooltipView, PresentError> {
        let catalog = self.catalog;
        let meta = catalog
            .item(item.id)
            .ok_or(PresentError::UnknownItem(item.id))?;
        let level = self.curve.level(u32::from(item.xp));
        let (name, bonus) = self
            .decorations
            .entry((item.id, level, seed))
            .or_insert_with(|| decorate(catalog, meta, level, seed))
            .clone();
        Ok(assemble(meta, &self.curve, item, level, name, bonus))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.decorations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.decorations.is_empty()
    }

    pub fn clear(&mut self) {
        self.decorations.clear();
    }
}
