//! Loot Survivor View Models
//!
//! Turns explore-log events and loot items into the plain data a rendering layer
//! draws: icons, titles, reward chips and item tooltips. Everything here is a pure
//! function of its inputs and the read-only catalog.

pub mod explore_log;
pub mod item_tooltip;

pub use explore_log::{
    EventView, Glyph, LogEntryView, build_event_viewmodel, present_event, present_log,
    stat_abbreviation,
};
pub use item_tooltip::{
    ItemTooltipView, PresentError, StatBonusView, TooltipCache, build_item_viewmodel,
    present_item,
};
