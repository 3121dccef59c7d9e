//! Deterministic item specials.
//!
//! Specials are a pure function of `(item id, level, seed)`: the seed is fixed per
//! item instance, so the same item always shows the same name and bonus. Each
//! special slot hashes a domain-separated item id with xxHash64 keyed by the seed
//! and reduces it into the matching catalog table.

use crate::catalog::Catalog;
use crate::items::ItemId;
use twox_hash::XxHash64;

/// Level at which the bonus-stat special ("of Power") appears.
pub const BONUS_UNLOCK_LEVEL: u16 = 15;
/// Level at which the name prefix and suffix ("Agony Bane") appear.
pub const NAME_UNLOCK_LEVEL: u16 = 19;

const BONUS_DOMAIN: &[u8; 8] = b"SURV-SP1";
const PREFIX_DOMAIN: &[u8; 8] = b"SURV-PRE";
const SUFFIX_DOMAIN: &[u8; 8] = b"SURV-SUF";

/// Decorations unlocked on an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ItemSpecials<'a> {
    pub prefix: Option<&'a str>,
    pub suffix: Option<&'a str>,
    /// Bonus-stat special, looked up in the catalog for its stat text.
    pub special1: Option<&'a str>,
}

impl ItemSpecials<'_> {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none() && self.special1.is_none()
    }

    /// `"{prefix} {suffix} {base}"` once the item has a suffix, `base` otherwise.
    #[must_use]
    pub fn display_name(&self, base: &str) -> String {
        match self.suffix {
            Some(suffix) => self
                .prefix
                .into_iter()
                .chain([suffix, base])
                .collect::<Vec<_>>()
                .join(" "),
            None => base.to_string(),
        }
    }
}

/// Derive the specials an item carries at `level`.
#[must_use]
pub fn derive_specials(catalog: &Catalog, id: ItemId, level: u16, seed: u64) -> ItemSpecials<'_> {
    if level < BONUS_UNLOCK_LEVEL {
        return ItemSpecials::default();
    }

    let special1 = pick(catalog.bonus_specials(), BONUS_DOMAIN, id, seed).map(|b| b.name.as_str());
    if level < NAME_UNLOCK_LEVEL {
        return ItemSpecials {
            special1,
            ..ItemSpecials::default()
        };
    }

    ItemSpecials {
        prefix: pick(catalog.name_prefixes(), PREFIX_DOMAIN, id, seed).map(String::as_str),
        suffix: pick(catalog.name_suffixes(), SUFFIX_DOMAIN, id, seed).map(String::as_str),
        special1,
    }
}

fn pick<'t, T>(table: &'t [T], domain: &[u8; 8], id: ItemId, seed: u64) -> Option<&'t T> {
    let len = u64::try_from(table.len()).ok().filter(|len| *len > 0)?;
    let index = usize::try_from(slot_hash(domain, id, seed) % len).ok()?;
    table.get(index)
}

fn slot_hash(domain: &[u8; 8], id: ItemId, seed: u64) -> u64 {
    let mut buf = [0u8; 9];
    buf[..8].copy_from_slice(domain);
    buf[8] = id.get();
    XxHash64::oneshot(seed, &buf)
}
