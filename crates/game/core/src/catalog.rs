//! Static item → battle effect lookup.
//!
//! The catalog is an oracle: read-only data supplied by the content layer.
//! Items without an entry are ordinary cooking ingredients and sit inert in
//! a roster slot.

use std::collections::BTreeMap;

use crate::error::{BattleError, ErrorSeverity};
use crate::state::ItemId;

/// Synergy family an item belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemCategory {
    Sweetener,
    Fruit,
    Berry,
    Dairy,
    Grain,
    Spice,
    Vegetable,
    Herb,
    /// Kitchen tools; support neighbours rather than scoring strongly.
    Utensil,
}

/// Immutable battle ability of one item.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemEffectDescriptor {
    pub item_id: ItemId,
    /// Signed score change per activation. Negative values hit the opponent.
    pub magnitude_per_tick: f64,
    pub tick_interval_ms: u64,
    /// `None` keeps the effect alive for the whole battle.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_ms: Option<u64>,
    pub category: ItemCategory,
}

impl ItemEffectDescriptor {
    pub fn new(
        item_id: impl Into<ItemId>,
        magnitude_per_tick: f64,
        tick_interval_ms: u64,
        category: ItemCategory,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            magnitude_per_tick,
            tick_interval_ms,
            duration_ms: None,
            category,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration_ms.is_none()
    }

    /// Checks the structural constraints every catalog entry must satisfy.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if !self.magnitude_per_tick.is_finite() {
            return Err(CatalogError::NonFiniteMagnitude {
                item: self.item_id.clone(),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(CatalogError::InvalidInterval {
                item: self.item_id.clone(),
            });
        }
        if self.duration_ms == Some(0) {
            return Err(CatalogError::InvalidDuration {
                item: self.item_id.clone(),
            });
        }
        Ok(())
    }
}

/// Read-only lookup of item battle effects.
pub trait EffectCatalog: Send + Sync {
    /// Returns the descriptor for `item`, or `None` for non-combat items.
    fn descriptor(&self, item: &ItemId) -> Option<&ItemEffectDescriptor>;

    /// Category of `item`, if it has a battle effect.
    fn category(&self, item: &ItemId) -> Option<ItemCategory> {
        self.descriptor(item).map(|descriptor| descriptor.category)
    }
}

/// Errors raised while assembling a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("item '{item}' is defined more than once")]
    DuplicateItem { item: ItemId },

    #[error("item '{item}' has a zero tick interval")]
    InvalidInterval { item: ItemId },

    #[error("item '{item}' has a zero duration")]
    InvalidDuration { item: ItemId },

    #[error("item '{item}' has a non-finite magnitude")]
    NonFiniteMagnitude { item: ItemId },
}

impl BattleError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// In-memory catalog keyed by item id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogTable {
    entries: BTreeMap<ItemId, ItemEffectDescriptor>,
}

impl CatalogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = ItemEffectDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut table = Self::new();
        for descriptor in descriptors {
            table.insert(descriptor)?;
        }
        Ok(table)
    }

    /// Adds a validated descriptor. Ids must be unique.
    pub fn insert(&mut self, descriptor: ItemEffectDescriptor) -> Result<(), CatalogError> {
        descriptor.validate()?;
        if self.entries.contains_key(&descriptor.item_id) {
            return Err(CatalogError::DuplicateItem {
                item: descriptor.item_id,
            });
        }
        self.entries.insert(descriptor.item_id.clone(), descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemEffectDescriptor> {
        self.entries.values()
    }
}

impl EffectCatalog for CatalogTable {
    fn descriptor(&self, item: &ItemId) -> Option<&ItemEffectDescriptor> {
        self.entries.get(item)
    }
}
