use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::error::{BattleError, ErrorSeverity};

use super::ItemId;

/// Errors raised while building a roster snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("roster has {count} slots, maximum is {max}")]
    TooManySlots { count: usize, max: usize },
}

impl BattleError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }
}

/// A single unlocked slot on a side's platter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSlot {
    pub index: usize,
    pub item: Option<ItemId>,
    pub upgrade_level: u8,
}

impl RosterSlot {
    pub fn is_occupied(&self) -> bool {
        self.item.is_some()
    }
}

/// Ordered, read-only snapshot of one side's unlocked slots.
///
/// A roster is copied out of the caller's live inventory when a battle
/// starts; later changes to that inventory never reach a running battle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    slots: ArrayVec<RosterSlot, { BattleConfig::MAX_SLOTS }>,
}

impl Roster {
    /// Creates `slot_count` unlocked but empty slots.
    pub fn empty(slot_count: usize) -> Result<Self, RosterError> {
        Self::from_slots((0..slot_count).map(|_| (None, 0)))
    }

    /// Builds a roster from `(item, upgrade_level)` pairs in slot order.
    pub fn from_slots<I>(slots: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (Option<ItemId>, u8)>,
    {
        let slots: Vec<_> = slots.into_iter().collect();
        if slots.len() > BattleConfig::MAX_SLOTS {
            return Err(RosterError::TooManySlots {
                count: slots.len(),
                max: BattleConfig::MAX_SLOTS,
            });
        }

        let slots = slots
            .into_iter()
            .enumerate()
            .map(|(index, (item, upgrade_level))| RosterSlot {
                index,
                item,
                upgrade_level,
            })
            .collect::<ArrayVec<_, { BattleConfig::MAX_SLOTS }>>();

        Ok(Self { slots })
    }

    /// Convenience constructor for rosters with no upgrades.
    pub fn from_items<I, T>(items: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = Option<T>>,
        T: Into<ItemId>,
    {
        Self::from_slots(items.into_iter().map(|item| (item.map(Into::into), 0)))
    }

    /// Number of unlocked slots (occupied or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&RosterSlot> {
        self.slots.get(index)
    }

    /// Item placed in `index`, if the slot exists and is occupied.
    pub fn item_at(&self, index: usize) -> Option<&ItemId> {
        self.slots.get(index).and_then(|slot| slot.item.as_ref())
    }

    /// Iterates over occupied slots in index order.
    pub fn occupied(&self) -> impl Iterator<Item = &RosterSlot> {
        self.slots.iter().filter(|slot| slot.is_occupied())
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_indexed_slots() {
        let roster = Roster::from_items([Some("honey"), None, Some("milk")]).unwrap();

        assert_eq!(roster.len(), 3);
        assert_eq!(roster.occupied_count(), 2);
        assert_eq!(roster.item_at(2), Some(&ItemId::from("milk")));
        assert_eq!(roster.item_at(1), None);
        assert_eq!(roster.item_at(7), None);
        assert!(roster.slots().iter().enumerate().all(|(i, s)| s.index == i));
    }

    #[test]
    fn rejects_more_than_max_slots() {
        let result = Roster::empty(BattleConfig::MAX_SLOTS + 3);
        assert_eq!(
            result,
            Err(RosterError::TooManySlots {
                count: BattleConfig::MAX_SLOTS + 3,
                max: BattleConfig::MAX_SLOTS,
            })
        );
    }

    #[test]
    fn empty_roster_has_no_occupied_slots() {
        let roster = Roster::empty(4).unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster.occupied().count(), 0);
    }
}
