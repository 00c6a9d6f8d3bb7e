//! Adjacency and category synergy.
//!
//! Each occupied slot receives a multiplier in
//! `[BattleConfig::SYNERGY_MIN, BattleConfig::SYNERGY_MAX]` computed from the
//! categories of its roster, in this order:
//!
//! ```text
//! 1.0
//!  + hub bonus        (hub item: per same-category item anywhere, excluding itself)
//!  | member bonus     (ordinary item: per adjacent same-category item)
//!  + pair bonuses     (per adjacent neighbour forming a listed category pair)
//!  + support bonuses  (per adjacent neighbour of the slot's support category)
//!  → clamp
//! ```
//!
//! Multipliers are computed once from the frozen roster when a battle is
//! compiled and never change while it runs. Sides never see each other's
//! roster here.

use crate::catalog::{EffectCatalog, ItemCategory};
use crate::config::BattleConfig;
use crate::grid::Grid;
use crate::state::{ItemId, Roster};

/// Item that anchors its category.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HubItem {
    pub item: ItemId,
    pub category: ItemCategory,
}

/// Fixed bonus for two adjacent items of the given categories (either order).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairBonus {
    pub first: ItemCategory,
    pub second: ItemCategory,
    pub bonus: f64,
}

impl PairBonus {
    pub const fn new(first: ItemCategory, second: ItemCategory, bonus: f64) -> Self {
        Self {
            first,
            second,
            bonus,
        }
    }

    fn matches(&self, a: ItemCategory, b: ItemCategory) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

/// Bonus a category receives from each adjacent item of a support category.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupportBonus {
    pub category: ItemCategory,
    pub support: ItemCategory,
    pub bonus_per_neighbor: f64,
}

impl SupportBonus {
    pub const fn new(category: ItemCategory, support: ItemCategory, bonus_per_neighbor: f64) -> Self {
        Self {
            category,
            support,
            bonus_per_neighbor,
        }
    }
}

/// Data-driven synergy rule table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SynergyRules {
    pub hubs: Vec<HubItem>,
    /// Added to a hub per same-category item anywhere in the roster.
    pub hub_bonus_per_member: f64,
    /// Added to an ordinary member per adjacent same-category item.
    pub adjacent_member_bonus: f64,
    pub pairs: Vec<PairBonus>,
    pub supports: Vec<SupportBonus>,
}

impl SynergyRules {
    pub const DEFAULT_HUB_BONUS: f64 = 1.0;
    pub const DEFAULT_MEMBER_BONUS: f64 = 0.10;

    /// Rules with no hubs, pairs or supports; only the member bonus applies.
    pub fn empty() -> Self {
        Self {
            hubs: Vec::new(),
            hub_bonus_per_member: Self::DEFAULT_HUB_BONUS,
            adjacent_member_bonus: Self::DEFAULT_MEMBER_BONUS,
            pairs: Vec::new(),
            supports: Vec::new(),
        }
    }

    /// Returns true if `item` is the hub of `category`.
    pub fn is_hub(&self, item: &ItemId, category: ItemCategory) -> bool {
        self.hubs
            .iter()
            .any(|hub| hub.item == *item && hub.category == category)
    }

    fn pair_bonus(&self, a: ItemCategory, b: ItemCategory) -> f64 {
        self.pairs
            .iter()
            .filter(|pair| pair.matches(a, b))
            .map(|pair| pair.bonus)
            .sum()
    }

    fn support_bonus(&self, category: ItemCategory, neighbor: ItemCategory) -> f64 {
        self.supports
            .iter()
            .filter(|rule| rule.category == category && rule.support == neighbor)
            .map(|rule| rule.bonus_per_neighbor)
            .sum()
    }
}

impl Default for SynergyRules {
    fn default() -> Self {
        use ItemCategory::*;

        Self {
            hubs: vec![
                HubItem {
                    item: ItemId::from("honey"),
                    category: Sweetener,
                },
                HubItem {
                    item: ItemId::from("cheese"),
                    category: Dairy,
                },
            ],
            pairs: vec![
                PairBonus::new(Sweetener, Fruit, 0.15),
                PairBonus::new(Sweetener, Berry, 0.40),
                PairBonus::new(Dairy, Grain, 0.15),
            ],
            supports: vec![
                SupportBonus::new(Spice, Utensil, 0.20),
                SupportBonus::new(Herb, Utensil, 0.10),
            ],
            ..Self::empty()
        }
    }
}

/// Computes synergy multipliers for one side's roster.
///
/// Categories are resolved once on construction; every query afterwards is a
/// pure function of that snapshot.
pub struct SynergyResolver<'a> {
    roster: &'a Roster,
    rules: &'a SynergyRules,
    grid: Grid,
    categories: Vec<Option<ItemCategory>>,
}

impl<'a> SynergyResolver<'a> {
    pub fn new(roster: &'a Roster, catalog: &dyn EffectCatalog, rules: &'a SynergyRules) -> Self {
        let categories = roster
            .slots()
            .iter()
            .map(|slot| slot.item.as_ref().and_then(|item| catalog.category(item)))
            .collect();

        Self {
            roster,
            rules,
            grid: Grid::for_roster(roster.len()),
            categories,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    fn category_at(&self, index: usize) -> Option<ItemCategory> {
        self.categories.get(index).copied().flatten()
    }

    /// Synergy multiplier of the slot at `index`.
    ///
    /// Empty slots and items without a category get the neutral 1.0.
    pub fn multiplier(&self, index: usize) -> f64 {
        let (Some(item), Some(category)) = (self.roster.item_at(index), self.category_at(index))
        else {
            return BattleConfig::SYNERGY_MIN;
        };

        let neighbors: Vec<ItemCategory> = self
            .grid
            .neighbors(index)
            .into_iter()
            .filter_map(|neighbor| self.category_at(neighbor))
            .collect();

        let mut bonus = 0.0;

        if self.rules.is_hub(item, category) {
            let members = (0..self.categories.len())
                .filter(|&other| other != index && self.category_at(other) == Some(category))
                .count();
            bonus += self.rules.hub_bonus_per_member * members as f64;
        } else {
            let adjacent = neighbors.iter().filter(|&&c| c == category).count();
            bonus += self.rules.adjacent_member_bonus * adjacent as f64;
        }

        for &neighbor in &neighbors {
            if neighbor != category {
                bonus += self.rules.pair_bonus(category, neighbor);
            }
            bonus += self.rules.support_bonus(category, neighbor);
        }

        (BattleConfig::SYNERGY_MIN + bonus).clamp(BattleConfig::SYNERGY_MIN, BattleConfig::SYNERGY_MAX)
    }

    /// Multipliers for every slot in index order.
    pub fn multipliers(&self) -> Vec<f64> {
        (0..self.roster.len()).map(|index| self.multiplier(index)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogTable, ItemEffectDescriptor};

    fn catalog() -> CatalogTable {
        use ItemCategory::*;
        CatalogTable::from_descriptors([
            ItemEffectDescriptor::new("honey", 2.0, 1000, Sweetener),
            ItemEffectDescriptor::new("sugar", 1.0, 1000, Sweetener),
            ItemEffectDescriptor::new("syrup", 1.0, 1000, Sweetener),
            ItemEffectDescriptor::new("apple", 1.0, 1000, Fruit),
            ItemEffectDescriptor::new("strawberry", 1.0, 1000, Berry),
            ItemEffectDescriptor::new("pepper", -1.0, 1000, Spice),
            ItemEffectDescriptor::new("whisk", 0.5, 1000, Utensil),
        ])
        .unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn multiplier_stays_in_range_for_every_small_roster() {
        const CHOICES: [Option<&str>; 8] = [
            None,
            Some("honey"),
            Some("sugar"),
            Some("syrup"),
            Some("apple"),
            Some("strawberry"),
            Some("pepper"),
            Some("whisk"),
        ];
        // a full row plus one slot below, so both row and column neighbours occur
        const SLOTS: u32 = 5;

        let catalog = catalog();
        let rules = SynergyRules::default();
        let (mut lowest, mut highest) = (f64::INFINITY, f64::NEG_INFINITY);

        for code in 0..CHOICES.len().pow(SLOTS) {
            let items = (0..SLOTS)
                .map(|slot| CHOICES[code / CHOICES.len().pow(slot) % CHOICES.len()]);
            let roster = Roster::from_items(items).unwrap();
            let resolver = SynergyResolver::new(&roster, &catalog, &rules);

            for multiplier in resolver.multipliers() {
                assert!(
                    (BattleConfig::SYNERGY_MIN..=BattleConfig::SYNERGY_MAX).contains(&multiplier),
                    "multiplier {multiplier} out of range for {roster:?}"
                );
                lowest = lowest.min(multiplier);
                highest = highest.max(multiplier);
            }
        }

        assert_eq!(lowest, BattleConfig::SYNERGY_MIN);
        assert_eq!(highest, BattleConfig::SYNERGY_MAX);
    }

    #[test]
    fn lone_item_is_neutral() {
        let roster = Roster::from_items([Some("sugar"), None, None, None]).unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        assert!(approx(resolver.multiplier(0), 1.0));
    }

    #[test]
    fn unknown_item_and_empty_slot_are_neutral() {
        let roster = Roster::from_items([Some("water"), None, Some("sugar")]).unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        assert!(approx(resolver.multiplier(0), 1.0));
        assert!(approx(resolver.multiplier(1), 1.0));
        assert!(approx(resolver.multiplier(9), 1.0));
    }

    #[test]
    fn ordinary_members_gain_per_adjacent_member() {
        let roster = Roster::from_items([Some("sugar"), Some("syrup"), None, None]).unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        assert!(approx(resolver.multiplier(0), 1.10));
        assert!(approx(resolver.multiplier(1), 1.10));
    }

    #[test]
    fn hub_counts_members_anywhere_excluding_itself() {
        // honey at 0, sugar at 3 (same row, not adjacent), syrup at 7
        let roster = Roster::from_items([
            Some("honey"),
            None,
            None,
            Some("sugar"),
            None,
            None,
            None,
            Some("syrup"),
        ])
        .unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        assert!(approx(resolver.multiplier(0), 3.0));
        // sugar and syrup are vertically adjacent ordinary members
        assert!(approx(resolver.multiplier(3), 1.10));
    }

    #[test]
    fn cross_category_pairs_apply_both_ways() {
        let roster = Roster::from_items([Some("sugar"), Some("strawberry"), Some("apple")]).unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        // sugar next to berry
        assert!(approx(resolver.multiplier(0), 1.40));
        // berry next to sugar and apple (berry/fruit is not a pair)
        assert!(approx(resolver.multiplier(1), 1.40));
        // apple only touches the berry
        assert!(approx(resolver.multiplier(2), 1.0));
    }

    #[test]
    fn support_category_boosts_regardless_of_identity() {
        let roster = Roster::from_items([Some("whisk"), Some("pepper"), Some("whisk")]).unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        assert!(approx(resolver.multiplier(1), 1.40));
        assert!(approx(resolver.multiplier(0), 1.0));
    }

    #[test]
    fn multiplier_is_capped() {
        let mut items = vec![Some("honey")];
        items.extend(std::iter::repeat_n(Some("sugar"), 7));
        let roster = Roster::from_items(items).unwrap();
        let catalog = catalog();
        let rules = SynergyRules::default();
        let resolver = SynergyResolver::new(&roster, &catalog, &rules);
        assert!(approx(resolver.multiplier(0), BattleConfig::SYNERGY_MAX));
        assert!(
            resolver
                .multipliers()
                .iter()
                .all(|&m| (BattleConfig::SYNERGY_MIN..=BattleConfig::SYNERGY_MAX).contains(&m))
        );
    }
}
