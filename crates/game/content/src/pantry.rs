//! Builtin pantry: the default combat catalog and opponent table.
//!
//! These mirror the files under `data/` and let tools run without a data
//! directory. Ingredients that only matter for cooking (`water`, `salt`,
//! `egg`, ...) are deliberately absent and sit inert in a roster.

use battle_core::{
    CatalogError, CatalogTable, DifficultyCurve, ItemCategory, ItemEffectDescriptor,
    SynergyRules,
};

use crate::opponents::{FightPool, OpponentTable, RosterTemplate, SlotSpec};

/// Default item effects.
pub fn builtin_descriptors() -> Vec<ItemEffectDescriptor> {
    use ItemCategory::*;

    vec![
        // sweeteners
        ItemEffectDescriptor::new("honey", 2.0, 1000, Sweetener),
        ItemEffectDescriptor::new("sugar", 1.5, 800, Sweetener),
        ItemEffectDescriptor::new("syrup", 3.0, 1500, Sweetener).with_duration(9000),
        // fruit and berries
        ItemEffectDescriptor::new("strawberry", 1.2, 900, Berry),
        ItemEffectDescriptor::new("blueberry", 0.8, 600, Berry),
        ItemEffectDescriptor::new("raspberry", 1.6, 1100, Berry),
        ItemEffectDescriptor::new("apple", 1.0, 1000, Fruit),
        ItemEffectDescriptor::new("peach", 2.2, 1600, Fruit),
        // dairy
        ItemEffectDescriptor::new("milk", 1.0, 1200, Dairy),
        ItemEffectDescriptor::new("butter", 2.5, 2000, Dairy),
        ItemEffectDescriptor::new("cheese", 1.8, 1400, Dairy),
        // grain
        ItemEffectDescriptor::new("flour", 0.6, 700, Grain),
        ItemEffectDescriptor::new("oats", 1.1, 1000, Grain),
        // spices hit the other side
        ItemEffectDescriptor::new("pepper", -1.0, 900, Spice),
        ItemEffectDescriptor::new("chili", -2.0, 1500, Spice).with_duration(6000),
        ItemEffectDescriptor::new("cinnamon", -0.8, 700, Spice),
        // garden
        ItemEffectDescriptor::new("carrot", 1.3, 1300, Vegetable),
        ItemEffectDescriptor::new("basil", 0.9, 1000, Herb),
        // utensils
        ItemEffectDescriptor::new("whisk", 0.5, 1500, Utensil),
        ItemEffectDescriptor::new("rolling_pin", -1.5, 2000, Utensil),
    ]
}

pub fn builtin_catalog() -> Result<CatalogTable, CatalogError> {
    CatalogTable::from_descriptors(builtin_descriptors())
}

pub fn builtin_synergy() -> SynergyRules {
    SynergyRules::default()
}

/// Default opponent pools for the first fights of a loop.
pub fn builtin_opponents() -> OpponentTable {
    use SlotSpec as S;

    OpponentTable {
        curve: DifficultyCurve::default(),
        fights: vec![
            FightPool {
                fight: 1,
                variants: vec![
                    RosterTemplate::new(
                        "picnic_basket",
                        vec![S::item("apple"), S::item("pepper"), S::empty(), S::item("flour")],
                    ),
                    RosterTemplate::new(
                        "berry_stand",
                        vec![
                            S::item("blueberry"),
                            S::item("strawberry"),
                            S::item("cinnamon"),
                            S::empty(),
                        ],
                    ),
                ],
            },
            FightPool {
                fight: 3,
                variants: vec![
                    RosterTemplate::new(
                        "dairy_farm",
                        vec![
                            S::item("cheese"),
                            S::item("milk"),
                            S::item("oats"),
                            S::item("pepper"),
                            S::item("butter"),
                            S::empty(),
                        ],
                    ),
                    RosterTemplate::new(
                        "spice_rack",
                        vec![
                            S::item("chili"),
                            S::item("whisk"),
                            S::item("pepper"),
                            S::item("cinnamon"),
                            S::item("rolling_pin"),
                            S::item("basil"),
                        ],
                    ),
                ],
            },
            FightPool {
                fight: 5,
                variants: vec![
                    RosterTemplate::new(
                        "bakery",
                        vec![
                            S::upgraded("honey", 1),
                            S::item("sugar"),
                            S::item("flour"),
                            S::item("butter"),
                            S::item("raspberry"),
                            S::upgraded("chili", 1),
                            S::item("whisk"),
                            S::item("oats"),
                        ],
                    ),
                    RosterTemplate::new(
                        "orchard",
                        vec![
                            S::upgraded("peach", 2),
                            S::item("apple"),
                            S::item("syrup"),
                            S::item("pepper"),
                            S::item("rolling_pin"),
                            S::item("carrot"),
                            S::item("cinnamon"),
                            S::item("strawberry"),
                        ],
                    ),
                ],
            },
        ],
    }
}
