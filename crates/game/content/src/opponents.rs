//! Table-driven opponent generation.
//!
//! An [`OpponentTable`] lists roster variants per fight. The generator picks
//! the pool of the highest fight number not above the current one, then a
//! variant from the loop counter, so a harder rematch in the same loop
//! always meets a different roster when the pool has more than one.

use battle_core::{
    DifficultyCurve, FightContext, ItemId, OpponentGenerator, OpponentSetup, Roster, RosterError,
};

/// One slot of an opponent roster template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotSpec {
    pub item: Option<ItemId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: u8,
}

impl SlotSpec {
    pub fn item(item: &str) -> Self {
        Self {
            item: Some(ItemId::from(item)),
            level: 0,
        }
    }

    pub fn upgraded(item: &str, level: u8) -> Self {
        Self {
            item: Some(ItemId::from(item)),
            level,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterTemplate {
    pub name: String,
    pub slots: Vec<SlotSpec>,
}

impl RosterTemplate {
    pub fn new(name: impl Into<String>, slots: Vec<SlotSpec>) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }

    fn build(&self) -> Result<Roster, RosterError> {
        Roster::from_slots(
            self.slots
                .iter()
                .map(|slot| (slot.item.clone(), slot.level)),
        )
    }
}

/// Roster variants available from `fight` onwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FightPool {
    pub fight: u32,
    pub variants: Vec<RosterTemplate>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentTable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub curve: DifficultyCurve,
    pub fights: Vec<FightPool>,
}

#[derive(Debug, thiserror::Error)]
pub enum OpponentTableError {
    #[error("opponent table has no fight pools")]
    Empty,

    #[error("fight pool {fight} has no roster variants")]
    EmptyPool { fight: u32 },

    #[error("roster variant '{name}' is invalid: {source}")]
    InvalidRoster {
        name: String,
        #[source]
        source: RosterError,
    },
}

struct BuiltPool {
    fight: u32,
    rosters: Vec<Roster>,
}

/// [`OpponentGenerator`] backed by an [`OpponentTable`].
///
/// Templates are validated and turned into rosters once, so generation
/// itself cannot fail.
pub struct TableOpponentGenerator {
    curve: DifficultyCurve,
    pools: Vec<BuiltPool>,
}

impl TableOpponentGenerator {
    pub fn new(table: &OpponentTable) -> Result<Self, OpponentTableError> {
        if table.fights.is_empty() {
            return Err(OpponentTableError::Empty);
        }

        let mut pools = Vec::with_capacity(table.fights.len());
        for pool in &table.fights {
            if pool.variants.is_empty() {
                return Err(OpponentTableError::EmptyPool { fight: pool.fight });
            }
            let rosters = pool
                .variants
                .iter()
                .map(|template| {
                    template
                        .build()
                        .map_err(|source| OpponentTableError::InvalidRoster {
                            name: template.name.clone(),
                            source,
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            pools.push(BuiltPool {
                fight: pool.fight,
                rosters,
            });
        }
        pools.sort_by_key(|pool| pool.fight);

        Ok(Self {
            curve: table.curve,
            pools,
        })
    }

    pub fn curve(&self) -> &DifficultyCurve {
        &self.curve
    }

    fn pool_for(&self, fight_number: u32) -> &BuiltPool {
        self.pools
            .iter()
            .rev()
            .find(|pool| pool.fight <= fight_number)
            .unwrap_or(&self.pools[0])
    }

    fn roster_for(&self, fight: &FightContext) -> &Roster {
        let pool = self.pool_for(fight.fight_number);
        let offset = u64::from(fight.game_plus) + u64::from(fight.harder_rematch);
        // pools are never empty after construction
        let index = (offset % pool.rosters.len() as u64) as usize;
        &pool.rosters[index]
    }
}

impl OpponentGenerator for TableOpponentGenerator {
    fn generate(&self, fight: &FightContext) -> OpponentSetup {
        let roster = self.roster_for(fight).clone();
        let difficulty = self.curve.multiplier(fight);

        tracing::debug!(
            target: "content::opponents",
            fight = fight.fight_number,
            game_plus = fight.game_plus,
            harder = fight.harder_rematch,
            slots = roster.len(),
            difficulty,
            "generated opponent"
        );

        OpponentSetup::new(roster, difficulty)
    }
}

impl std::fmt::Debug for TableOpponentGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableOpponentGenerator")
            .field("curve", &self.curve)
            .field("pools", &self.pools.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::BattleConfig;

    fn table() -> OpponentTable {
        OpponentTable {
            curve: DifficultyCurve::default(),
            fights: vec![
                FightPool {
                    fight: 3,
                    variants: vec![RosterTemplate::new(
                        "late",
                        vec![SlotSpec::item("chili"), SlotSpec::item("pepper")],
                    )],
                },
                FightPool {
                    fight: 1,
                    variants: vec![
                        RosterTemplate::new("a", vec![SlotSpec::item("apple")]),
                        RosterTemplate::new("b", vec![SlotSpec::empty(), SlotSpec::item("pepper")]),
                    ],
                },
            ],
        }
    }

    #[test]
    fn picks_pool_by_fight_number() {
        let generator = TableOpponentGenerator::new(&table()).unwrap();

        assert_eq!(generator.generate(&FightContext::new(1, 0)).roster.len(), 1);
        assert_eq!(generator.generate(&FightContext::new(2, 0)).roster.len(), 1);
        assert_eq!(generator.generate(&FightContext::new(3, 0)).roster.len(), 2);
        assert_eq!(generator.generate(&FightContext::new(9, 0)).roster.len(), 2);
        // before the first listed fight, the earliest pool is used
        assert_eq!(generator.generate(&FightContext::new(0, 0)).roster.len(), 1);
    }

    #[test]
    fn harder_rematch_changes_roster_and_difficulty() {
        let generator = TableOpponentGenerator::new(&table()).unwrap();
        let normal = generator.generate(&FightContext::new(1, 0));
        let harder = generator.generate(&FightContext::new(1, 0).harder(true));

        assert_ne!(normal.roster, harder.roster);
        assert!(harder.difficulty > normal.difficulty);
    }

    #[test]
    fn loops_rotate_variants_and_raise_difficulty() {
        let generator = TableOpponentGenerator::new(&table()).unwrap();
        let first = generator.generate(&FightContext::new(1, 0));
        let second = generator.generate(&FightContext::new(1, 1));
        let third = generator.generate(&FightContext::new(1, 2));

        assert_ne!(first.roster, second.roster);
        assert_eq!(first.roster, third.roster);
        assert!(third.difficulty > second.difficulty);
    }

    #[test]
    fn rejects_malformed_tables() {
        let empty = OpponentTable {
            curve: DifficultyCurve::default(),
            fights: Vec::new(),
        };
        assert!(matches!(
            TableOpponentGenerator::new(&empty),
            Err(OpponentTableError::Empty)
        ));

        let no_variants = OpponentTable {
            curve: DifficultyCurve::default(),
            fights: vec![FightPool {
                fight: 2,
                variants: Vec::new(),
            }],
        };
        assert!(matches!(
            TableOpponentGenerator::new(&no_variants),
            Err(OpponentTableError::EmptyPool { fight: 2 })
        ));

        let oversized = OpponentTable {
            curve: DifficultyCurve::default(),
            fights: vec![FightPool {
                fight: 1,
                variants: vec![RosterTemplate::new(
                    "huge",
                    vec![SlotSpec::item("apple"); BattleConfig::MAX_SLOTS + 1],
                )],
            }],
        };
        assert!(matches!(
            TableOpponentGenerator::new(&oversized),
            Err(OpponentTableError::InvalidRoster { .. })
        ));
    }
}
