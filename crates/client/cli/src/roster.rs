//! Text form of a player platter.
//!
//! Slots are comma separated, in slot order. A slot is empty, `item`, or
//! `item:level`. Whitespace around each part is ignored.
//!
//! ```text
//! honey:2, strawberry, , whisk
//! ```

use battle_core::{ItemId, Roster, RosterError};

#[derive(Debug, thiserror::Error)]
pub enum RosterParseError {
    #[error("slot {slot}: invalid upgrade level '{level}'")]
    InvalidLevel { slot: usize, level: String },

    #[error("slot {slot}: missing item before ':'")]
    MissingItem { slot: usize },

    #[error(transparent)]
    Roster(#[from] RosterError),
}

pub fn parse_roster(text: &str) -> Result<Roster, RosterParseError> {
    if text.trim().is_empty() {
        return Ok(Roster::default());
    }

    let slots = text
        .split(',')
        .enumerate()
        .map(|(slot, part)| parse_slot(slot, part.trim()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Roster::from_slots(slots)?)
}

fn parse_slot(slot: usize, part: &str) -> Result<(Option<ItemId>, u8), RosterParseError> {
    if part.is_empty() {
        return Ok((None, 0));
    }

    let Some((item, level)) = part.split_once(':') else {
        return Ok((Some(ItemId::from(part)), 0));
    };

    let item = item.trim();
    if item.is_empty() {
        return Err(RosterParseError::MissingItem { slot });
    }
    let level = level
        .trim()
        .parse::<u8>()
        .map_err(|_| RosterParseError::InvalidLevel {
            slot,
            level: level.trim().to_owned(),
        })?;

    Ok((Some(ItemId::from(item)), level))
}
