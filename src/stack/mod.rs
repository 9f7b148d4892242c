//! Chain and resolution.
//!
//! Activations of spells, traps and monster effects go on the [`Chain`]
//! and resolve last-in-first-out once both seats pass priority in a row.
//! Triggered effects never use the chain; they execute immediately when
//! their event happens.
//!
//! ## Timing
//!
//! | Chain    | Speed 1                           | Speed 2 / 3             |
//! |----------|-----------------------------------|-------------------------|
//! | empty    | turn player, main phase           | either seat, any phase  |
//! | open     | never                             | priority holder, ≥ top  |

mod chain;
mod resolve;

pub use chain::{Chain, ChainLink, LinkState};
pub use resolve::{ChainResolver, ResolvedLink};

use crate::core::{GameState, Seat};
use crate::effects::SpellSpeed;
use crate::error::DuelError;

/// Whether `seat` may activate something of `speed` right now.
///
/// Speed against the top link is checked by [`Chain::check_speed`];
/// capacity and duplicate cards by [`Chain::check_can_add`].
pub fn check_activation_timing(state: &GameState, seat: Seat, speed: SpellSpeed) -> Result<(), DuelError> {
    if state.chain.is_empty() {
        if speed == SpellSpeed::One {
            if !state.is_turn_of(seat) {
                return Err(DuelError::NotYourTurn);
            }
            if !state.phase.is_main() {
                return Err(DuelError::invalid("speed 1 activations need a main phase"));
            }
        }
        return Ok(());
    }

    if state.chain.priority() != Some(seat) {
        return Err(DuelError::chain("you do not hold priority"));
    }
    state.chain.check_speed(speed)
}
