//! Turn structure: phases and the transitions between them.
//!
//! draw → standby → main1 → battle_start → battle → battle_end → main2 →
//! end → (next player's draw). Draw and standby run automatically when a
//! turn begins; every other transition is requested by the turn player.

mod machine;
mod phase;

pub use machine::{TurnMachine, TurnStart};
pub use phase::Phase;
