//! Effect system for card abilities.
//!
//! Abilities are data, not code:
//! - [`EffectDef`]: One ability entry (trigger, clauses, action)
//! - [`EffectAction`]: The tagged union of things an entry can do
//! - [`TargetSpec`]: How an entry selects targets
//! - [`EffectResolver`]: Executes an entry on game state
//!
//! ## Execution
//!
//! Execution never fails with an error. Whatever the entry managed to do
//! is reported as an [`EffectOutcome`]; a condition that does not hold or a
//! target that is gone is a failed outcome, not a `DuelError`.

mod effect;
mod resolver;
mod targeting;

pub use effect::{EffectAction, EffectDef, EffectTrigger, Protection, RestrictDuration, SpellSpeed, Who};
pub use resolver::{EffectContext, EffectOutcome, EffectResolver};
pub use targeting::{Candidate, TargetKind, TargetSelector, TargetSide, TargetSpec, Targets};
