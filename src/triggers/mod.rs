//! Trigger system for event-driven abilities.
//!
//! ## Key Components
//!
//! - [`DuelEvent`]: Something that happened, for the event recorder
//! - [`Condition`]: Extra requirement an ability entry may carry
//! - [`TriggerScan`]: Finds ability entries matching a game event
//! - [`TriggeredEffect`]: One entry selected to fire
//!
//! ## Firing order
//!
//! Every matching entry fires, in the order the cards are scanned and then
//! in the order the entries appear in each card's ability list. Each fire
//! is reported and logged on its own; one failing never stops the rest.

mod condition;
mod event;
mod scan;

pub use condition::{Condition, ConditionContext};
pub use event::{DuelEvent, EventKind};
pub use scan::{TriggerScan, TriggeredEffect};
