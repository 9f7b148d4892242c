//! Player-facing actions.
//!
//! [`DuelEngine`] ties the pieces together. Each action:
//!
//! 1. loads the lobby's document and resolves the caller's seat
//! 2. runs the same validator [`available_actions`](DuelEngine::available_actions) uses
//! 3. mutates the board and commits
//! 4. records events
//! 5. fires triggered effects, each one against freshly loaded state
//!
//! ## Example
//!
//! ```
//! use duel_engine::actions::DuelEngine;
//! use duel_engine::cards::{CardCatalog, CardDefinition, CardId, Position};
//! use duel_engine::core::{DuelConfig, DuelSetup, LobbyId, PlayerId};
//! use duel_engine::store::{MemoryEventLog, MemoryStore};
//!
//! let scout = CardId::new(1);
//! let catalog = CardCatalog::from_definitions([
//!     CardDefinition::monster(scout, "Field Scout", 4, 1400, 1200),
//! ]).unwrap();
//!
//! let state = DuelSetup::new("lobby-1", "alice", "bob")
//!     .with_decks(vec![scout; 10], vec![scout; 10])
//!     .build();
//! let store = MemoryStore::new().with_duel(&state).unwrap();
//! let mut engine = DuelEngine::new(store, MemoryEventLog::new(), catalog, DuelConfig::default());
//!
//! let outcome = engine
//!     .normal_summon(&PlayerId::new("alice"), &LobbyId::new("lobby-1"), scout, Position::Attack, &[])
//!     .unwrap();
//! assert_eq!(outcome.card_name, "Field Scout");
//! ```

mod battle;
mod chain;
mod phase;
mod spells;
mod summon;

pub use battle::AttackOutcome;
pub use chain::PassOutcome;
pub use phase::{EndTurnOutcome, PhaseOutcome};
pub use spells::{ActivationOutcome, SetSpellTrapOutcome};
pub use summon::{PositionOutcome, SummonOutcome};

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{CardCatalog, CardId};
use crate::core::{DuelConfig, GameState, LobbyId, PlayerId, Seat};
use crate::effects::{EffectContext, EffectResolver, TargetSelector};
use crate::error::DuelError;
use crate::store::{DuelStore, EventRecorder};
use crate::triggers::{DuelEvent, EventKind, TriggerScan, TriggeredEffect};

/// Milliseconds since the Unix epoch.
type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// Report of one triggered effect that fired.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerReport {
    pub card: CardId,
    pub card_name: String,
    /// Seat the effect was attributed to.
    pub controller: Seat,
    pub effect_index: usize,
    pub success: bool,
    pub message: String,
}

/// The duel engine, generic over its store and event sink.
pub struct DuelEngine<S, R> {
    store: S,
    recorder: R,
    catalog: CardCatalog,
    config: DuelConfig,
    clock: Clock,
}

impl<S: DuelStore, R: EventRecorder> DuelEngine<S, R> {
    /// Create an engine using the system clock.
    #[must_use]
    pub fn new(store: S, recorder: R, catalog: CardCatalog, config: DuelConfig) -> Self {
        Self {
            store,
            recorder,
            catalog,
            config,
            clock: Box::new(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            }),
        }
    }

    /// Replace the clock (builder pattern).
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // === Accessors ===

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Load a fresh copy of a lobby's document.
    pub fn state(&self, lobby: &LobbyId) -> Result<GameState, DuelError> {
        self.store.load(lobby)
    }

    // === Shared steps ===

    /// Load the document and find the caller's seat.
    fn load_for(&self, caller: &PlayerId, lobby: &LobbyId) -> Result<(GameState, Seat), DuelError> {
        let state = self.store.load(lobby)?;
        let seat = state.seat_of(caller).ok_or(DuelError::NotAParticipant)?;
        Ok((state, seat))
    }

    /// Stamp and commit.
    fn commit(&mut self, state: &mut GameState) -> Result<(), DuelError> {
        state.touch((self.clock)());
        self.store.commit(state)
    }

    fn record(&mut self, event: DuelEvent) -> Result<(), DuelError> {
        self.recorder.record(event)
    }

    /// Fire triggered effects in order.
    ///
    /// Each fire loads the document again, so a later trigger sees what the
    /// earlier ones did. Entries that can no longer fire (once-per-turn
    /// already used, card gone from the field) are skipped. A failed effect
    /// is reported and recorded; it never stops the rest.
    fn fire_triggers(
        &mut self,
        lobby: &LobbyId,
        triggered: Vec<TriggeredEffect>,
    ) -> Result<Vec<TriggerReport>, DuelError> {
        let mut reports = Vec::with_capacity(triggered.len());

        for trigger in triggered {
            let mut state = self.store.load(lobby)?;
            if let Some(reason) = TriggerScan::blocked_reason(&state, &trigger) {
                debug!(card = %trigger.card, index = trigger.effect_index, reason, "trigger skipped");
                continue;
            }

            let Some(def) = self.catalog.get(trigger.card) else {
                continue;
            };
            let Some(effect) = def.effect(trigger.effect_index) else {
                continue;
            };
            let card_name = def.name.clone();

            let targets = TargetSelector::auto_select(&state, &effect.target, trigger.controller);
            let ctx = EffectContext::new(trigger.controller, trigger.card, trigger.effect_index);
            let outcome = EffectResolver::execute(&mut state, &self.catalog, &ctx, effect, &targets);
            if trigger.once_per_turn {
                state.mark_opt(trigger.opt_key());
            }
            self.commit(&mut state)?;

            let kind = if outcome.success {
                debug!(card = %card_name, message = %outcome.message, "trigger fired");
                EventKind::EffectActivated
            } else {
                warn!(card = %card_name, message = %outcome.message, "triggered effect failed");
                EventKind::EffectFailed
            };
            let description = format!("{}: {}", card_name, outcome.message);
            self.record(DuelEvent::new(&state, kind, trigger.controller, description).with_card(trigger.card))?;

            reports.push(TriggerReport {
                card: trigger.card,
                card_name,
                controller: trigger.controller,
                effect_index: trigger.effect_index,
                success: outcome.success,
                message: outcome.message,
            });
        }
        Ok(reports)
    }
}
