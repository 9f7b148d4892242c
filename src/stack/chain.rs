//! The chain: a LIFO stack of activations with spell-speed priority.
//!
//! Activations are pushed as links. After each push the other seat gets
//! priority; a response resets the pass count. When both seats pass in a
//! row the whole chain resolves, last link first.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{LinkId, Seat};
use crate::effects::{SpellSpeed, Targets};
use crate::error::DuelError;

/// Resolution state of a link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkState {
    Pending,
    Resolving,
    Resolved,
    Negated,
}

/// One activation on the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub id: LinkId,
    /// Seat that activated the link.
    pub seat: Seat,
    pub card_id: CardId,
    /// Index of the activated entry in the card's ability list.
    pub effect_index: usize,
    pub spell_speed: SpellSpeed,
    pub targets: Targets,
    pub state: LinkState,
}

/// The current chain of a duel.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::CardId;
/// use duel_engine::core::Seat;
/// use duel_engine::effects::{SpellSpeed, Targets};
/// use duel_engine::stack::Chain;
///
/// let mut chain = Chain::new();
/// chain.push(Seat::Host, CardId::new(1), 0, SpellSpeed::One, Targets::new(), 12).unwrap();
/// assert_eq!(chain.priority(), Some(Seat::Opponent));
///
/// // Speed 1 cannot respond to anything
/// assert!(chain.push(Seat::Opponent, CardId::new(2), 0, SpellSpeed::One, Targets::new(), 12).is_err());
///
/// // Both seats pass: ready to resolve
/// assert!(!chain.pass(Seat::Opponent).unwrap());
/// assert!(chain.pass(Seat::Host).unwrap());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chain {
    /// Index 0 = first link, last = top.
    links: Vec<ChainLink>,

    /// Seat allowed to respond or pass. `None` while the chain is empty.
    priority: Option<Seat>,

    /// Passes since the last link was added.
    consecutive_passes: u8,

    next_link_id: u32,
}

impl Chain {
    /// Seats that must pass in a row before the chain resolves.
    pub const PASSES_TO_RESOLVE: u8 = 2;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Links from first to top.
    #[must_use]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    #[must_use]
    pub fn top(&self) -> Option<&ChainLink> {
        self.links.last()
    }

    #[must_use]
    pub fn get(&self, id: LinkId) -> Option<&ChainLink> {
        self.links.iter().find(|l| l.id == id)
    }

    #[must_use]
    pub fn priority(&self) -> Option<Seat> {
        self.priority
    }

    #[must_use]
    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Whether `card` already occupies an unresolved link.
    #[must_use]
    pub fn contains_card(&self, card: CardId) -> bool {
        self.links
            .iter()
            .any(|l| l.card_id == card && l.state != LinkState::Resolved)
    }

    /// Check a new link could be added, without adding it.
    pub fn check_can_add(&self, card: CardId, speed: SpellSpeed, max_links: usize) -> Result<(), DuelError> {
        if self.links.len() >= max_links {
            return Err(DuelError::ChainLimitExceeded { max: max_links });
        }
        if self.contains_card(card) {
            return Err(DuelError::chain(format!("{} is already in the chain", card)));
        }
        self.check_speed(speed)
    }

    /// Check an activation of `speed` may go on top of the chain.
    ///
    /// Speed 1 only ever starts a chain. Responses must match or beat the
    /// speed of the top link.
    pub fn check_speed(&self, speed: SpellSpeed) -> Result<(), DuelError> {
        let Some(top) = self.top() else {
            return Ok(());
        };
        if speed == SpellSpeed::One {
            return Err(DuelError::chain(format!("{} cannot be chained", speed)));
        }
        if speed < top.spell_speed {
            return Err(DuelError::chain(format!("{} cannot respond to {}", speed, top.spell_speed)));
        }
        Ok(())
    }

    /// Add a link on top and hand priority to the other seat.
    pub fn push(
        &mut self,
        seat: Seat,
        card_id: CardId,
        effect_index: usize,
        spell_speed: SpellSpeed,
        targets: Targets,
        max_links: usize,
    ) -> Result<LinkId, DuelError> {
        self.check_can_add(card_id, spell_speed, max_links)?;

        let id = LinkId(self.next_link_id);
        self.next_link_id += 1;
        self.links.push(ChainLink {
            id,
            seat,
            card_id,
            effect_index,
            spell_speed,
            targets,
            state: LinkState::Pending,
        });

        self.priority = Some(seat.other());
        self.consecutive_passes = 0;
        Ok(id)
    }

    /// The priority holder declines to respond.
    ///
    /// Returns `true` once both seats have passed in a row and the chain
    /// should resolve.
    pub fn pass(&mut self, seat: Seat) -> Result<bool, DuelError> {
        if self.links.is_empty() {
            return Err(DuelError::chain("there is no chain to pass on"));
        }
        if self.priority != Some(seat) {
            return Err(DuelError::chain("you do not hold priority"));
        }

        self.consecutive_passes += 1;
        if self.consecutive_passes >= Self::PASSES_TO_RESOLVE {
            return Ok(true);
        }
        self.priority = Some(seat.other());
        Ok(false)
    }

    pub fn set_state(&mut self, id: LinkId, state: LinkState) {
        if let Some(link) = self.links.iter_mut().find(|l| l.id == id) {
            link.state = state;
        }
    }

    /// The link directly beneath `id`.
    #[must_use]
    pub fn link_below(&self, id: LinkId) -> Option<&ChainLink> {
        let idx = self.links.iter().position(|l| l.id == id)?;
        idx.checked_sub(1).and_then(|below| self.links.get(below))
    }

    /// Negate a pending link. Returns whether it was pending.
    pub fn negate(&mut self, id: LinkId) -> bool {
        match self.links.iter_mut().find(|l| l.id == id) {
            Some(link) if link.state == LinkState::Pending => {
                link.state = LinkState::Negated;
                true
            }
            _ => false,
        }
    }

    /// Remove a link once it has resolved.
    pub fn remove(&mut self, id: LinkId) -> Option<ChainLink> {
        let idx = self.links.iter().position(|l| l.id == id)?;
        Some(self.links.remove(idx))
    }

    /// Drop every link and reset priority.
    pub fn clear(&mut self) {
        self.links.clear();
        self.priority = None;
        self.consecutive_passes = 0;
    }
}
