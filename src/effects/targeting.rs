//! Effect targeting.
//!
//! - `TargetSpec`: what an ability entry may target and how many
//! - `TargetSelector`: candidate enumeration, validation of player-chosen
//!   targets, and automatic selection for triggered effects

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::core::{GameState, Seat};
use crate::error::DuelError;
use crate::zones::Zone;

/// Chosen targets. Most effects take one or two.
pub type Targets = SmallVec<[CardId; 2]>;

/// Kind of card an entry targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Untargeted.
    #[default]
    None,
    /// A monster on the board.
    Monster,
    /// A card in the spell/trap zone or field slot.
    SpellTrap,
    /// Either of the above.
    Card,
}

/// Whose cards an entry targets, relative to its controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSide {
    Own,
    #[default]
    Opponent,
    Any,
}

impl TargetSide {
    /// Seats to search, in selection order. `Any` looks at the opponent
    /// first.
    #[must_use]
    pub fn seats(self, controller: Seat) -> SmallVec<[Seat; 2]> {
        match self {
            TargetSide::Own => SmallVec::from_slice(&[controller]),
            TargetSide::Opponent => SmallVec::from_slice(&[controller.other()]),
            TargetSide::Any => SmallVec::from_slice(&[controller.other(), controller]),
        }
    }
}

fn one() -> u8 {
    1
}

/// Specification for effect targeting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    #[serde(default)]
    pub kind: TargetKind,
    #[serde(default)]
    pub side: TargetSide,
    /// Maximum number of targets.
    #[serde(default = "one")]
    pub count: u8,
    /// Skip face-down cards.
    #[serde(default)]
    pub face_up_only: bool,
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::none()
    }
}

impl TargetSpec {
    /// No targets.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kind: TargetKind::None,
            side: TargetSide::Opponent,
            count: 1,
            face_up_only: false,
        }
    }

    /// Up to `count` monsters on `side`.
    #[must_use]
    pub const fn monster(side: TargetSide, count: u8) -> Self {
        Self {
            kind: TargetKind::Monster,
            side,
            count,
            face_up_only: false,
        }
    }

    /// Up to `count` spell/trap cards on `side`.
    #[must_use]
    pub const fn spell_trap(side: TargetSide, count: u8) -> Self {
        Self {
            kind: TargetKind::SpellTrap,
            side,
            count,
            face_up_only: false,
        }
    }

    /// Up to `count` field cards of any kind on `side`.
    #[must_use]
    pub const fn card(side: TargetSide, count: u8) -> Self {
        Self {
            kind: TargetKind::Card,
            side,
            count,
            face_up_only: false,
        }
    }

    #[must_use]
    pub fn face_up_only(mut self) -> Self {
        self.face_up_only = true;
        self
    }

    #[must_use]
    pub fn is_targeted(&self) -> bool {
        self.kind != TargetKind::None
    }
}

/// A card that may be targeted, with its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub seat: Seat,
    pub zone: Zone,
    pub card: CardId,
}

/// Target enumeration and validation.
pub struct TargetSelector;

impl TargetSelector {
    /// Every legal target in zone order: monsters before spell/traps,
    /// board order within a zone, field slot last.
    #[must_use]
    pub fn candidates(state: &GameState, spec: &TargetSpec, controller: Seat) -> Vec<Candidate> {
        let mut out = Vec::new();
        if !spec.is_targeted() {
            return out;
        }

        for seat in spec.side.seats(controller) {
            let zones = &state.seats[seat];

            if matches!(spec.kind, TargetKind::Monster | TargetKind::Card) {
                for monster in zones.board.iter() {
                    if monster.protection.cannot_be_targeted {
                        continue;
                    }
                    if spec.face_up_only && monster.is_face_down {
                        continue;
                    }
                    out.push(Candidate {
                        seat,
                        zone: Zone::Board,
                        card: monster.card_id,
                    });
                }
            }

            if matches!(spec.kind, TargetKind::SpellTrap | TargetKind::Card) {
                let field = zones.field_spell.iter().map(|c| (Zone::FieldSpell, c));
                let row = zones.spell_trap_zone.iter().map(|c| (Zone::SpellTrap, c));
                for (zone, card) in row.chain(field) {
                    if spec.face_up_only && card.is_face_down {
                        continue;
                    }
                    out.push(Candidate {
                        seat,
                        zone,
                        card: card.card_id,
                    });
                }
            }
        }
        out
    }

    /// First `count` candidates, as chosen for triggered effects.
    #[must_use]
    pub fn auto_select(state: &GameState, spec: &TargetSpec, controller: Seat) -> Targets {
        Self::candidates(state, spec, controller)
            .into_iter()
            .take(usize::from(spec.count))
            .map(|c| c.card)
            .collect()
    }

    /// Check player-chosen targets.
    ///
    /// Untargeted entries accept only an empty list. Targeted entries need
    /// between one and `count` targets, each a distinct legal candidate
    /// (copies of the same card id count separately).
    pub fn validate(
        state: &GameState,
        spec: &TargetSpec,
        controller: Seat,
        targets: &[CardId],
    ) -> Result<(), DuelError> {
        if !spec.is_targeted() {
            if targets.is_empty() {
                return Ok(());
            }
            return Err(DuelError::invalid("this effect does not take targets"));
        }

        let mut pool: Vec<CardId> = Self::candidates(state, spec, controller)
            .into_iter()
            .map(|c| c.card)
            .collect();

        if pool.is_empty() {
            return Err(DuelError::invalid("no valid targets"));
        }
        if targets.is_empty() {
            return Err(DuelError::invalid("a target must be chosen"));
        }
        if targets.len() > usize::from(spec.count) {
            return Err(DuelError::invalid(format!(
                "at most {} target(s) allowed, {} chosen",
                spec.count,
                targets.len()
            )));
        }

        for target in targets {
            match pool.iter().position(|c| c == target) {
                Some(idx) => {
                    pool.swap_remove(idx);
                }
                None => {
                    return Err(DuelError::invalid(format!("{} is not a valid target", target)));
                }
            }
        }
        Ok(())
    }

    /// Whether an entry has at least one legal target (or needs none).
    #[must_use]
    pub fn has_targets(state: &GameState, spec: &TargetSpec, controller: Seat) -> bool {
        !spec.is_targeted() || !Self::candidates(state, spec, controller).is_empty()
    }
}
