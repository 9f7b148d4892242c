//! Effect definitions.
//!
//! A card's ability is a list of `EffectDef` entries. Each entry names
//! when it fires (`trigger`), whether it persists (`continuous`), optional
//! targeting, condition and protection clauses, and the `action` it
//! performs when executed.
//!
//! ## JSON shape
//!
//! ```json
//! {
//!   "trigger": "on_summon",
//!   "once_per_turn": true,
//!   "target": {"kind": "monster", "side": "opponent", "count": 1},
//!   "action": {"type": "destroy"}
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::targeting::{TargetKind, TargetSide, TargetSpec};
use crate::cards::CardId;
use crate::core::ActionKind;
use crate::triggers::Condition;

/// When an ability entry fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTrigger {
    /// This card was normal or tribute summoned.
    OnSummon,
    /// This card was flip summoned.
    OnFlip,
    /// The opponent summoned a monster (face-up continuous traps only).
    OnOpponentSummon,
    /// The opponent declared an attack (face-up continuous traps only).
    OnOpponentAttack,
    /// The card itself is activated (spells and traps).
    OnActivate,
    /// Monster effect activated by its controller in a main phase.
    Ignition,
    /// Monster effect that may be activated in response.
    Quick,
    /// Controller's standby phase, while face-up.
    OnStandby,
    /// Controller's end phase, while face-up.
    OnEndPhase,
    /// Never fires; carries protection or other static clauses.
    Passive,
}

/// Priority tier of an activation. Higher speeds may respond to lower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SpellSpeed {
    One,
    Two,
    Three,
}

impl From<SpellSpeed> for u8 {
    fn from(speed: SpellSpeed) -> u8 {
        match speed {
            SpellSpeed::One => 1,
            SpellSpeed::Two => 2,
            SpellSpeed::Three => 3,
        }
    }
}

impl TryFrom<u8> for SpellSpeed {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SpellSpeed::One),
            2 => Ok(SpellSpeed::Two),
            3 => Ok(SpellSpeed::Three),
            other => Err(format!("spell speed must be 1-3, got {}", other)),
        }
    }
}

impl std::fmt::Display for SpellSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "speed {}", u8::from(*self))
    }
}

/// Protection flags a monster carries while on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Protection {
    pub cannot_be_destroyed_by_battle: bool,
    pub cannot_be_destroyed_by_effects: bool,
    pub cannot_be_targeted: bool,
}

impl Protection {
    /// True when no flag is set.
    #[must_use]
    pub fn is_none(&self) -> bool {
        *self == Self::default()
    }
}

/// Which player an effect applies to, relative to its controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Who {
    #[default]
    Controller,
    Opponent,
    Both,
}

/// How long a `restrict` effect lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictDuration {
    /// Until the current turn ends.
    #[default]
    EndOfTurn,
    /// For this many turn boundaries (1 = through the next turn).
    Turns(u32),
    /// While the source card stays face-up on the field.
    WhileFaceUp,
    /// Until another effect removes it.
    Permanent,
}

fn opponent() -> Who {
    Who::Opponent
}

/// What an ability entry does when executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectAction {
    /// Draw cards from the front of the deck.
    DrawCards {
        count: u32,
        #[serde(default)]
        who: Who,
    },

    /// Reduce life points (floored at 0).
    InflictDamage {
        amount: i64,
        #[serde(default = "opponent")]
        who: Who,
    },

    /// Increase life points.
    GainLifePoints {
        amount: i64,
        #[serde(default)]
        who: Who,
    },

    /// Adjust attack/defense of the targets, or of the source monster
    /// when the entry has no target clause.
    ModifyStats {
        #[serde(default)]
        attack: i64,
        #[serde(default)]
        defense: i64,
    },

    /// Destroy the targets.
    Destroy,

    /// Destroy every monster on the given side.
    DestroyAll {
        #[serde(default)]
        side: TargetSide,
    },

    /// Banish the targets.
    Banish,

    /// Return the targets to their owner's hand.
    ReturnToHand,

    /// Move the first matching deck card to the controller's hand.
    SearchDeck {
        #[serde(default)]
        archetype: Option<String>,
        #[serde(default)]
        card: Option<CardId>,
    },

    /// Discard cards at random from a hand.
    DiscardRandom {
        count: u32,
        #[serde(default = "opponent")]
        who: Who,
    },

    /// Create a lingering effect preventing an action kind.
    Restrict {
        restricted: ActionKind,
        #[serde(default = "opponent")]
        who: Who,
        #[serde(default)]
        duration: RestrictDuration,
    },

    /// Negate the chain link this one responded to.
    Negate,
}

impl EffectAction {
    /// Shorthand for a `DrawCards` action.
    #[must_use]
    pub fn draw(count: u32, who: Who) -> Self {
        Self::DrawCards { count, who }
    }

    /// Shorthand for an `InflictDamage` action.
    #[must_use]
    pub fn damage(amount: i64, who: Who) -> Self {
        Self::InflictDamage { amount, who }
    }

    /// Shorthand for a `Restrict` action.
    #[must_use]
    pub fn restrict(restricted: ActionKind, who: Who, duration: RestrictDuration) -> Self {
        Self::Restrict {
            restricted,
            who,
            duration,
        }
    }

    /// Snake-case name, matching the JSON tag.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DrawCards { .. } => "draw_cards",
            Self::InflictDamage { .. } => "inflict_damage",
            Self::GainLifePoints { .. } => "gain_life_points",
            Self::ModifyStats { .. } => "modify_stats",
            Self::Destroy => "destroy",
            Self::DestroyAll { .. } => "destroy_all",
            Self::Banish => "banish",
            Self::ReturnToHand => "return_to_hand",
            Self::SearchDeck { .. } => "search_deck",
            Self::DiscardRandom { .. } => "discard_random",
            Self::Restrict { .. } => "restrict",
            Self::Negate => "negate",
        }
    }
}

/// One ability entry on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDef {
    pub trigger: EffectTrigger,

    /// Persists on the field rather than resolving once.
    #[serde(default)]
    pub continuous: bool,

    #[serde(default)]
    pub once_per_turn: bool,

    /// Overrides the speed derived from the card kind.
    #[serde(default)]
    pub spell_speed: Option<SpellSpeed>,

    #[serde(default)]
    pub target: TargetSpec,

    #[serde(default)]
    pub condition: Option<Condition>,

    #[serde(default)]
    pub protection: Option<Protection>,

    /// `None` for entries that only carry static clauses.
    #[serde(default)]
    pub action: Option<EffectAction>,
}

impl EffectDef {
    /// An entry with a trigger and an action.
    #[must_use]
    pub fn new(trigger: EffectTrigger, action: EffectAction) -> Self {
        Self {
            trigger,
            continuous: false,
            once_per_turn: false,
            spell_speed: None,
            target: TargetSpec::none(),
            condition: None,
            protection: None,
            action: Some(action),
        }
    }

    /// An entry that never fires, used for static clauses.
    #[must_use]
    pub fn passive() -> Self {
        Self {
            trigger: EffectTrigger::Passive,
            continuous: true,
            once_per_turn: false,
            spell_speed: None,
            target: TargetSpec::none(),
            condition: None,
            protection: None,
            action: None,
        }
    }

    #[must_use]
    pub fn continuous(mut self) -> Self {
        self.continuous = true;
        self
    }

    #[must_use]
    pub fn once_per_turn(mut self) -> Self {
        self.once_per_turn = true;
        self
    }

    #[must_use]
    pub fn with_spell_speed(mut self, speed: SpellSpeed) -> Self {
        self.spell_speed = Some(speed);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetSpec) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = Some(protection);
        self
    }

    /// Check the entry is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        let Some(action) = &self.action else {
            if self.trigger != EffectTrigger::Passive {
                return Err("a triggered entry needs an action".to_string());
            }
            return Ok(());
        };

        match action {
            EffectAction::DrawCards { count, .. } | EffectAction::DiscardRandom { count, .. } if *count == 0 => {
                return Err(format!("{} needs a positive count", action.name()));
            }
            EffectAction::InflictDamage { amount, .. } | EffectAction::GainLifePoints { amount, .. }
                if *amount <= 0 =>
            {
                return Err(format!("{} needs a positive amount", action.name()));
            }
            EffectAction::SearchDeck {
                archetype: None,
                card: None,
            } => {
                return Err("search_deck needs an archetype or a card".to_string());
            }
            EffectAction::Restrict { restricted, .. } if !restricted.is_gateable() => {
                return Err(format!("{} cannot be restricted", restricted));
            }
            _ => {}
        }

        let needs_targets = matches!(
            action,
            EffectAction::Destroy | EffectAction::Banish | EffectAction::ReturnToHand
        );
        if needs_targets && self.target.kind == TargetKind::None {
            return Err(format!("{} needs a target clause", action.name()));
        }
        if self.target.kind != TargetKind::None && self.target.count == 0 {
            return Err("target count must be at least 1".to_string());
        }
        Ok(())
    }
}
