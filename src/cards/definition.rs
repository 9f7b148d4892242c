//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its name,
//! kind (monster, spell or trap with their stats) and ability entries.
//! Definitions are parsed once from catalog JSON; the engine never
//! re-interprets loosely typed ability data at play time.
//!
//! Per-duel state (current attack, face-down, turn summoned) lives in
//! `BoardCard` / `SpellTrapCard` instead.

use serde::{Deserialize, Serialize};

use crate::core::DuelConfig;
use crate::effects::{EffectDef, EffectTrigger, Protection, SpellSpeed};

/// Unique identifier for a card definition.
///
/// A deck may hold several copies of the same id. Zone operations act on
/// the first matching copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Spell sub-types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellType {
    Normal,
    Continuous,
    Field,
    QuickPlay,
    Equip,
    Ritual,
}

/// Trap sub-types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrapType {
    Normal,
    Continuous,
    Counter,
}

/// What a card is, with the data specific to that kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CardKind {
    Monster {
        level: u8,
        attack: i64,
        defense: i64,
        /// Tributes this card states it needs. Only consulted at or above
        /// the tribute level threshold.
        #[serde(default)]
        tributes_required: Option<u8>,
    },
    Spell {
        spell_type: SpellType,
    },
    Trap {
        trap_type: TrapType,
    },
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardDefinition, CardId};
/// use duel_engine::core::DuelConfig;
///
/// let dragon = CardDefinition::monster(CardId::new(1), "Azure Dragon", 8, 3000, 2500);
///
/// assert!(dragon.is_monster());
/// assert_eq!(dragon.tributes_required(&DuelConfig::default()), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display and action payloads).
    pub name: String,

    /// Archetype used by search effects.
    #[serde(default)]
    pub archetype: Option<String>,

    /// Ability text shown to players.
    #[serde(default)]
    pub text: String,

    /// Kind and kind-specific stats.
    pub kind: CardKind,

    /// Ability entries, scanned in this order.
    #[serde(default)]
    pub effects: Vec<EffectDef>,
}

impl CardDefinition {
    fn with_kind(id: CardId, name: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id,
            name: name.into(),
            archetype: None,
            text: String::new(),
            kind,
            effects: Vec::new(),
        }
    }

    /// Create a monster definition.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, level: u8, attack: i64, defense: i64) -> Self {
        Self::with_kind(
            id,
            name,
            CardKind::Monster {
                level,
                attack,
                defense,
                tributes_required: None,
            },
        )
    }

    /// Create a spell definition.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>, spell_type: SpellType) -> Self {
        Self::with_kind(id, name, CardKind::Spell { spell_type })
    }

    /// Create a trap definition.
    #[must_use]
    pub fn trap(id: CardId, name: impl Into<String>, trap_type: TrapType) -> Self {
        Self::with_kind(id, name, CardKind::Trap { trap_type })
    }

    /// Add an ability entry (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectDef) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the archetype (builder pattern).
    #[must_use]
    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    /// Set a stated tribute requirement on a monster (builder pattern).
    #[must_use]
    pub fn with_tributes(mut self, count: u8) -> Self {
        if let CardKind::Monster { tributes_required, .. } = &mut self.kind {
            *tributes_required = Some(count);
        }
        self
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, CardKind::Monster { .. })
    }

    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell { .. })
    }

    #[must_use]
    pub fn is_trap(&self) -> bool {
        matches!(self.kind, CardKind::Trap { .. })
    }

    /// Monster level, if this is a monster.
    #[must_use]
    pub fn level(&self) -> Option<u8> {
        match self.kind {
            CardKind::Monster { level, .. } => Some(level),
            _ => None,
        }
    }

    /// Base attack and defense, if this is a monster.
    #[must_use]
    pub fn base_stats(&self) -> Option<(i64, i64)> {
        match self.kind {
            CardKind::Monster { attack, defense, .. } => Some((attack, defense)),
            _ => None,
        }
    }

    #[must_use]
    pub fn spell_type(&self) -> Option<SpellType> {
        match self.kind {
            CardKind::Spell { spell_type } => Some(spell_type),
            _ => None,
        }
    }

    #[must_use]
    pub fn trap_type(&self) -> Option<TrapType> {
        match self.kind {
            CardKind::Trap { trap_type } => Some(trap_type),
            _ => None,
        }
    }

    /// Tributes needed to normal summon or set this monster.
    ///
    /// Below the threshold level nothing is needed; at or above it the
    /// card's stated requirement applies, falling back to the configured
    /// default. Non-monsters need none.
    #[must_use]
    pub fn tributes_required(&self, config: &DuelConfig) -> u8 {
        match self.kind {
            CardKind::Monster {
                level,
                tributes_required,
                ..
            } if level >= config.tribute_level_threshold => {
                tributes_required.unwrap_or(config.default_tributes_required)
            }
            _ => 0,
        }
    }

    /// Protection granted by the first ability entry carrying a
    /// `protection` clause.
    #[must_use]
    pub fn protection(&self) -> Protection {
        self.effects
            .iter()
            .find_map(|e| e.protection)
            .unwrap_or_default()
    }

    /// Indices of ability entries with the given trigger, in definition order.
    pub fn effects_with_trigger(&self, trigger: EffectTrigger) -> impl Iterator<Item = usize> + '_ {
        self.effects
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.trigger == trigger)
            .map(|(i, _)| i)
    }

    /// Ability entry at `index`.
    #[must_use]
    pub fn effect(&self, index: usize) -> Option<&EffectDef> {
        self.effects.get(index)
    }

    /// Spell speed of the ability entry at `index`.
    ///
    /// An explicit `spell_speed` wins. Otherwise quick-play spells, traps
    /// and monster quick effects are speed 2, counter traps speed 3, and
    /// everything else speed 1.
    #[must_use]
    pub fn spell_speed(&self, index: usize) -> SpellSpeed {
        if let Some(speed) = self.effects.get(index).and_then(|e| e.spell_speed) {
            return speed;
        }
        match self.kind {
            CardKind::Spell {
                spell_type: SpellType::QuickPlay,
            } => SpellSpeed::Two,
            CardKind::Spell { .. } => SpellSpeed::One,
            CardKind::Trap {
                trap_type: TrapType::Counter,
            } => SpellSpeed::Three,
            CardKind::Trap { .. } => SpellSpeed::Two,
            CardKind::Monster { .. } => match self.effects.get(index).map(|e| e.trigger) {
                Some(EffectTrigger::Quick) => SpellSpeed::Two,
                _ => SpellSpeed::One,
            },
        }
    }

    /// Whether the card stays on the field after its activation resolves.
    #[must_use]
    pub fn stays_on_field(&self) -> bool {
        matches!(
            self.kind,
            CardKind::Spell {
                spell_type: SpellType::Continuous | SpellType::Field | SpellType::Equip
            } | CardKind::Trap {
                trap_type: TrapType::Continuous
            }
        )
    }
}
