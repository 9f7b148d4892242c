//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition the engine knows about.
//! It is built once (usually from JSON) and only read afterwards.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId, CardKind};
use crate::error::{DuelError, LoadError};

/// Read-only catalog of card definitions.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardCatalog, CardId};
///
/// let catalog = CardCatalog::from_json(r#"[
///     {"id": 1, "name": "Celtic Guard",
///      "kind": {"type": "monster", "level": 4, "attack": 1400, "defense": 1200}}
/// ]"#).unwrap();
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Celtic Guard");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of card definitions.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let definitions: Vec<CardDefinition> = serde_json::from_str(json)?;
        Self::from_definitions(definitions)
    }

    /// Build a catalog from definitions, rejecting duplicates and
    /// malformed abilities.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = CardDefinition>,
    ) -> Result<Self, LoadError> {
        let mut catalog = Self::new();
        for card in definitions {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Register a card definition.
    pub fn register(&mut self, card: CardDefinition) -> Result<(), LoadError> {
        if self.cards.contains_key(&card.id) {
            return Err(LoadError::DuplicateCard(card.id));
        }
        validate_definition(&card)?;
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition, or `CardNotFound`.
    pub fn require(&self, id: CardId) -> Result<&CardDefinition, DuelError> {
        self.cards.get(&id).ok_or(DuelError::CardNotFound(id))
    }

    /// Display name of a card, falling back to its id.
    #[must_use]
    pub fn name_of(&self, id: CardId) -> String {
        self.get(id).map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find cards belonging to an archetype.
    pub fn find_by_archetype<'a>(&'a self, archetype: &'a str) -> impl Iterator<Item = &'a CardDefinition> {
        self.cards
            .values()
            .filter(move |c| c.archetype.as_deref() == Some(archetype))
    }
}

fn validate_definition(card: &CardDefinition) -> Result<(), LoadError> {
    let invalid = |reason: String| LoadError::InvalidCard { card: card.id, reason };

    if let CardKind::Monster { level, attack, defense, .. } = card.kind {
        if !(1..=12).contains(&level) {
            return Err(invalid(format!("level {} is outside 1-12", level)));
        }
        if attack < 0 || defense < 0 {
            return Err(invalid("attack and defense must be non-negative".to_string()));
        }
    }

    for (index, effect) in card.effects.iter().enumerate() {
        effect
            .validate()
            .map_err(|reason| invalid(format!("effect {}: {}", index, reason)))?;
    }
    Ok(())
}
