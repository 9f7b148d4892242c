//! Card system: definitions, field instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Static card data with typed ability entries
//! - `BoardCard`: A monster in a monster zone
//! - `SpellTrapCard`: A card in the spell/trap zone or field slot
//! - `CardCatalog`: Card definition lookup

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardKind, SpellType, TrapType};
pub use instance::{BoardCard, Position, SpellTrapCard};
pub use registry::CardCatalog;
