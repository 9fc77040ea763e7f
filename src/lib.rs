//! Pathfinder 2e character rules core.
//!
//! This crate provides:
//! - Coin purse math with affordability checks and change-making
//! - Health, experience, and rest state transitions (the Dying/Wounded
//!   death spiral, nightly recovery)
//! - Itemized Armor Class and spell attack/DC breakdowns with the
//!   multiple-attack-penalty sequence
//! - A typed per-character variable store and an explicit-lifecycle
//!   content cache
//!
//! It is the rules-evaluation half of a character builder: no UI, no
//! network, no persistence. Consumers read a character snapshot, apply
//! one transition, and store the whole result.
//!
//! # Quick Start
//!
//! ```
//! use wayfarer_core::{Character, Coins};
//!
//! let mut hero = Character::new("Seelah").with_level(3);
//! hero.hp_current = 30;
//! hero.confirm_health("30-22", 38);
//! assert_eq!(hero.hp_current, 8);
//!
//! let purse = Coins::new(5, 3, 12, 0);
//! let price = Coins { gp: 2, ..Default::default() };
//! let change = purse.purchase(&price).expect("can afford it");
//! assert_eq!(change.total_cp(), purse.total_cp() - 200);
//! ```

pub mod armor;
pub mod character;
pub mod coins;
pub mod conditions;
pub mod content;
pub mod expr;
pub mod spells;
pub mod variables;
pub mod vitals;

// Primary public API
pub use armor::{ac_parts, AcParts, ArmorCategory, ArmorGroup, ArmorItem, ArmorProficiencies};
pub use character::{
    Attribute, Attributes, Character, CharacterId, FocusPool, InnateSpell, Proficiency, SpellSlot,
    Spellcasting, StaminaPool,
};
pub use coins::{price_string, Coins};
pub use conditions::{find_condition, ActiveCondition, ConditionKind};
pub use content::ContentCache;
pub use expr::{evaluate, evaluate_lenient, ExprError};
pub use spells::{
    classify_range, spell_attack, spell_dc, CastingSource, Part, SpellAttack, SpellDc, SpellRange,
};
pub use variables::{Bonus, Variable, VariableStore};
