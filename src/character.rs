//! Character data model: attributes, proficiency ranks, resource pools,
//! and the character aggregate the state transitions operate on.
//!
//! Callers follow a snapshot discipline: read the character, apply one
//! transition ([`Character::confirm_health`], [`Character::rest`], ...),
//! and persist the whole result. Nothing here is mutated field-by-field
//! from multiple call sites.

use crate::armor::ArmorProficiencies;
use crate::conditions::{ActiveCondition, ConditionKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// The six attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Dexterity => "DEX",
            Attribute::Constitution => "CON",
            Attribute::Intelligence => "INT",
            Attribute::Wisdom => "WIS",
            Attribute::Charisma => "CHA",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Dexterity => "Dexterity",
            Attribute::Constitution => "Constitution",
            Attribute::Intelligence => "Intelligence",
            Attribute::Wisdom => "Wisdom",
            Attribute::Charisma => "Charisma",
        }
    }

    pub fn all() -> [Attribute; 6] {
        [
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Constitution,
            Attribute::Intelligence,
            Attribute::Wisdom,
            Attribute::Charisma,
        ]
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

/// Attribute scores container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attributes {
    pub strength: u8,
    pub dexterity: u8,
    pub constitution: u8,
    pub intelligence: u8,
    pub wisdom: u8,
    pub charisma: u8,
}

impl Attributes {
    pub fn new(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: str,
            dexterity: dex,
            constitution: con,
            intelligence: int,
            wisdom: wis,
            charisma: cha,
        }
    }

    pub fn get(&self, attribute: Attribute) -> u8 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: u8) {
        match attribute {
            Attribute::Strength => self.strength = value,
            Attribute::Dexterity => self.dexterity = value,
            Attribute::Constitution => self.constitution = value,
            Attribute::Intelligence => self.intelligence = value,
            Attribute::Wisdom => self.wisdom = value,
            Attribute::Charisma => self.charisma = value,
        }
    }

    pub fn modifier(&self, attribute: Attribute) -> i8 {
        let score = self.get(attribute) as i8;
        // Floor division so scores below 10 give the right negative modifier
        (score - 10).div_euclid(2)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

// ============================================================================
// Proficiency
// ============================================================================

/// Proficiency rank for checks and DCs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Proficiency {
    #[default]
    Untrained,
    Trained,
    Expert,
    Master,
    Legendary,
}

impl Proficiency {
    pub fn rank(&self) -> u8 {
        match self {
            Proficiency::Untrained => 0,
            Proficiency::Trained => 1,
            Proficiency::Expert => 2,
            Proficiency::Master => 3,
            Proficiency::Legendary => 4,
        }
    }

    /// Proficiency bonus at the given level. Untrained is always 0;
    /// trained ranks add their level.
    pub fn bonus(&self, level: u8) -> i32 {
        match self {
            Proficiency::Untrained => 0,
            _ => self.rank() as i32 * 2 + level as i32,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Proficiency::Untrained => "Untrained",
            Proficiency::Trained => "Trained",
            Proficiency::Expert => "Expert",
            Proficiency::Master => "Master",
            Proficiency::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Spellcasting resources
// ============================================================================

/// A single spell slot from one spellcasting source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlot {
    pub rank: u8,
    pub source: String,
    pub exhausted: bool,
}

impl SpellSlot {
    pub fn new(rank: u8, source: impl Into<String>) -> Self {
        Self {
            rank,
            source: source.into(),
            exhausted: false,
        }
    }
}

/// An innate spell with a daily cast allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnateSpell {
    pub name: String,
    pub rank: u8,
    pub casts_current: u32,
    pub casts_max: u32,
}

impl InnateSpell {
    pub fn new(name: impl Into<String>, rank: u8, casts_max: u32) -> Self {
        Self {
            name: name.into(),
            rank,
            casts_current: 0,
            casts_max,
        }
    }
}

/// Focus point pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusPool {
    pub current: u32,
    pub maximum: u32,
}

/// All expendable spellcasting state for a character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spellcasting {
    pub slots: Vec<SpellSlot>,
    pub innate: Vec<InnateSpell>,
    pub focus: FocusPool,
}

impl Spellcasting {
    /// Exhaust one available slot of the given rank. Returns false when
    /// every slot of that rank is already spent.
    pub fn use_slot(&mut self, rank: u8) -> bool {
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.rank == rank && !slot.exhausted)
        {
            slot.exhausted = true;
            return true;
        }
        false
    }

    /// Record one cast of an innate spell, up to its daily allowance.
    pub fn cast_innate(&mut self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        if let Some(spell) = self
            .innate
            .iter_mut()
            .find(|spell| spell.name.to_lowercase() == name_lower)
        {
            if spell.casts_current < spell.casts_max {
                spell.casts_current += 1;
                return true;
            }
        }
        false
    }

    /// Spend one focus point.
    pub fn spend_focus(&mut self) -> bool {
        if self.focus.current > 0 {
            self.focus.current -= 1;
            return true;
        }
        false
    }
}

/// Stamina and resolve pool for the stamina variant rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StaminaPool {
    pub stamina: i32,
    pub resolve: i32,
}

// ============================================================================
// Character
// ============================================================================

/// A character sheet's rules-relevant state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub level: u8,
    pub attributes: Attributes,
    /// Hit points gained per class level.
    pub class_hp: i32,
    /// Key attribute behind the class DC, if the class has one.
    pub key_attribute: Option<Attribute>,
    pub hp_current: i32,
    pub hp_temp: i32,
    pub experience: i32,
    pub conditions: Vec<ActiveCondition>,
    pub spellcasting: Spellcasting,
    /// Present only when the stamina variant rule is in play.
    pub stamina: Option<StaminaPool>,
    pub armor_proficiencies: ArmorProficiencies,
    /// Pending full-heal flag, consumed by the next HP confirmation.
    pub reset_hp: bool,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            level: 1,
            attributes: Attributes::default(),
            class_hp: 0,
            key_attribute: None,
            hp_current: 0,
            hp_temp: 0,
            experience: 0,
            conditions: Vec::new(),
            spellcasting: Spellcasting::default(),
            stamina: None,
            armor_proficiencies: ArmorProficiencies::default(),
            reset_hp: false,
        }
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_class_hp(mut self, class_hp: i32) -> Self {
        self.class_hp = class_hp;
        self
    }

    pub fn with_key_attribute(mut self, attribute: Attribute) -> Self {
        self.key_attribute = Some(attribute);
        self
    }

    // ------------------------------------------------------------------
    // Condition list helpers
    // ------------------------------------------------------------------

    pub fn condition(&self, kind: ConditionKind) -> Option<&ActiveCondition> {
        self.conditions.iter().find(|c| c.kind == kind)
    }

    pub(crate) fn condition_mut(&mut self, kind: ConditionKind) -> Option<&mut ActiveCondition> {
        self.conditions.iter_mut().find(|c| c.kind == kind)
    }

    pub fn condition_value(&self, kind: ConditionKind) -> Option<u32> {
        self.condition(kind).and_then(|c| c.value)
    }

    pub fn has_condition(&self, kind: ConditionKind) -> bool {
        self.condition(kind).is_some()
    }

    /// Add a condition, replacing any existing entry of the same kind.
    pub fn add_condition(&mut self, kind: ConditionKind, value: Option<u32>) {
        match self.condition_mut(kind) {
            Some(existing) => existing.value = value,
            None => self.conditions.push(ActiveCondition { kind, value }),
        }
    }

    pub fn remove_condition(&mut self, kind: ConditionKind) -> bool {
        let before = self.conditions.len();
        self.conditions.retain(|c| c.kind != kind);
        self.conditions.len() != before
    }
}
