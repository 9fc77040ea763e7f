//! Spell attack and spell DC resolution.
//!
//! Both computations return their itemized parts alongside the total:
//! every contributing term carries a human-readable label, since sheet
//! consumers must be able to show the full justification for a number.

use crate::character::{Attribute, Character, Proficiency};
use crate::variables::VariableStore;
use serde::{Deserialize, Serialize};

/// Bonus-variable names consumed by the spell handlers.
pub const ATTACK_ROLLS_BONUS: &str = "ATTACK_ROLLS_BONUS";
pub const MELEE_ATTACK_ROLLS_BONUS: &str = "MELEE_ATTACK_ROLLS_BONUS";
pub const RANGED_ATTACK_ROLLS_BONUS: &str = "RANGED_ATTACK_ROLLS_BONUS";
pub const SPELL_DC_BONUS: &str = "SPELL_DC_BONUS";

/// One spellcasting entry on a sheet (class casting, focus spells, an
/// item's innate casting, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastingSource {
    pub name: String,
    pub key_attribute: Option<Attribute>,
    pub proficiency: Proficiency,
}

impl CastingSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_attribute: None,
            proficiency: Proficiency::Untrained,
        }
    }

    pub fn with_key_attribute(mut self, attribute: Attribute) -> Self {
        self.key_attribute = Some(attribute);
        self
    }

    pub fn with_proficiency(mut self, proficiency: Proficiency) -> Self {
        self.proficiency = proficiency;
        self
    }
}

/// Whether a spell is delivered in melee or at range, judged from its
/// printed range text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellRange {
    Melee,
    Ranged,
}

/// Classify a spell's range text. Touch-range and rangeless spells count
/// as melee; anything measured in distance counts as ranged.
pub fn classify_range(range: Option<&str>) -> SpellRange {
    let Some(text) = range else {
        return SpellRange::Melee;
    };
    let text = text.to_lowercase();
    if text.contains("touch") {
        SpellRange::Melee
    } else if text.contains("feet") || text.contains("ft") || text.contains("mile") {
        SpellRange::Ranged
    } else {
        SpellRange::Melee
    }
}

/// One labeled contribution to a derived value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Part {
    pub label: String,
    pub value: i32,
}

impl Part {
    fn new(label: impl Into<String>, value: i32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Itemized spell attack bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellAttack {
    pub parts: Vec<Part>,
    pub total: i32,
}

impl SpellAttack {
    /// Standard escalating multiple-attack-penalty sequence.
    pub fn map(&self) -> [i32; 3] {
        [self.total, self.total - 5, self.total - 10]
    }
}

/// Itemized spell DC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpellDc {
    pub parts: Vec<Part>,
    pub dc: i32,
}

/// Compute the spell attack bonus for one casting source.
pub fn spell_attack(
    character: &Character,
    store: &VariableStore,
    source: &CastingSource,
    range: Option<&str>,
) -> SpellAttack {
    let mut parts = base_parts(character, source);

    let (bonus, _) = store.bonus_total(character.id, ATTACK_ROLLS_BONUS);
    if bonus != 0 {
        parts.push(Part::new("attack roll bonuses", bonus));
    }

    match classify_range(range) {
        SpellRange::Melee => {
            let (bonus, _) = store.bonus_total(character.id, MELEE_ATTACK_ROLLS_BONUS);
            if bonus != 0 {
                parts.push(Part::new("melee attack bonuses", bonus));
            }
        }
        SpellRange::Ranged => {
            let (bonus, _) = store.bonus_total(character.id, RANGED_ATTACK_ROLLS_BONUS);
            if bonus != 0 {
                parts.push(Part::new("ranged attack bonuses", bonus));
            }
        }
    }

    let total = parts.iter().map(|part| part.value).sum();
    SpellAttack { parts, total }
}

/// Compute the spell DC for one casting source: `10 + sum(parts)`.
pub fn spell_dc(character: &Character, store: &VariableStore, source: &CastingSource) -> SpellDc {
    let mut parts = base_parts(character, source);

    let (bonus, _) = store.bonus_total(character.id, SPELL_DC_BONUS);
    if bonus != 0 {
        parts.push(Part::new("spell DC bonuses", bonus));
    }

    let dc = 10 + parts.iter().map(|part| part.value).sum::<i32>();
    SpellDc { parts, dc }
}

fn base_parts(character: &Character, source: &CastingSource) -> Vec<Part> {
    let mut parts = vec![Part::new(
        format!("{} proficiency", source.proficiency.name().to_lowercase()),
        source.proficiency.bonus(character.level),
    )];
    if let Some(attribute) = source.key_attribute {
        parts.push(Part::new(
            format!("{} modifier", attribute.abbreviation()),
            i32::from(character.attributes.modifier(attribute)),
        ));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{Attribute, Attributes};
    use crate::variables::Bonus;

    fn caster() -> (Character, CastingSource) {
        let character = Character::new("Test")
            .with_level(5)
            .with_attributes(Attributes::new(10, 14, 10, 18, 10, 10));
        let source = CastingSource::new("wizard")
            .with_key_attribute(Attribute::Intelligence)
            .with_proficiency(Proficiency::Expert);
        (character, source)
    }

    #[test]
    fn test_classify_range() {
        assert_eq!(classify_range(None), SpellRange::Melee);
        assert_eq!(classify_range(Some("touch")), SpellRange::Melee);
        assert_eq!(classify_range(Some("30 feet")), SpellRange::Ranged);
        assert_eq!(classify_range(Some("120 ft.")), SpellRange::Ranged);
        assert_eq!(classify_range(Some("1 mile")), SpellRange::Ranged);
    }

    #[test]
    fn test_spell_attack_parts_and_map() {
        let (character, source) = caster();
        let attack = spell_attack(&character, &VariableStore::new(), &source, Some("30 feet"));

        // Expert at level 5 is +9, INT 18 is +4
        assert_eq!(attack.total, 13);
        assert_eq!(attack.map(), [13, 8, 3]);
        assert_eq!(attack.parts.len(), 2);
        assert_eq!(attack.parts[0].label, "expert proficiency");
        assert_eq!(attack.parts[0].value, 9);
        assert_eq!(attack.parts[1].label, "INT modifier");
        assert_eq!(attack.parts[1].value, 4);
    }

    #[test]
    fn test_range_gated_bonuses() {
        let (character, source) = caster();
        let mut store = VariableStore::new();
        store.add_bonus(character.id, ATTACK_ROLLS_BONUS, Bonus::flat(1, "status"));
        store.add_bonus(
            character.id,
            MELEE_ATTACK_ROLLS_BONUS,
            Bonus::flat(2, "enchantment"),
        );
        store.add_bonus(
            character.id,
            RANGED_ATTACK_ROLLS_BONUS,
            Bonus::flat(3, "tracking sight"),
        );

        let melee = spell_attack(&character, &store, &source, Some("touch"));
        assert_eq!(melee.total, 13 + 1 + 2);
        let ranged = spell_attack(&character, &store, &source, Some("60 feet"));
        assert_eq!(ranged.total, 13 + 1 + 3);
    }

    #[test]
    fn test_spell_dc() {
        let (character, source) = caster();
        let mut store = VariableStore::new();
        store.add_bonus(character.id, SPELL_DC_BONUS, Bonus::flat(1, "item"));

        let dc = spell_dc(&character, &store, &source);
        assert_eq!(dc.dc, 10 + 9 + 4 + 1);
    }

    #[test]
    fn test_untrained_source_without_key_attribute() {
        let character = Character::new("Test").with_level(3);
        let source = CastingSource::new("scroll");
        let attack = spell_attack(&character, &VariableStore::new(), &source, None);
        assert_eq!(attack.total, 0);
        assert_eq!(attack.parts.len(), 1);
        assert_eq!(attack.parts[0].value, 0);
    }
}
