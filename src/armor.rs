//! Armor model and the itemized Armor Class breakdown.
//!
//! The breakdown is a required contract, not a convenience: sheet
//! consumers show every contributing part next to the total, so the
//! computation returns each component separately.

use crate::character::{Attribute, Character, Proficiency};
use crate::variables::VariableStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Bonus-variable name consumed by the AC breakdown.
pub const AC_BONUS: &str = "AC_BONUS";

/// Armor weight category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorCategory {
    Unarmored,
    Light,
    Medium,
    Heavy,
}

impl ArmorCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ArmorCategory::Unarmored => "Unarmored",
            ArmorCategory::Light => "Light",
            ArmorCategory::Medium => "Medium",
            ArmorCategory::Heavy => "Heavy",
        }
    }
}

/// Armor construction group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorGroup {
    Chain,
    Composite,
    Leather,
    Plate,
    Wood,
}

/// A wearable armor item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorItem {
    pub name: String,
    pub category: ArmorCategory,
    pub group: Option<ArmorGroup>,
    pub ac_bonus: i32,
    /// Maximum Dexterity bonus while worn; `None` means uncapped.
    pub dex_cap: Option<i32>,
    /// Strength score required to shrug off the armor's penalties.
    pub strength: Option<u8>,
    /// Check penalty magnitude (stored positive).
    pub check_penalty: i32,
    /// Speed penalty magnitude in feet (stored positive).
    pub speed_penalty: i32,
}

impl ArmorItem {
    pub fn new(name: impl Into<String>, category: ArmorCategory, ac_bonus: i32) -> Self {
        Self {
            name: name.into(),
            category,
            group: None,
            ac_bonus,
            dex_cap: None,
            strength: None,
            check_penalty: 0,
            speed_penalty: 0,
        }
    }

    pub fn with_group(mut self, group: ArmorGroup) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_dex_cap(mut self, cap: i32) -> Self {
        self.dex_cap = Some(cap);
        self
    }

    pub fn with_strength(mut self, score: u8) -> Self {
        self.strength = Some(score);
        self
    }

    pub fn with_check_penalty(mut self, penalty: i32) -> Self {
        self.check_penalty = penalty;
        self
    }

    pub fn with_speed_penalty(mut self, penalty: i32) -> Self {
        self.speed_penalty = penalty;
        self
    }
}

/// Armor training by category, construction group, and specific item.
/// Overlapping special-case training is resolved by taking the best rank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArmorProficiencies {
    pub categories: HashMap<ArmorCategory, Proficiency>,
    pub groups: HashMap<ArmorGroup, Proficiency>,
    pub items: HashMap<String, Proficiency>,
}

impl ArmorProficiencies {
    /// Best applicable rank for the worn item (or unarmored defense).
    pub fn rank_for(&self, item: Option<&ArmorItem>) -> Proficiency {
        let Some(item) = item else {
            return self
                .categories
                .get(&ArmorCategory::Unarmored)
                .copied()
                .unwrap_or_default();
        };
        let mut best = self
            .categories
            .get(&item.category)
            .copied()
            .unwrap_or_default();
        if let Some(group) = item.group {
            if let Some(rank) = self.groups.get(&group) {
                best = best.max(*rank);
            }
        }
        if let Some(rank) = self.items.get(&item.name) {
            best = best.max(*rank);
        }
        best
    }
}

/// Component breakdown of Armor Class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcParts {
    pub prof_bonus: i32,
    pub ac_bonus: i32,
    /// True when situational bonus sources exist, so the displayed value
    /// may vary by circumstance.
    pub has_conditional_bonus: bool,
    pub dex_bonus: i32,
    pub armor_bonus: i32,
    /// Check penalty as a non-positive value (0 when waived).
    pub check_penalty: i32,
    /// Speed penalty in feet as a non-positive value.
    pub speed_penalty: i32,
}

impl AcParts {
    pub fn total(&self) -> i32 {
        10 + self.prof_bonus + self.ac_bonus + self.dex_bonus + self.armor_bonus
    }
}

/// Compute the AC breakdown for a character wearing `item` (or nothing).
///
/// Penalties are waived when the wearer's Strength modifier meets the
/// modifier equivalent of the item's strength-score requirement; the
/// speed penalty is then additionally relieved by 5 ft, clamped so it
/// never becomes a bonus.
pub fn ac_parts(character: &Character, store: &VariableStore, item: Option<&ArmorItem>) -> AcParts {
    let rank = character.armor_proficiencies.rank_for(item);
    let prof_bonus = rank.bonus(character.level);
    let (ac_bonus, has_conditional_bonus) = store.bonus_total(character.id, AC_BONUS);

    let dex = i32::from(character.attributes.modifier(Attribute::Dexterity));
    let dex_bonus = match item.and_then(|item| item.dex_cap) {
        Some(cap) => dex.min(cap),
        None => dex,
    };

    let armor_bonus = item.map_or(0, |item| item.ac_bonus);

    let (check_penalty, speed_penalty) = match item {
        None => (0, 0),
        Some(item) => {
            let waived = item.strength.is_some_and(|score| {
                let required = (score as i8 - 10).div_euclid(2);
                character.attributes.modifier(Attribute::Strength) >= required
            });
            if waived {
                (0, (5 - item.speed_penalty).min(0))
            } else {
                (-item.check_penalty, -item.speed_penalty)
            }
        }
    };

    AcParts {
        prof_bonus,
        ac_bonus,
        has_conditional_bonus,
        dex_bonus,
        armor_bonus,
        check_penalty,
        speed_penalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Attributes;
    use crate::variables::Bonus;

    fn splint_mail() -> ArmorItem {
        ArmorItem::new("Splint Mail", ArmorCategory::Heavy, 5)
            .with_group(ArmorGroup::Plate)
            .with_dex_cap(1)
            .with_strength(16)
            .with_check_penalty(3)
            .with_speed_penalty(10)
    }

    #[test]
    fn test_unarmored_dex_is_uncapped() {
        let mut character = Character::new("Test")
            .with_level(2)
            .with_attributes(Attributes::new(10, 18, 10, 10, 10, 10));
        character
            .armor_proficiencies
            .categories
            .insert(ArmorCategory::Unarmored, Proficiency::Trained);

        let parts = ac_parts(&character, &VariableStore::new(), None);
        assert_eq!(parts.prof_bonus, 4);
        assert_eq!(parts.dex_bonus, 4);
        assert_eq!(parts.armor_bonus, 0);
        assert_eq!(parts.check_penalty, 0);
        assert_eq!(parts.total(), 18);
    }

    #[test]
    fn test_dex_cap_applies_when_worn() {
        let mut character = Character::new("Test")
            .with_attributes(Attributes::new(10, 18, 10, 10, 10, 10));
        character
            .armor_proficiencies
            .categories
            .insert(ArmorCategory::Heavy, Proficiency::Trained);

        let armor = splint_mail();
        let parts = ac_parts(&character, &VariableStore::new(), Some(&armor));
        assert_eq!(parts.dex_bonus, 1);
        assert_eq!(parts.armor_bonus, 5);
    }

    #[test]
    fn test_best_of_overlapping_proficiencies() {
        let mut character = Character::new("Test").with_level(3);
        character
            .armor_proficiencies
            .categories
            .insert(ArmorCategory::Heavy, Proficiency::Trained);
        character
            .armor_proficiencies
            .groups
            .insert(ArmorGroup::Plate, Proficiency::Expert);
        character
            .armor_proficiencies
            .items
            .insert("Splint Mail".to_string(), Proficiency::Master);

        let armor = splint_mail();
        assert_eq!(
            character.armor_proficiencies.rank_for(Some(&armor)),
            Proficiency::Master
        );
        let parts = ac_parts(&character, &VariableStore::new(), Some(&armor));
        assert_eq!(parts.prof_bonus, 9);
    }

    #[test]
    fn test_penalties_without_strength_waiver() {
        let character = Character::new("Test");
        let armor = splint_mail();
        let parts = ac_parts(&character, &VariableStore::new(), Some(&armor));
        assert_eq!(parts.check_penalty, -3);
        assert_eq!(parts.speed_penalty, -10);
    }

    #[test]
    fn test_strength_waiver_clears_penalties() {
        let character = Character::new("Test")
            .with_attributes(Attributes::new(16, 10, 10, 10, 10, 10));
        let armor = ArmorItem::new("Chain Shirt", ArmorCategory::Light, 2)
            .with_strength(14)
            .with_check_penalty(2)
            .with_speed_penalty(5);
        let parts = ac_parts(&character, &VariableStore::new(), Some(&armor));
        assert_eq!(parts.check_penalty, 0);
        // -5 relieved by +5 ft, clamped at 0
        assert_eq!(parts.speed_penalty, 0);
    }

    #[test]
    fn test_waived_speed_penalty_never_goes_positive() {
        let character = Character::new("Test")
            .with_attributes(Attributes::new(18, 10, 10, 10, 10, 10));
        let armor = splint_mail();
        let parts = ac_parts(&character, &VariableStore::new(), Some(&armor));
        assert_eq!(parts.speed_penalty, -5);
    }

    #[test]
    fn test_conditional_bonus_sets_flag() {
        let character = Character::new("Test");
        let mut store = VariableStore::new();
        store.add_bonus(character.id, AC_BONUS, Bonus::flat(2, "shield (raised)"));
        store.add_bonus(
            character.id,
            AC_BONUS,
            Bonus::conditional(Some(1), "vs. giants", "dwarven training"),
        );

        let parts = ac_parts(&character, &store, None);
        assert_eq!(parts.ac_bonus, 2);
        assert!(parts.has_conditional_bonus);
    }
}
