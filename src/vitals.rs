//! Health, experience, and rest state transitions.
//!
//! These are the only paths that change a character's hit points,
//! experience, or condition list. Each transition computes its result
//! from the current snapshot and applies it whole; there is no partial
//! application.

use crate::character::{Attribute, Character};
use crate::conditions::ConditionKind;
use crate::expr;

impl Character {
    /// Confirm an edited hit point value.
    ///
    /// `input` may be a plain number or a small arithmetic expression;
    /// malformed input degrades to a plain integer parse and finally to
    /// 0. The result is clamped to `[0, max_health]` and returned. When
    /// the value is unchanged the character is left untouched.
    ///
    /// Crossing zero drives the death spiral: dropping to exactly 0 adds
    /// `Dying` seeded one above any existing `Wounded` value, and rising
    /// from 0 removes `Dying` and raises `Wounded` by one.
    pub fn confirm_health(&mut self, input: &str, max_health: i32) -> i32 {
        let max_health = max_health.max(0);
        let value = expr::evaluate_lenient(input).clamp(0, max_health as i64) as i32;
        if value == self.hp_current {
            return value;
        }

        if self.hp_current > 0 && value == 0 {
            let wounded = self.condition_value(ConditionKind::Wounded).unwrap_or(0);
            self.add_condition(ConditionKind::Dying, Some(wounded + 1));
        } else if self.hp_current == 0 && value > 0 {
            self.remove_condition(ConditionKind::Dying);
            let wounded = self.condition_value(ConditionKind::Wounded).unwrap_or(0);
            self.add_condition(ConditionKind::Wounded, Some(wounded + 1));
        }

        self.hp_current = value;
        self.reset_hp = false;
        value
    }

    /// Confirm an edited experience value. Same lenient parse as
    /// [`Character::confirm_health`], clamped to be non-negative, set
    /// unconditionally.
    pub fn confirm_experience(&mut self, input: &str) -> i32 {
        let value = expr::evaluate_lenient(input).clamp(0, i32::MAX as i64) as i32;
        self.experience = value;
        value
    }

    /// Take a full night's rest.
    ///
    /// Applies, in order: hit point regeneration of `level * max(1, CON)`
    /// capped at `max_health`; stamina and resolve recomputation when the
    /// stamina variant pool is present; innate spell casts back to 0;
    /// focus points back to maximum; every spell slot un-exhausted; then
    /// condition cleanup: Fatigued always removed, Wounded removed only
    /// at exactly full hit points, Drained and Doomed each reduced by 1
    /// and removed at 0.
    pub fn rest(&mut self, max_health: i32) {
        let con = i32::from(self.attributes.modifier(Attribute::Constitution));
        let regen = i32::from(self.level) * con.max(1);
        self.hp_current = (self.hp_current + regen).min(max_health);

        if let Some(pool) = &mut self.stamina {
            pool.stamina = (self.class_hp / 2 + con) * i32::from(self.level);
            pool.resolve = match self.key_attribute {
                Some(attribute) => i32::from(self.attributes.modifier(attribute)),
                None => 0,
            };
        }

        for spell in &mut self.spellcasting.innate {
            spell.casts_current = 0;
        }
        self.spellcasting.focus.current = self.spellcasting.focus.maximum;
        for slot in &mut self.spellcasting.slots {
            slot.exhausted = false;
        }

        self.remove_condition(ConditionKind::Fatigued);
        if self.hp_current == max_health {
            self.remove_condition(ConditionKind::Wounded);
        }
        self.decrement_condition(ConditionKind::Drained);
        self.decrement_condition(ConditionKind::Doomed);
    }

    /// Reduce a valued condition by 1, removing it at 0. A valueless
    /// entry counts as severity 1.
    fn decrement_condition(&mut self, kind: ConditionKind) {
        let Some(condition) = self.condition(kind) else {
            return;
        };
        let value = condition.value.unwrap_or(1);
        if value <= 1 {
            self.remove_condition(kind);
        } else if let Some(condition) = self.condition_mut(kind) {
            condition.value = Some(value - 1);
        }
    }
}
