//! Typed per-character variable store.
//!
//! Derived-stat computation reads named variables scoped to a character
//! id. Values are a tagged union validated at read time: a getter for
//! the wrong variant returns `None` rather than coercing. Named bonus
//! lists ride alongside, so the AC and spell handlers can report both a
//! flat total and whether any situational source exists.

use crate::character::{CharacterId, Proficiency};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A variable's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Variable {
    Num(i32),
    Bool(bool),
    Text(String),
    List(Vec<String>),
    Prof(Proficiency),
    Attr { value: i32, partial: bool },
}

/// One contribution to a named bonus. A `None` value is a purely
/// situational note that never adds to the flat total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    pub value: Option<i32>,
    pub condition: Option<String>,
    pub source: String,
}

impl Bonus {
    pub fn flat(value: i32, source: impl Into<String>) -> Self {
        Self {
            value: Some(value),
            condition: None,
            source: source.into(),
        }
    }

    pub fn conditional(
        value: Option<i32>,
        condition: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            value,
            condition: Some(condition.into()),
            source: source.into(),
        }
    }
}

/// Variables and bonuses for every character, keyed by id and name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariableStore {
    variables: HashMap<CharacterId, HashMap<String, Variable>>,
    bonuses: HashMap<CharacterId, HashMap<String, Vec<Bonus>>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: CharacterId, name: impl Into<String>, variable: Variable) {
        self.variables
            .entry(id)
            .or_default()
            .insert(name.into(), variable);
    }

    pub fn get(&self, id: CharacterId, name: &str) -> Option<&Variable> {
        self.variables.get(&id)?.get(name)
    }

    pub fn num(&self, id: CharacterId, name: &str) -> Option<i32> {
        match self.get(id, name) {
            Some(Variable::Num(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, id: CharacterId, name: &str) -> Option<bool> {
        match self.get(id, name) {
            Some(Variable::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, id: CharacterId, name: &str) -> Option<&str> {
        match self.get(id, name) {
            Some(Variable::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn list(&self, id: CharacterId, name: &str) -> Option<&[String]> {
        match self.get(id, name) {
            Some(Variable::List(values)) => Some(values),
            _ => None,
        }
    }

    pub fn prof(&self, id: CharacterId, name: &str) -> Option<Proficiency> {
        match self.get(id, name) {
            Some(Variable::Prof(rank)) => Some(*rank),
            _ => None,
        }
    }

    pub fn attr(&self, id: CharacterId, name: &str) -> Option<(i32, bool)> {
        match self.get(id, name) {
            Some(Variable::Attr { value, partial }) => Some((*value, *partial)),
            _ => None,
        }
    }

    pub fn add_bonus(&mut self, id: CharacterId, name: impl Into<String>, bonus: Bonus) {
        self.bonuses
            .entry(id)
            .or_default()
            .entry(name.into())
            .or_default()
            .push(bonus);
    }

    pub fn bonuses(&self, id: CharacterId, name: &str) -> &[Bonus] {
        self.bonuses
            .get(&id)
            .and_then(|by_name| by_name.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sum of the unconditional bonus values, and whether any situational
    /// source exists that could change the final number.
    pub fn bonus_total(&self, id: CharacterId, name: &str) -> (i32, bool) {
        let mut total = 0;
        let mut has_conditional = false;
        for bonus in self.bonuses(id, name) {
            match &bonus.condition {
                None => total += bonus.value.unwrap_or(0),
                Some(_) => has_conditional = true,
            }
        }
        (total, has_conditional)
    }

    /// Drop every variable and bonus recorded for one character.
    pub fn clear_entity(&mut self, id: CharacterId) {
        self.variables.remove(&id);
        self.bonuses.remove(&id);
    }
}
