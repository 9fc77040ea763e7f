//! Status conditions and the condition reference table.
//!
//! Conditions the rules engine itself manipulates (Dying, Wounded,
//! Fatigued, Drained, Doomed) plus the common valued conditions a sheet
//! displays. Most conditions carry a numeric severity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The conditions this engine knows how to track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Dying,
    Wounded,
    Fatigued,
    Drained,
    Doomed,
    Frightened,
    Sickened,
    Clumsy,
    Enfeebled,
    Stupefied,
}

impl ConditionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConditionKind::Dying => "Dying",
            ConditionKind::Wounded => "Wounded",
            ConditionKind::Fatigued => "Fatigued",
            ConditionKind::Drained => "Drained",
            ConditionKind::Doomed => "Doomed",
            ConditionKind::Frightened => "Frightened",
            ConditionKind::Sickened => "Sickened",
            ConditionKind::Clumsy => "Clumsy",
            ConditionKind::Enfeebled => "Enfeebled",
            ConditionKind::Stupefied => "Stupefied",
        }
    }

    /// Whether the condition carries a numeric severity.
    pub fn has_value(&self) -> bool {
        !matches!(self, ConditionKind::Fatigued)
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A condition currently affecting a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCondition {
    pub kind: ConditionKind,
    pub value: Option<u32>,
}

impl ActiveCondition {
    pub fn new(kind: ConditionKind) -> Self {
        Self { kind, value: None }
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}

impl fmt::Display for ActiveCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{} {}", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

// ============================================================================
// Condition reference table
// ============================================================================

/// Reference entry for a condition.
#[derive(Debug, Clone)]
pub struct ConditionInfo {
    pub kind: ConditionKind,
    pub description: &'static str,
}

lazy_static::lazy_static! {
    /// Reference descriptions for every known condition.
    pub static ref CONDITIONS: Vec<ConditionInfo> = vec![
        ConditionInfo {
            kind: ConditionKind::Dying,
            description: "You are bleeding out or otherwise at death's door. \
                          Your severity increases each time you take damage \
                          while dying.",
        },
        ConditionInfo {
            kind: ConditionKind::Wounded,
            description: "You have been brought back from the brink. If you \
                          drop again, your dying value starts that much higher.",
        },
        ConditionInfo {
            kind: ConditionKind::Fatigued,
            description: "You are tired and can't summon much energy. You \
                          recover from fatigue after a full night's rest.",
        },
        ConditionInfo {
            kind: ConditionKind::Drained,
            description: "A life-sapping effect has reduced your vigor. The \
                          severity decreases by 1 each time you rest.",
        },
        ConditionInfo {
            kind: ConditionKind::Doomed,
            description: "Your soul has been gripped by a powerful force. The \
                          severity decreases by 1 each time you rest.",
        },
        ConditionInfo {
            kind: ConditionKind::Frightened,
            description: "You take a penalty equal to the severity on your \
                          checks and DCs while the fear lasts.",
        },
        ConditionInfo {
            kind: ConditionKind::Sickened,
            description: "You feel ill and take a penalty equal to the \
                          severity on your checks and DCs.",
        },
        ConditionInfo {
            kind: ConditionKind::Clumsy,
            description: "Your movements are imprecise; Dexterity-based \
                          checks and DCs take a penalty equal to the severity.",
        },
        ConditionInfo {
            kind: ConditionKind::Enfeebled,
            description: "Your strength is sapped; Strength-based checks and \
                          DCs take a penalty equal to the severity.",
        },
        ConditionInfo {
            kind: ConditionKind::Stupefied,
            description: "Your thoughts are clouded; mental checks and DCs \
                          take a penalty equal to the severity.",
        },
    ];
}

/// Look up a condition's reference entry by name.
pub fn find_condition(name: &str) -> Option<&'static ConditionInfo> {
    let name_lower = name.to_lowercase();
    CONDITIONS
        .iter()
        .find(|info| info.kind.name().to_lowercase() == name_lower)
}
