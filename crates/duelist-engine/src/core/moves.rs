use serde::{Deserialize, Serialize};

use super::{
    field::{FieldCondition, Weather},
    stats::BoostStat,
    status::StatusKind,
    types::Type,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectTarget {
    User,
    Target,
}

/// Secondary effect a move applies after (or instead of) dealing damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "effect")]
pub enum MoveEffect {
    /// Changes a stat stage of the user or the target.
    Boost {
        target: EffectTarget,
        stat: BoostStat,
        stages: i8,
    },
    /// Inflicts a status on the target with `chance` percent probability.
    Inflict { status: StatusKind, chance: u8 },
    SetWeather { weather: Weather },
    SetField { condition: FieldCondition },
}

/// A move a unit knows.
///
/// # Example
///
/// ```
/// use duelist_engine::{Move, MoveCategory, MoveEffect, StatusKind, Type};
///
/// let flamethrower = Move::new("Flamethrower", Type::Fire, MoveCategory::Special, 90)
///     .with_effect(MoveEffect::Inflict { status: StatusKind::Burn, chance: 10 });
/// assert_eq!(flamethrower.base_power(), 90);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    name: String,
    #[serde(rename = "type")]
    move_type: Type,
    category: MoveCategory,
    #[serde(default)]
    base_power: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    effect: Option<MoveEffect>,
}

impl Move {
    #[must_use]
    pub fn new(name: impl Into<String>, move_type: Type, category: MoveCategory, base_power: u16) -> Self {
        Self {
            name: name.into(),
            move_type,
            category,
            base_power,
            effect: None,
        }
    }

    /// Shorthand for a non-damaging move whose only purpose is `effect`.
    #[must_use]
    pub fn status(name: impl Into<String>, move_type: Type, effect: MoveEffect) -> Self {
        Self::new(name, move_type, MoveCategory::Status, 0).with_effect(effect)
    }

    #[must_use]
    pub fn with_effect(mut self, effect: MoveEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn move_type(&self) -> Type {
        self.move_type
    }

    #[must_use]
    pub fn category(&self) -> MoveCategory {
        self.category
    }

    #[must_use]
    pub fn base_power(&self) -> u16 {
        self.base_power
    }

    #[must_use]
    pub fn effect(&self) -> Option<&MoveEffect> {
        self.effect.as_ref()
    }
}
