use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of turns after being applied during which trick room reverses speed order
/// for the purpose of matchup scoring.
pub const TRICK_ROOM_SCORING_WINDOW: u32 = 3;

/// Number of turns weather and field conditions last in the simulator.
pub const CONDITION_DURATION: u32 = 5;

/// A condition affecting the whole battlefield.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldCondition {
    TrickRoom,
    Gravity,
    ElectricTerrain,
    GrassyTerrain,
    MistyTerrain,
    PsychicTerrain,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sun,
    Rain,
    Sandstorm,
    Hail,
    Snow,
}

/// Active field conditions and weather, each keyed to the turn it was applied.
///
/// # Example
///
/// ```
/// use duelist_engine::{FieldCondition, FieldState, Weather};
///
/// let field = FieldState::default()
///     .with_condition(FieldCondition::TrickRoom, 4)
///     .with_weather(Weather::Rain, 2);
///
/// assert!(field.is_trick_room_active(6));
/// assert!(!field.is_trick_room_active(7));
/// assert!(field.has_weather(Weather::Rain));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldState {
    conditions: BTreeMap<FieldCondition, u32>,
    weather: BTreeMap<Weather, u32>,
}

impl FieldState {
    #[must_use]
    pub fn with_condition(mut self, condition: FieldCondition, applied_turn: u32) -> Self {
        self.set_condition(condition, applied_turn);
        self
    }

    #[must_use]
    pub fn with_weather(mut self, weather: Weather, applied_turn: u32) -> Self {
        self.set_weather(weather, applied_turn);
        self
    }

    pub fn set_condition(&mut self, condition: FieldCondition, applied_turn: u32) {
        self.conditions.insert(condition, applied_turn);
    }

    /// Sets `weather`, replacing whatever weather was active.
    pub fn set_weather(&mut self, weather: Weather, applied_turn: u32) {
        self.weather.clear();
        self.weather.insert(weather, applied_turn);
    }

    pub fn remove_condition(&mut self, condition: FieldCondition) -> Option<u32> {
        self.conditions.remove(&condition)
    }

    pub fn conditions(&self) -> impl Iterator<Item = (FieldCondition, u32)> + '_ {
        self.conditions.iter().map(|(c, t)| (*c, *t))
    }

    pub fn weather(&self) -> impl Iterator<Item = Weather> + '_ {
        self.weather.keys().copied()
    }

    #[must_use]
    pub fn condition_applied_turn(&self, condition: FieldCondition) -> Option<u32> {
        self.conditions.get(&condition).copied()
    }

    #[must_use]
    pub fn has_weather(&self, weather: Weather) -> bool {
        self.weather.contains_key(&weather)
    }

    /// Returns `true` if trick room was applied recently enough to reverse speed order at `turn`.
    ///
    /// Active while `applied_turn + 3 > turn`.
    #[must_use]
    pub fn is_trick_room_active(&self, turn: u32) -> bool {
        self.condition_applied_turn(FieldCondition::TrickRoom)
            .is_some_and(|applied| applied + TRICK_ROOM_SCORING_WINDOW > turn)
    }

    /// Removes every condition and weather applied [`CONDITION_DURATION`] or more turns
    /// before `turn`.
    ///
    /// Returns the expired weather, if any.
    pub fn expire(&mut self, turn: u32) -> Option<Weather> {
        let is_live = |applied: &u32| applied + CONDITION_DURATION > turn;
        self.conditions.retain(|_, applied| is_live(applied));
        let expired = self
            .weather
            .iter()
            .find(|(_, applied)| !is_live(applied))
            .map(|(w, _)| *w);
        self.weather.retain(|_, applied| is_live(applied));
        expired
    }
}
