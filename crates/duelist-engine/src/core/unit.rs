use arrayvec::ArrayVec;
use serde::{Deserialize, Deserializer, Serialize};

use super::{
    moves::Move,
    stats::{BATTLE_LEVEL, Boosts, StatTable},
    status::Status,
    types::Type,
};

/// Maximum number of moves a unit knows.
pub const MAX_MOVES: usize = 4;

/// One battling creature.
///
/// A unit carries its species data (base stats, types, moves) together with its volatile
/// in-battle state (HP fraction, boost stages, status, terastallization).
///
/// # Example
///
/// ```
/// use duelist_engine::{StatTable, Type, Unit};
///
/// let unit = Unit::new("Vaporeon", &[Type::Water], StatTable::new(130, 65, 60, 110, 95, 65))
///     .with_hp_fraction(0.5);
///
/// assert!(unit.has_type(Type::Water));
/// assert_eq!(unit.hp_fraction(), 0.5);
/// assert!(!unit.is_fainted());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    species: String,
    types: ArrayVec<Type, 2>,
    base_stats: StatTable,
    stats: StatTable,
    #[serde(default)]
    moves: ArrayVec<Move, MAX_MOVES>,
    #[serde(default = "full_hp", deserialize_with = "deserialize_hp_fraction")]
    hp_fraction: f32,
    #[serde(default)]
    boosts: Boosts,
    #[serde(default)]
    status: Option<Status>,
    #[serde(default)]
    tera_type: Option<Type>,
    #[serde(default)]
    terastallized: bool,
}

fn full_hp() -> f32 {
    1.0
}

fn clamp_hp_fraction(hp_fraction: f32) -> f32 {
    if hp_fraction.is_nan() {
        0.0
    } else {
        hp_fraction.clamp(0.0, 1.0)
    }
}

fn deserialize_hp_fraction<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    f32::deserialize(deserializer).map(clamp_hp_fraction)
}

impl Unit {
    /// Creates a healthy unit whose in-battle stats are derived from `base_stats`.
    ///
    /// At most the first two entries of `types` are kept.
    #[must_use]
    pub fn new(species: impl Into<String>, types: &[Type], base_stats: StatTable) -> Self {
        Self {
            species: species.into(),
            types: types.iter().copied().take(2).collect(),
            base_stats,
            stats: base_stats.at_level(BATTLE_LEVEL),
            moves: ArrayVec::new(),
            hp_fraction: 1.0,
            boosts: Boosts::default(),
            status: None,
            tera_type: None,
            terastallized: false,
        }
    }

    /// Replaces the moveset. Moves beyond [`MAX_MOVES`] are ignored.
    #[must_use]
    pub fn with_moves<I>(mut self, moves: I) -> Self
    where
        I: IntoIterator<Item = Move>,
    {
        self.moves = moves.into_iter().take(MAX_MOVES).collect();
        self
    }

    /// Overrides the in-battle stats (e.g. with values reported by a simulator).
    #[must_use]
    pub fn with_stats(mut self, stats: StatTable) -> Self {
        self.stats = stats;
        self
    }

    #[must_use]
    pub fn with_hp_fraction(mut self, hp_fraction: f32) -> Self {
        self.set_hp_fraction(hp_fraction);
        self
    }

    #[must_use]
    pub fn with_boosts(mut self, boosts: Boosts) -> Self {
        self.boosts = boosts;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_tera_type(mut self, tera_type: Type) -> Self {
        self.tera_type = Some(tera_type);
        self
    }

    /// Marks the unit as terastallized into `tera_type`.
    #[must_use]
    pub fn terastallized(mut self, tera_type: Type) -> Self {
        self.tera_type = Some(tera_type);
        self.terastallized = true;
        self
    }

    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Declared types of the unit (0 to 2 entries), ignoring terastallization.
    #[must_use]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    /// Types the unit defends with: its tera type while terastallized, its declared types
    /// otherwise.
    #[must_use]
    pub fn defensive_types(&self) -> &[Type] {
        match (&self.tera_type, self.terastallized) {
            (Some(tera), true) => std::slice::from_ref(tera),
            _ => &self.types,
        }
    }

    /// Returns `true` if the unit counts as `ty`.
    ///
    /// A terastallized unit counts only as its tera type.
    #[must_use]
    pub fn has_type(&self, ty: Type) -> bool {
        if self.terastallized {
            return self.tera_type == Some(ty);
        }
        self.types.contains(&ty)
    }

    #[must_use]
    pub fn base_stats(&self) -> &StatTable {
        &self.base_stats
    }

    #[must_use]
    pub fn stats(&self) -> &StatTable {
        &self.stats
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Current HP as a fraction of max HP, in `[0.0, 1.0]`.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        self.hp_fraction
    }

    #[must_use]
    pub fn is_fainted(&self) -> bool {
        self.hp_fraction <= 0.0
    }

    #[must_use]
    pub fn boosts(&self) -> &Boosts {
        &self.boosts
    }

    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    #[must_use]
    pub fn tera_type(&self) -> Option<Type> {
        self.tera_type
    }

    #[must_use]
    pub fn is_terastallized(&self) -> bool {
        self.terastallized
    }

    pub fn boosts_mut(&mut self) -> &mut Boosts {
        &mut self.boosts
    }

    /// Sets the HP fraction, clamped to `[0.0, 1.0]` (NaN counts as fainted).
    pub fn set_hp_fraction(&mut self, hp_fraction: f32) {
        self.hp_fraction = clamp_hp_fraction(hp_fraction);
    }

    /// Removes `fraction` of max HP. Returns the HP actually lost.
    pub fn take_damage(&mut self, fraction: f32) -> f32 {
        let before = self.hp_fraction;
        self.set_hp_fraction(before - fraction);
        before - self.hp_fraction
    }

    /// Terastallizes the unit into its tera type.
    ///
    /// Returns `false` and leaves the unit unchanged if it has no tera type or already
    /// terastallized.
    pub fn terastallize(&mut self) -> bool {
        if self.terastallized || self.tera_type.is_none() {
            return false;
        }
        self.terastallized = true;
        true
    }

    pub fn set_status(&mut self, status: Option<Status>) {
        self.status = status;
    }

    /// Clears volatile state lost when the unit leaves the field.
    pub fn switch_out(&mut self) {
        self.boosts = Boosts::default();
        if let Some(Status::Toxic { turns }) = &mut self.status {
            *turns = 0;
        }
    }
}
