use serde::{Deserialize, Serialize};

/// Level every unit battles at.
pub const BATTLE_LEVEL: u16 = 50;

/// Lowest and highest boost stage a stat can reach.
pub const MIN_BOOST_STAGE: i8 = -6;
pub const MAX_BOOST_STAGE: i8 = 6;

/// The six permanent stats of a unit.
///
/// Used both for species base stats and for the derived in-battle stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTable {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl StatTable {
    #[must_use]
    pub const fn new(
        hp: u16,
        attack: u16,
        defense: u16,
        special_attack: u16,
        special_defense: u16,
        speed: u16,
    ) -> Self {
        Self {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }

    /// Derives in-battle stats from base stats at `level`.
    ///
    /// Uses the simplified formula without individual or effort values:
    ///
    /// ```text
    /// hp    = 2 · base · level / 100 + level + 10
    /// other = 2 · base · level / 100 + 5
    /// ```
    ///
    /// Results that do not fit a `u16` saturate at `u16::MAX`.
    #[must_use]
    pub fn at_level(&self, level: u16) -> Self {
        let scaled = |base: u16, offset: u32| {
            let value = 2 * u32::from(base) * u32::from(level) / 100 + offset;
            u16::try_from(value).unwrap_or(u16::MAX)
        };
        let other = |base| scaled(base, 5);
        Self {
            hp: scaled(self.hp, u32::from(level) + 10),
            attack: other(self.attack),
            defense: other(self.defense),
            special_attack: other(self.special_attack),
            special_defense: other(self.special_defense),
            speed: other(self.speed),
        }
    }

    /// Returns `true` if attack is at least special attack.
    #[must_use]
    pub const fn is_physical(&self) -> bool {
        self.attack >= self.special_attack
    }

    /// Returns `true` if special attack is at least attack.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        self.special_attack >= self.attack
    }
}

/// A stat whose stage can be raised or lowered during battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum BoostStat {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl BoostStat {
    pub const LEN: usize = 7;

    pub const ALL: [BoostStat; Self::LEN] = [
        BoostStat::Attack,
        BoostStat::Defense,
        BoostStat::SpecialAttack,
        BoostStat::SpecialDefense,
        BoostStat::Speed,
        BoostStat::Accuracy,
        BoostStat::Evasion,
    ];
}

/// Boost stages of every [`BoostStat`], each clamped to
/// [`MIN_BOOST_STAGE`]..=[`MAX_BOOST_STAGE`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BoostStages")]
pub struct Boosts {
    attack: i8,
    defense: i8,
    special_attack: i8,
    special_defense: i8,
    speed: i8,
    accuracy: i8,
    evasion: i8,
}

/// Boost stages as written in input files, before clamping.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct BoostStages {
    attack: i8,
    defense: i8,
    special_attack: i8,
    special_defense: i8,
    speed: i8,
    accuracy: i8,
    evasion: i8,
}

impl From<BoostStages> for Boosts {
    fn from(stages: BoostStages) -> Self {
        Boosts::default()
            .with(BoostStat::Attack, stages.attack)
            .with(BoostStat::Defense, stages.defense)
            .with(BoostStat::SpecialAttack, stages.special_attack)
            .with(BoostStat::SpecialDefense, stages.special_defense)
            .with(BoostStat::Speed, stages.speed)
            .with(BoostStat::Accuracy, stages.accuracy)
            .with(BoostStat::Evasion, stages.evasion)
    }
}

impl Boosts {
    #[must_use]
    pub const fn get(&self, stat: BoostStat) -> i8 {
        match stat {
            BoostStat::Attack => self.attack,
            BoostStat::Defense => self.defense,
            BoostStat::SpecialAttack => self.special_attack,
            BoostStat::SpecialDefense => self.special_defense,
            BoostStat::Speed => self.speed,
            BoostStat::Accuracy => self.accuracy,
            BoostStat::Evasion => self.evasion,
        }
    }

    fn slot_mut(&mut self, stat: BoostStat) -> &mut i8 {
        match stat {
            BoostStat::Attack => &mut self.attack,
            BoostStat::Defense => &mut self.defense,
            BoostStat::SpecialAttack => &mut self.special_attack,
            BoostStat::SpecialDefense => &mut self.special_defense,
            BoostStat::Speed => &mut self.speed,
            BoostStat::Accuracy => &mut self.accuracy,
            BoostStat::Evasion => &mut self.evasion,
        }
    }

    /// Sets the stage of `stat`, clamping it to the legal range.
    pub fn set(&mut self, stat: BoostStat, stage: i8) {
        *self.slot_mut(stat) = stage.clamp(MIN_BOOST_STAGE, MAX_BOOST_STAGE);
    }

    /// Adds `delta` stages to `stat`, clamping the result.
    ///
    /// Returns the number of stages actually applied.
    pub fn apply(&mut self, stat: BoostStat, delta: i8) -> i8 {
        let before = self.get(stat);
        self.set(stat, before.saturating_add(delta));
        self.get(stat) - before
    }

    #[must_use]
    pub fn with(mut self, stat: BoostStat, stage: i8) -> Self {
        self.set(stat, stage);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoostStat, i8)> + '_ {
        BoostStat::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }

    /// Multiplier the stage of `stat` applies to the underlying stat.
    ///
    /// `(2 + s) / 2` for non-negative stages, `2 / (2 - s)` for negative ones.
    #[must_use]
    pub fn multiplier(&self, stat: BoostStat) -> f32 {
        let stage = f32::from(self.get(stat));
        if stage >= 0.0 {
            (2.0 + stage) / 2.0
        } else {
            2.0 / (2.0 - stage)
        }
    }
}
