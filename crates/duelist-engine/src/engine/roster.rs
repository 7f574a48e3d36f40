use arrayvec::ArrayVec;
use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

use crate::core::{
    BoostStat, EffectTarget, FieldCondition, MAX_MOVES, Move, MoveCategory, MoveEffect, StatTable,
    StatusKind, Type, Unit, Weather,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    #[display("roster has no species")]
    Empty,
    #[display("species {_0} has no types")]
    NoTypes(#[error(not(source))] String),
    #[display("species {_0} knows no moves")]
    NoMoves(#[error(not(source))] String),
    #[display("species {_0} is listed more than once")]
    Duplicate(#[error(not(source))] String),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("cannot draw a team of {requested} from a roster of {available}")]
pub struct TeamSizeError {
    pub requested: usize,
    pub available: usize,
}

/// Species template a [`Unit`] is created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    name: String,
    types: ArrayVec<Type, 2>,
    base_stats: StatTable,
    moves: ArrayVec<Move, MAX_MOVES>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tera_type: Option<Type>,
}

impl Species {
    #[must_use]
    pub fn new<I>(name: impl Into<String>, types: &[Type], base_stats: StatTable, moves: I) -> Self
    where
        I: IntoIterator<Item = Move>,
    {
        Self {
            name: name.into(),
            types: types.iter().copied().take(2).collect(),
            base_stats,
            moves: moves.into_iter().take(MAX_MOVES).collect(),
            tera_type: None,
        }
    }

    #[must_use]
    pub fn with_tera_type(mut self, tera_type: Type) -> Self {
        self.tera_type = Some(tera_type);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn types(&self) -> &[Type] {
        &self.types
    }

    #[must_use]
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Creates a fresh, healthy unit of this species.
    #[must_use]
    pub fn to_unit(&self) -> Unit {
        let unit = Unit::new(&self.name, &self.types, self.base_stats).with_moves(self.moves.iter().cloned());
        match self.tera_type {
            Some(tera) => unit.with_tera_type(tera),
            None => unit,
        }
    }
}

/// A validated list of species teams are drawn from.
///
/// Every species has at least one type and one move, and names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Species>", into = "Vec<Species>")]
pub struct Roster {
    species: Vec<Species>,
}

impl TryFrom<Vec<Species>> for Roster {
    type Error = RosterError;

    fn try_from(species: Vec<Species>) -> Result<Self, Self::Error> {
        Self::new(species)
    }
}

impl From<Roster> for Vec<Species> {
    fn from(roster: Roster) -> Self {
        roster.species
    }
}

impl Roster {
    pub fn new(species: Vec<Species>) -> Result<Self, RosterError> {
        if species.is_empty() {
            return Err(RosterError::Empty);
        }
        for (i, s) in species.iter().enumerate() {
            if s.types.is_empty() {
                return Err(RosterError::NoTypes(s.name.clone()));
            }
            if s.moves.is_empty() {
                return Err(RosterError::NoMoves(s.name.clone()));
            }
            if species[..i].iter().any(|other| other.name == s.name) {
                return Err(RosterError::Duplicate(s.name.clone()));
            }
        }
        Ok(Self { species })
    }

    #[must_use]
    pub fn species(&self) -> &[Species] {
        &self.species
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.species.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Draws `size` distinct species at random and creates a team from them.
    pub fn random_team<R>(&self, size: usize, rng: &mut R) -> Result<Vec<Unit>, TeamSizeError>
    where
        R: Rng + ?Sized,
    {
        if size == 0 || size > self.species.len() {
            return Err(TeamSizeError {
                requested: size,
                available: self.species.len(),
            });
        }
        Ok(self
            .species
            .choose_multiple(rng, size)
            .map(Species::to_unit)
            .collect())
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            species: default_roster(),
        }
    }
}

fn physical(name: &str, ty: Type, power: u16) -> Move {
    Move::new(name, ty, MoveCategory::Physical, power)
}

fn special(name: &str, ty: Type, power: u16) -> Move {
    Move::new(name, ty, MoveCategory::Special, power)
}

fn inflict(status: StatusKind, chance: u8) -> MoveEffect {
    MoveEffect::Inflict { status, chance }
}

fn raise(stat: BoostStat, stages: i8) -> MoveEffect {
    MoveEffect::Boost {
        target: EffectTarget::User,
        stat,
        stages,
    }
}

fn weather(weather: Weather) -> MoveEffect {
    MoveEffect::SetWeather { weather }
}

/// The built-in roster: fourteen species with four moves and a tera type each.
#[must_use]
#[expect(clippy::too_many_lines)]
pub fn default_roster() -> Vec<Species> {
    use Type::{
        Dark, Dragon, Electric, Fairy, Fighting, Fire, Flying, Ghost, Grass, Ground, Ice, Normal,
        Poison, Psychic, Rock, Steel, Water,
    };

    let earthquake = || physical("Earthquake", Ground, 100);
    let shadow_ball = || special("Shadow Ball", Ghost, 80);
    let sludge_bomb = || special("Sludge Bomb", Poison, 90).with_effect(inflict(StatusKind::Poison, 30));
    let giga_drain = || special("Giga Drain", Grass, 75);
    let dragon_claw = || physical("Dragon Claw", Dragon, 80);
    let stone_edge = || physical("Stone Edge", Rock, 100);
    let crunch = || physical("Crunch", Dark, 80);
    let thunderbolt = || special("Thunderbolt", Electric, 90).with_effect(inflict(StatusKind::Paralysis, 10));
    let swords_dance = || Move::status("Swords Dance", Normal, raise(BoostStat::Attack, 2));

    vec![
        Species::new(
            "Charizard",
            &[Fire, Flying],
            StatTable::new(78, 84, 78, 109, 85, 100),
            [
                special("Flamethrower", Fire, 90).with_effect(inflict(StatusKind::Burn, 10)),
                special("Air Slash", Flying, 75),
                Move::status("Sunny Day", Fire, weather(Weather::Sun)),
                special("Dragon Pulse", Dragon, 85),
            ],
        )
        .with_tera_type(Fire),
        Species::new(
            "Blastoise",
            &[Water],
            StatTable::new(79, 83, 100, 85, 105, 78),
            [
                special("Hydro Pump", Water, 110),
                special("Ice Beam", Ice, 90).with_effect(inflict(StatusKind::Freeze, 10)),
                Move::status("Rain Dance", Water, weather(Weather::Rain)),
                special("Dark Pulse", Dark, 80),
            ],
        )
        .with_tera_type(Water),
        Species::new(
            "Venusaur",
            &[Grass, Poison],
            StatTable::new(80, 82, 83, 100, 100, 80),
            [
                giga_drain(),
                sludge_bomb(),
                earthquake(),
                Move::status("Sleep Powder", Grass, inflict(StatusKind::Sleep, 75)),
            ],
        )
        .with_tera_type(Poison),
        Species::new(
            "Tyranitar",
            &[Rock, Dark],
            StatTable::new(100, 134, 110, 95, 100, 61),
            [
                stone_edge(),
                crunch(),
                earthquake(),
                Move::status("Sandstorm", Rock, weather(Weather::Sandstorm)),
            ],
        )
        .with_tera_type(Ghost),
        Species::new(
            "Garchomp",
            &[Dragon, Ground],
            StatTable::new(108, 130, 95, 80, 85, 102),
            [earthquake(), dragon_claw(), stone_edge(), swords_dance()],
        )
        .with_tera_type(Steel),
        Species::new(
            "Jolteon",
            &[Electric],
            StatTable::new(65, 65, 60, 110, 95, 130),
            [
                thunderbolt(),
                shadow_ball(),
                Move::status("Thunder Wave", Electric, inflict(StatusKind::Paralysis, 90)),
                special("Volt Switch", Electric, 70),
            ],
        )
        .with_tera_type(Electric),
        Species::new(
            "Gengar",
            &[Ghost, Poison],
            StatTable::new(60, 65, 60, 130, 75, 110),
            [
                shadow_ball(),
                sludge_bomb(),
                thunderbolt(),
                Move::status("Toxic", Poison, inflict(StatusKind::Toxic, 90)),
            ],
        )
        .with_tera_type(Ghost),
        Species::new(
            "Abomasnow",
            &[Grass, Ice],
            StatTable::new(90, 92, 75, 92, 85, 60),
            [
                special("Blizzard", Ice, 110).with_effect(inflict(StatusKind::Freeze, 10)),
                giga_drain(),
                Move::status("Snowscape", Ice, weather(Weather::Snow)),
                earthquake(),
            ],
        )
        .with_tera_type(Ice),
        Species::new(
            "Dragonite",
            &[Dragon, Flying],
            StatTable::new(91, 134, 95, 100, 100, 80),
            [
                physical("Extreme Speed", Normal, 80),
                physical("Fire Punch", Fire, 75).with_effect(inflict(StatusKind::Burn, 10)),
                earthquake(),
                dragon_claw(),
            ],
        )
        .with_tera_type(Normal),
        Species::new(
            "Reuniclus",
            &[Psychic],
            StatTable::new(110, 65, 75, 125, 85, 30),
            [
                special("Psychic", Psychic, 90),
                Move::status(
                    "Trick Room",
                    Psychic,
                    MoveEffect::SetField {
                        condition: FieldCondition::TrickRoom,
                    },
                ),
                special("Focus Blast", Fighting, 120),
                Move::status("Calm Mind", Psychic, raise(BoostStat::SpecialAttack, 1)),
            ],
        )
        .with_tera_type(Fairy),
        Species::new(
            "Lucario",
            &[Fighting, Steel],
            StatTable::new(70, 110, 70, 115, 70, 90),
            [
                physical("Close Combat", Fighting, 120),
                special("Flash Cannon", Steel, 80),
                special("Aura Sphere", Fighting, 80),
                Move::status("Nasty Plot", Dark, raise(BoostStat::SpecialAttack, 2)),
            ],
        )
        .with_tera_type(Normal),
        Species::new(
            "Sylveon",
            &[Fairy],
            StatTable::new(95, 65, 65, 110, 130, 60),
            [
                special("Moonblast", Fairy, 95),
                special("Hyper Voice", Normal, 90),
                Move::status("Will-O-Wisp", Fire, inflict(StatusKind::Burn, 85)),
                shadow_ball(),
            ],
        )
        .with_tera_type(Fairy),
        Species::new(
            "Excadrill",
            &[Ground, Steel],
            StatTable::new(110, 135, 60, 50, 65, 88),
            [
                earthquake(),
                physical("Iron Head", Steel, 80),
                physical("Rock Slide", Rock, 75),
                swords_dance(),
            ],
        )
        .with_tera_type(Water),
        Species::new(
            "Gyarados",
            &[Water, Flying],
            StatTable::new(95, 125, 79, 60, 100, 81),
            [
                physical("Waterfall", Water, 80),
                crunch(),
                physical("Ice Fang", Ice, 65).with_effect(inflict(StatusKind::Freeze, 10)),
                Move::status("Dragon Dance", Dragon, raise(BoostStat::Attack, 1)),
            ],
        )
        .with_tera_type(Ground),
    ]
}
