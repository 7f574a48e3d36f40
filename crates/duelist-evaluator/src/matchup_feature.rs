//! Matchup features: scoring the active unit against the opposing active unit.
//!
//! Each feature maps a [`Matchup`] to a signed score, where positive values favour the acting
//! side. Features are pure: they read the matchup and never mutate shared state.
//!
//! # Features
//!
//! Five features are combined by the [`ContextualScorer`](crate::contextual_scorer::ContextualScorer),
//! in the order the weights of a [`WeightVector`](crate::weights::WeightVector) are laid out:
//!
//! - [`StatsBalance`] - Boost stage advantage, plus the opponent's relevant defensive stage
//! - [`TypingAdvantage`] - Best type multiplier dealt minus best type multiplier received
//! - [`HpDifferential`] - Remaining HP fraction difference
//! - [`StatusCondition`] - Penalty for own status, reward for the opponent's
//! - [`WeatherCondition`] - Who the active weather favours
//!
//! [`speed_order`] is not weighted: it adds a flat bonus to the contextual score when the
//! acting unit moves first. [`moves_advantage`] is only used to rank switch targets.
//!
//! # Type Rules
//!
//! [`typing_advantage`] and [`moves_advantage`] use the declared types of both units. Weather
//! checks for "is a Fire unit" and similar are tera-aware ([`Unit::has_type`]): a terastallized
//! unit counts only as its tera type.

use std::fmt;

use duelist_engine::{BattleSnapshot, BoostStat, FieldState, Status, Type, Unit, Weather};

/// Everything a feature looks at: the acting unit, the opposing unit, the field and the turn.
#[derive(Debug, Clone, Copy)]
pub struct Matchup<'a> {
    pub unit: &'a Unit,
    pub opponent: &'a Unit,
    pub field: &'a FieldState,
    pub turn: u32,
}

impl<'a> Matchup<'a> {
    /// Builds the matchup of the snapshot's active unit, or `None` if the active slot does not
    /// resolve.
    #[must_use]
    pub fn from_snapshot(snapshot: &'a BattleSnapshot, turn: u32) -> Option<Self> {
        Some(Self {
            unit: snapshot.team.get(snapshot.active.0)?,
            opponent: &snapshot.opponent,
            field: &snapshot.field,
            turn,
        })
    }

    /// The same matchup seen from the opponent's side.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            unit: self.opponent,
            opponent: self.unit,
            ..self
        }
    }
}

pub trait MatchupFeature: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &'static str;
    #[must_use]
    fn name(&self) -> &'static str;
    #[must_use]
    fn evaluate(&self, matchup: &Matchup<'_>) -> f32;
}

/// All weighted features, in weight order.
pub const ALL_MATCHUP_FEATURES: [&dyn MatchupFeature; 5] = [
    &StatsBalance,
    &TypingAdvantage,
    &HpDifferential,
    &StatusCondition,
    &WeatherCondition,
];

/// Boost stage advantage.
///
/// # Score
///
/// - `Σ(my_stage − opp_stage)` over every [`BoostStat`]
/// - `+ opp_special_defense_stage` if the unit's current attack ≥ current special attack
/// - `+ opp_defense_stage` if the unit's current special attack ≥ current attack
///
/// Both bonuses apply when attack equals special attack.
#[derive(Debug, Clone, Copy)]
pub struct StatsBalance;

impl MatchupFeature for StatsBalance {
    fn id(&self) -> &'static str {
        "stats_balance"
    }
    fn name(&self) -> &'static str {
        "Stats Balance"
    }
    fn evaluate(&self, matchup: &Matchup<'_>) -> f32 {
        stats_balance(matchup.unit, matchup.opponent)
    }
}

/// Type matchup advantage.
///
/// # Score
///
/// - `my_best = max` over the unit's types of the multiplier against the opponent's types
/// - `opp_best` mirrors it
/// - `score = my_best − opp_best`
///
/// A unit without types makes the matchup malformed; the feature then scores 0.
#[derive(Debug, Clone, Copy)]
pub struct TypingAdvantage;

impl MatchupFeature for TypingAdvantage {
    fn id(&self) -> &'static str {
        "typing_advantage"
    }
    fn name(&self) -> &'static str {
        "Typing Advantage"
    }
    fn evaluate(&self, matchup: &Matchup<'_>) -> f32 {
        typing_advantage(matchup.unit, matchup.opponent)
    }
}

/// `unit.hp − opponent.hp`, in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy)]
pub struct HpDifferential;

impl MatchupFeature for HpDifferential {
    fn id(&self) -> &'static str {
        "hp_differential"
    }
    fn name(&self) -> &'static str {
        "HP Differential"
    }
    fn evaluate(&self, matchup: &Matchup<'_>) -> f32 {
        hp_differential(matchup.unit, matchup.opponent)
    }
}

/// Status ailments of both sides.
///
/// # Score
///
/// | status     | own unit                          | opponent                          |
/// |------------|-----------------------------------|-----------------------------------|
/// | burn       | −1, −1 more if atk > spa (current)| +1, +1 more if atk > spa (base)   |
/// | poison     | 0                                 | +1, +1 more if atk > spa (base)   |
/// | toxic      | −turns                            | +turns                            |
/// | paralysis  | −1.5                              | +1.5                              |
/// | sleep      | −1.5 · (1 / turns + 1)            | +1.5 · (1 / turns + 1)            |
/// | freeze     | 0                                 | 0                                 |
///
/// A sleep counter of 0 counts as 1.
#[derive(Debug, Clone, Copy)]
pub struct StatusCondition;

impl MatchupFeature for StatusCondition {
    fn id(&self) -> &'static str {
        "status_condition"
    }
    fn name(&self) -> &'static str {
        "Status Condition"
    }
    fn evaluate(&self, matchup: &Matchup<'_>) -> f32 {
        status_condition(matchup.unit, matchup.opponent)
    }
}

/// Weather advantage, summed over every active weather.
///
/// # Score
///
/// For the weather's boosted type `B` (sun: Fire, rain: Water, sandstorm: Rock, hail and
/// snow: Ice):
///
/// - unit is `B`: +1, +0.5 more if `B` is super effective against the opponent
/// - otherwise, opponent is `B`: −1, −0.5 more if `B` is super effective against the unit
///
/// Sun and rain also weaken a type `W` (sun: Water, rain: Fire):
///
/// - unit is `W`: −0.5
/// - otherwise, opponent is `W`: +0.5
#[derive(Debug, Clone, Copy)]
pub struct WeatherCondition;

impl MatchupFeature for WeatherCondition {
    fn id(&self) -> &'static str {
        "weather_condition"
    }
    fn name(&self) -> &'static str {
        "Weather Condition"
    }
    fn evaluate(&self, matchup: &Matchup<'_>) -> f32 {
        weather_condition(matchup.unit, matchup.opponent, matchup.field)
    }
}

/// Returns `true` if `unit` acts before `opponent` at `turn`.
///
/// Compares base speed (`≥`). While trick room is within its scoring window
/// (`applied_turn + 3 > turn`), the comparison is reversed (`≤`).
#[must_use]
pub fn speed_order(unit: &Unit, opponent: &Unit, field: &FieldState, turn: u32) -> bool {
    let mine = unit.base_stats().speed;
    let theirs = opponent.base_stats().speed;
    if field.is_trick_room_active(turn) {
        mine <= theirs
    } else {
        mine >= theirs
    }
}

#[must_use]
pub fn stats_balance(unit: &Unit, opponent: &Unit) -> f32 {
    let mine = unit.boosts();
    let theirs = opponent.boosts();
    let mut balance: i32 = mine
        .iter()
        .map(|(stat, stage)| i32::from(stage) - i32::from(theirs.get(stat)))
        .sum();
    if unit.stats().is_physical() {
        balance += i32::from(theirs.get(BoostStat::SpecialDefense));
    }
    if unit.stats().is_special() {
        balance += i32::from(theirs.get(BoostStat::Defense));
    }
    #[expect(clippy::cast_precision_loss)]
    let balance = balance as f32;
    balance
}

fn best_multiplier(attacking: &[Type], defending: &[Type]) -> Option<f32> {
    attacking
        .iter()
        .map(|ty| ty.multiplier_against(defending))
        .reduce(f32::max)
}

#[must_use]
pub fn typing_advantage(unit: &Unit, opponent: &Unit) -> f32 {
    let (mine, theirs) = (unit.types(), opponent.types());
    let (Some(my_best), Some(opp_best)) =
        (best_multiplier(mine, theirs), best_multiplier(theirs, mine))
    else {
        tracing::warn!(
            unit = unit.species(),
            opponent = opponent.species(),
            "untyped unit in matchup, typing advantage ignored"
        );
        return 0.0;
    };
    my_best - opp_best
}

#[must_use]
pub fn hp_differential(unit: &Unit, opponent: &Unit) -> f32 {
    unit.hp_fraction() - opponent.hp_fraction()
}

fn sleep_penalty(turns: u8) -> f32 {
    1.5 * (1.0 / f32::from(turns.max(1)) + 1.0)
}

#[must_use]
pub fn status_condition(unit: &Unit, opponent: &Unit) -> f32 {
    let mut score = 0.0;

    match unit.status() {
        Some(Status::Burn) => {
            score -= 1.0;
            if unit.stats().attack > unit.stats().special_attack {
                score -= 1.0;
            }
        }
        Some(Status::Toxic { turns }) => score -= f32::from(turns),
        Some(Status::Paralysis) => score -= 1.5,
        Some(Status::Sleep { turns }) => score -= sleep_penalty(turns),
        // own poison is not penalised
        Some(Status::Poison | Status::Freeze) | None => {}
    }

    match opponent.status() {
        Some(Status::Burn | Status::Poison) => {
            score += 1.0;
            let base = opponent.base_stats();
            if base.attack > base.special_attack {
                score += 1.0;
            }
        }
        Some(Status::Toxic { turns }) => score += f32::from(turns),
        Some(Status::Paralysis) => score += 1.5,
        Some(Status::Sleep { turns }) => score += sleep_penalty(turns),
        Some(Status::Freeze) | None => {}
    }

    score
}

/// Type a weather powers up, and the type it weakens (if any).
fn weather_types(weather: Weather) -> (Type, Option<Type>) {
    match weather {
        Weather::Sun => (Type::Fire, Some(Type::Water)),
        Weather::Rain => (Type::Water, Some(Type::Fire)),
        Weather::Sandstorm => (Type::Rock, None),
        Weather::Hail | Weather::Snow => (Type::Ice, None),
    }
}

#[must_use]
pub fn weather_condition(unit: &Unit, opponent: &Unit, field: &FieldState) -> f32 {
    let mut score = 0.0;
    for weather in field.weather() {
        let (boosted, weakened) = weather_types(weather);

        if unit.has_type(boosted) {
            score += 1.0;
            if boosted.is_super_effective_against(opponent.types()) {
                score += 0.5;
            }
        } else if opponent.has_type(boosted) {
            score -= 1.0;
            if boosted.is_super_effective_against(unit.types()) {
                score -= 0.5;
            }
        }

        if let Some(weakened) = weakened {
            if unit.has_type(weakened) {
                score -= 0.5;
            } else if opponent.has_type(weakened) {
                score += 0.5;
            }
        }
    }
    score
}

/// Offensive potential of `unit`'s whole moveset against `opponent`.
///
/// `Σ base_power / 100 × multiplier(move_type, opponent types)`
#[must_use]
pub fn moves_advantage(unit: &Unit, opponent: &Unit) -> f32 {
    unit.moves()
        .iter()
        .map(|mv| f32::from(mv.base_power()) / 100.0 * mv.move_type().multiplier_against(opponent.types()))
        .sum()
}

#[cfg(test)]
mod tests {
    use duelist_engine::{Boosts, FieldCondition, Move, MoveCategory, StatTable};
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    fn unit(types: &[Type]) -> Unit {
        Unit::new("Test", types, StatTable::new(80, 80, 80, 80, 80, 80))
    }

    fn unit_with_speed(speed: u16) -> Unit {
        Unit::new("Test", &[Type::Normal], StatTable::new(80, 80, 80, 80, 80, speed))
    }

    #[test]
    fn test_speed_order() {
        let fast = unit_with_speed(100);
        let slow = unit_with_speed(80);
        let field = FieldState::default();
        assert!(speed_order(&fast, &slow, &field, 1));
        assert!(!speed_order(&slow, &fast, &field, 1));
        assert!(speed_order(&fast, &fast, &field, 1));

        let trick_room = FieldState::default().with_condition(FieldCondition::TrickRoom, 5);
        assert!(speed_order(&slow, &fast, &trick_room, 7));
        assert!(!speed_order(&fast, &slow, &trick_room, 7));
        assert!(speed_order(&fast, &slow, &trick_room, 8));
    }

    #[test]
    fn test_stats_balance_orientation_bonus() {
        let physical = Unit::new("P", &[Type::Normal], StatTable::new(80, 120, 80, 60, 80, 80));
        let special = Unit::new("S", &[Type::Normal], StatTable::new(80, 60, 80, 120, 80, 80));
        let mixed = unit(&[Type::Normal]);
        let target = unit(&[Type::Normal]).with_boosts(
            Boosts::default()
                .with(BoostStat::Defense, 2)
                .with(BoostStat::SpecialDefense, 1),
        );
        // base term is −3 in every case
        assert_eq!(stats_balance(&physical, &target), -3.0 + 1.0);
        assert_eq!(stats_balance(&special, &target), -3.0 + 2.0);
        assert_eq!(stats_balance(&mixed, &target), -3.0 + 1.0 + 2.0);
    }

    #[test]
    fn test_stats_balance_base_term_is_antisymmetric() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let mut boosts = || {
                let mut boosts = Boosts::default();
                for stat in BoostStat::ALL {
                    boosts.set(stat, rng.random_range(-6..=6));
                }
                // zero the stages the orientation bonuses read
                boosts.with(BoostStat::Defense, 0).with(BoostStat::SpecialDefense, 0)
            };
            let a = unit(&[Type::Normal]).with_boosts(boosts());
            let b = unit(&[Type::Normal]).with_boosts(boosts());
            assert_eq!(stats_balance(&a, &b), -stats_balance(&b, &a));
        }
    }

    #[test]
    fn test_typing_advantage_is_antisymmetric() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let mut types = || {
                let first = Type::ALL[rng.random_range(0..Type::LEN)];
                if rng.random_bool(0.5) {
                    vec![first, Type::ALL[rng.random_range(0..Type::LEN)]]
                } else {
                    vec![first]
                }
            };
            let a = unit(&types());
            let b = unit(&types());
            let ab = typing_advantage(&a, &b);
            let ba = typing_advantage(&b, &a);
            assert_eq!(ab, -ba);
            if ab != 0.0 {
                assert_eq!(ab > 0.0, ba < 0.0);
            }
        }
    }

    #[test]
    fn test_typing_advantage_values() {
        let water = unit(&[Type::Water]);
        let fire = unit(&[Type::Fire]);
        assert_eq!(typing_advantage(&water, &fire), 2.0 - 0.5);
        assert_eq!(typing_advantage(&fire, &water), 0.5 - 2.0);

        let ghost = unit(&[Type::Ghost]);
        let normal = unit(&[Type::Normal]);
        assert_eq!(typing_advantage(&ghost, &normal), 0.0);
    }

    #[test]
    fn test_typing_advantage_untyped_is_zero() {
        let untyped = unit(&[]);
        let fire = unit(&[Type::Fire]);
        assert_eq!(typing_advantage(&untyped, &fire), 0.0);
        assert_eq!(typing_advantage(&fire, &untyped), 0.0);
    }

    #[test]
    fn test_hp_differential() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let a = unit(&[Type::Normal]).with_hp_fraction(rng.random_range(0.0..=1.0));
            let b = unit(&[Type::Normal]).with_hp_fraction(rng.random_range(0.0..=1.0));
            let diff = hp_differential(&a, &b);
            assert!((-1.0..=1.0).contains(&diff));
            assert_eq!(diff, -hp_differential(&b, &a));
        }
    }

    #[test]
    fn test_status_condition_own_side() {
        let physical = Unit::new("P", &[Type::Normal], StatTable::new(80, 120, 80, 60, 80, 80));
        let healthy = unit(&[Type::Normal]);

        let burned = physical.clone().with_status(Status::Burn);
        assert_eq!(status_condition(&burned, &healthy), -2.0);
        let poisoned = physical.clone().with_status(Status::Poison);
        assert_eq!(status_condition(&poisoned, &healthy), 0.0);
        let toxic = physical.clone().with_status(Status::Toxic { turns: 3 });
        assert_eq!(status_condition(&toxic, &healthy), -3.0);
        let paralyzed = physical.clone().with_status(Status::Paralysis);
        assert_eq!(status_condition(&paralyzed, &healthy), -1.5);
        let asleep = physical.clone().with_status(Status::Sleep { turns: 2 });
        assert_eq!(status_condition(&asleep, &healthy), -1.5 * 1.5);
        let frozen = physical.with_status(Status::Freeze);
        assert_eq!(status_condition(&frozen, &healthy), 0.0);
    }

    #[test]
    fn test_status_condition_sleep() {
        let healthy = unit(&[Type::Normal]);
        let asleep = |turns| unit(&[Type::Normal]).with_status(Status::Sleep { turns });
        assert_eq!(status_condition(&asleep(1), &healthy), -3.0);
        assert_eq!(status_condition(&asleep(0), &healthy), -3.0);
        assert_eq!(status_condition(&healthy, &asleep(1)), 3.0);
        assert_eq!(status_condition(&asleep(2), &healthy), -2.25);
    }

    #[test]
    fn test_status_condition_opponent_uses_base_stats() {
        let healthy = unit(&[Type::Normal]);
        // physical by base stats, special by current stats
        let opponent = Unit::new("O", &[Type::Normal], StatTable::new(80, 120, 80, 60, 80, 80))
            .with_stats(StatTable::new(150, 50, 80, 150, 80, 80));

        assert_eq!(status_condition(&healthy, &opponent.clone().with_status(Status::Burn)), 2.0);
        assert_eq!(status_condition(&healthy, &opponent.clone().with_status(Status::Poison)), 2.0);
        assert_eq!(
            status_condition(&healthy, &opponent.clone().with_status(Status::Toxic { turns: 2 })),
            2.0
        );
        assert_eq!(status_condition(&healthy, &opponent.with_status(Status::Paralysis)), 1.5);
    }

    #[test]
    fn test_sleep_counter_zero_counts_as_one() {
        let healthy = unit(&[Type::Normal]);
        let asleep = unit(&[Type::Normal]).with_status(Status::Sleep { turns: 0 });
        assert_eq!(status_condition(&asleep, &healthy), -3.0);
        assert_eq!(status_condition(&healthy, &asleep), 3.0);
    }

    #[test]
    fn test_weather_water_in_rain() {
        let rain = FieldState::default().with_weather(Weather::Rain, 1);
        let water = unit(&[Type::Water]);

        let fire = unit(&[Type::Fire]);
        assert_eq!(weather_condition(&water, &fire, &rain), 1.0 + 0.5 + 0.5);

        let normal = unit(&[Type::Normal]);
        assert_eq!(weather_condition(&water, &normal, &rain), 1.0);

        let ground = unit(&[Type::Ground]);
        assert_eq!(weather_condition(&water, &ground, &rain), 1.5);
        assert_eq!(weather_condition(&ground, &water, &rain), -1.5);
    }

    #[test]
    fn test_weather_sun_and_sand() {
        let sun = FieldState::default().with_weather(Weather::Sun, 1);
        let fire = unit(&[Type::Fire]);
        let water = unit(&[Type::Water]);
        let grass = unit(&[Type::Grass]);
        assert_eq!(weather_condition(&fire, &grass, &sun), 1.5);
        assert_eq!(weather_condition(&water, &grass, &sun), -0.5);
        assert_eq!(weather_condition(&grass, &water, &sun), 0.5);

        let sand = FieldState::default().with_weather(Weather::Sandstorm, 1);
        let rock = unit(&[Type::Rock]);
        let flying = unit(&[Type::Flying]);
        assert_eq!(weather_condition(&flying, &rock, &sand), -1.5);
        assert_eq!(weather_condition(&fire, &water, &FieldState::default()), 0.0);
    }

    #[test]
    fn test_weather_is_tera_aware() {
        let hail = FieldState::default().with_weather(Weather::Hail, 1);
        let tera_ice = unit(&[Type::Water]).terastallized(Type::Ice);
        let dragon = unit(&[Type::Dragon]);
        assert_eq!(weather_condition(&tera_ice, &dragon, &hail), 1.5);
        let ice = unit(&[Type::Ice]);
        let tera_water = ice.clone().terastallized(Type::Water);
        assert_eq!(weather_condition(&tera_water, &dragon, &hail), 0.0);
        assert_eq!(weather_condition(&dragon, &ice, &hail), -1.5);
    }

    #[test]
    fn test_moves_advantage() {
        let attacker = unit(&[Type::Water]).with_moves([
            Move::new("Surf", Type::Water, MoveCategory::Special, 90),
            Move::new("Tackle", Type::Normal, MoveCategory::Physical, 40),
        ]);
        let fire = unit(&[Type::Fire]);
        let expected = 0.9 * 2.0 + 0.4;
        assert!((moves_advantage(&attacker, &fire) - expected).abs() < 1e-6);
        assert_eq!(moves_advantage(&unit(&[Type::Water]), &fire), 0.0);
    }

    #[test]
    fn test_features_in_weight_order() {
        let ids = ALL_MATCHUP_FEATURES.map(|f| f.id());
        assert_eq!(
            ids,
            [
                "stats_balance",
                "typing_advantage",
                "hp_differential",
                "status_condition",
                "weather_condition",
            ]
        );
    }
}
