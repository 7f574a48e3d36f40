use std::cmp::Ordering;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    EmptyTeamError,
    core::{
        BoostStat, EffectTarget, FieldCondition, FieldState, Move, MoveCategory, MoveEffect,
        SLEEP_DURATION, Status, Type, Unit, Weather,
    },
};

use super::{
    action::{Action, Decision, MoveSlot, TeamSlot},
    player::{Player, PlayerOutcome},
    snapshot::BattleSnapshot,
};

/// Same-type attack bonus.
const STAB_MULTIPLIER: f32 = 1.5;
const BURN_ATTACK_MULTIPLIER: f32 = 0.5;
const PARALYSIS_SPEED_MULTIPLIER: f32 = 0.5;
const PARALYSIS_SKIP_CHANCE: f64 = 0.25;
const FREEZE_THAW_CHANCE: f64 = 0.2;
const MIN_DAMAGE_ROLL: f32 = 0.85;

/// One of the two sides of a battle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum SideId {
    #[display("side 1")]
    One,
    #[display("side 2")]
    Two,
}

impl SideId {
    pub const ALL: [SideId; 2] = [SideId::One, SideId::Two];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            SideId::One => 0,
            SideId::Two => 1,
        }
    }

    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            SideId::One => SideId::Two,
            SideId::Two => SideId::One,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Winner(SideId),
    Draw,
}

impl BattleOutcome {
    /// Returns the outcome as seen by `side`.
    #[must_use]
    pub fn for_side(self, side: SideId) -> PlayerOutcome {
        match self {
            BattleOutcome::Winner(winner) if winner == side => PlayerOutcome::Won,
            BattleOutcome::Winner(_) => PlayerOutcome::Lost,
            BattleOutcome::Draw => PlayerOutcome::Drew,
        }
    }
}

/// Seed for deterministic battles.
///
/// Every random roll of a battle (damage rolls, secondary effect chances, speed ties, the
/// random fallback) is drawn from a generator initialized with this seed, so two battles
/// with the same teams, players and seed play out identically.
///
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use duelist_engine::BattleSeed;
/// use rand::Rng as _;
///
/// let random: BattleSeed = rand::rng().random();
/// let fixed = BattleSeed::from(42);
/// assert_eq!(fixed, BattleSeed::from(42));
/// # let _ = random;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BattleSeed([u8; 16]);

impl From<u64> for BattleSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl Serialize for BattleSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        serializer.serialize_str(&format!("{num:032x}"))
    }
}

impl<'de> Deserialize<'de> for BattleSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Distribution<BattleSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BattleSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BattleSeed(seed)
    }
}

#[derive(Debug, Clone)]
struct Side {
    team: Vec<Unit>,
    active: usize,
    tera_used: bool,
}

impl Side {
    fn new(team: Vec<Unit>) -> Result<Self, EmptyTeamError> {
        if team.is_empty() {
            return Err(EmptyTeamError);
        }
        let active = team.iter().position(|u| !u.is_fainted()).unwrap_or(0);
        Ok(Self {
            team,
            active,
            tera_used: false,
        })
    }

    fn active_unit(&self) -> &Unit {
        &self.team[self.active]
    }

    fn active_unit_mut(&mut self) -> &mut Unit {
        &mut self.team[self.active]
    }

    fn is_defeated(&self) -> bool {
        self.team.iter().all(Unit::is_fainted)
    }

    fn legal_moves(&self) -> Vec<MoveSlot> {
        let active = self.active_unit();
        if active.is_fainted() {
            return vec![];
        }
        (0..active.moves().len()).map(MoveSlot).collect()
    }

    fn legal_switches(&self) -> Vec<TeamSlot> {
        self.team
            .iter()
            .enumerate()
            .filter(|(i, unit)| *i != self.active && !unit.is_fainted())
            .map(|(i, _)| TeamSlot(i))
            .collect()
    }

    fn can_terastallize(&self) -> bool {
        let active = self.active_unit();
        !self.tera_used && !active.is_fainted() && !active.is_terastallized() && active.tera_type().is_some()
    }

    fn terastallize(&mut self) -> bool {
        if !self.can_terastallize() {
            return false;
        }
        self.tera_used = self.active_unit_mut().terastallize();
        self.tera_used
    }

    fn switch_to(&mut self, slot: TeamSlot) {
        self.active_unit_mut().switch_out();
        self.active = slot.0;
    }
}

/// A two-sided single battle between teams of [`Unit`]s.
///
/// Each turn both players pick an action from their snapshot. Switches resolve first, then
/// terastallization, then attacks in speed order (reversed under trick room). End-of-turn
/// chip damage follows, and fainted active units are replaced by asking their player again
/// with no legal moves. Each side may terastallize once per battle.
///
/// # Example
///
/// ```
/// use duelist_engine::{Battle, BattleSeed, BattleSnapshot, Decision, Player, default_roster};
///
/// struct Randomly;
///
/// impl Player for Randomly {
///     fn choose_action(&mut self, _snapshot: &BattleSnapshot) -> Decision {
///         Decision::Random
///     }
/// }
///
/// let roster = default_roster();
/// let team1 = roster[..3].iter().map(|s| s.to_unit()).collect();
/// let team2 = roster[3..6].iter().map(|s| s.to_unit()).collect();
/// let mut battle = Battle::new(team1, team2, BattleSeed::from(7)).unwrap();
/// let outcome = battle.run(&mut Randomly, &mut Randomly, 200);
/// println!("{outcome:?} after {} turns", battle.turn());
/// ```
#[derive(Debug, Clone)]
pub struct Battle {
    sides: [Side; 2],
    field: FieldState,
    turn: u32,
    rng: Pcg32,
}

impl Battle {
    pub fn new(team1: Vec<Unit>, team2: Vec<Unit>, seed: BattleSeed) -> Result<Self, EmptyTeamError> {
        Ok(Self {
            sides: [Side::new(team1)?, Side::new(team2)?],
            field: FieldState::default(),
            turn: 0,
            rng: Pcg32::from_seed(seed.0),
        })
    }

    /// Number of turns played so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn field(&self) -> &FieldState {
        &self.field
    }

    #[must_use]
    pub fn team(&self, side: SideId) -> &[Unit] {
        &self.side(side).team
    }

    #[must_use]
    pub fn active_unit(&self, side: SideId) -> &Unit {
        self.side(side).active_unit()
    }

    /// Returns the result if one side has no units left.
    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        match (self.sides[0].is_defeated(), self.sides[1].is_defeated()) {
            (true, true) => Some(BattleOutcome::Draw),
            (true, false) => Some(BattleOutcome::Winner(SideId::Two)),
            (false, true) => Some(BattleOutcome::Winner(SideId::One)),
            (false, false) => None,
        }
    }

    /// Builds the view `side` decides from.
    #[must_use]
    pub fn snapshot(&self, side: SideId) -> BattleSnapshot {
        let own = self.side(side);
        BattleSnapshot {
            turn: self.turn,
            team: own.team.clone(),
            active: TeamSlot(own.active),
            opponent: self.side(side.other()).active_unit().clone(),
            legal_moves: own.legal_moves(),
            legal_switches: own.legal_switches(),
            field: self.field.clone(),
            can_terastallize: own.can_terastallize(),
        }
    }

    /// Plays until one side is defeated or `turn_limit` turns have been played.
    ///
    /// Reaching the turn limit is a draw.
    pub fn run(&mut self, player1: &mut dyn Player, player2: &mut dyn Player, turn_limit: u32) -> BattleOutcome {
        player1.start_battle();
        player2.start_battle();

        let outcome = loop {
            if let Some(outcome) = self.outcome() {
                break outcome;
            }
            if self.turn >= turn_limit {
                tracing::debug!(turn = self.turn, "turn limit reached");
                break BattleOutcome::Draw;
            }
            self.play_turn(player1, player2);
        };

        player1.finish_battle(outcome.for_side(SideId::One));
        player2.finish_battle(outcome.for_side(SideId::Two));
        outcome
    }

    /// Plays a single turn, including the replacement of fainted units.
    pub fn play_turn<'a>(&mut self, player1: &'a mut dyn Player, player2: &'a mut dyn Player) {
        self.turn += 1;

        let action1 = self.ask(SideId::One, player1);
        let action2 = self.ask(SideId::Two, player2);
        let actions = [(SideId::One, action1), (SideId::Two, action2)];

        for (side, action) in actions {
            if let Some(Action::Switch(slot)) = action {
                tracing::debug!(turn = self.turn, %side, slot = slot.0, "switch");
                self.side_mut(side).switch_to(slot);
            }
        }

        for (side, action) in actions {
            if matches!(action, Some(Action::Terastallize(_))) && self.side_mut(side).terastallize() {
                let unit = self.active_unit(side);
                tracing::debug!(
                    turn = self.turn,
                    %side,
                    species = unit.species(),
                    tera_type = ?unit.tera_type(),
                    "terastallize"
                );
            }
        }

        let mut attackers = actions
            .into_iter()
            .filter_map(|(side, action)| Some((side, action?.move_slot()?)))
            .collect::<Vec<_>>();
        if let [(first, _), (second, _)] = attackers[..] {
            if self.moves_before(second, first) {
                attackers.swap(0, 1);
            }
        }
        for (side, slot) in attackers {
            self.attack(side, slot);
        }

        self.end_of_turn();

        for (side, player) in [(SideId::One, &mut *player1), (SideId::Two, &mut *player2)] {
            let own = self.side(side);
            if own.active_unit().is_fainted() && !own.is_defeated() {
                if let Some(Action::Switch(slot)) = self.ask(side, player) {
                    self.side_mut(side).switch_to(slot);
                }
            }
        }
    }

    fn side(&self, side: SideId) -> &Side {
        &self.sides[side.index()]
    }

    fn side_mut(&mut self, side: SideId) -> &mut Side {
        &mut self.sides[side.index()]
    }

    /// Asks `player` for its action and resolves it against the legal sets.
    fn ask(&mut self, side: SideId, player: &mut dyn Player) -> Option<Action> {
        let snapshot = self.snapshot(side);
        match player.choose_action(&snapshot) {
            Decision::Act(action) if snapshot.is_legal(action) => Some(action),
            Decision::Act(action) => {
                tracing::warn!(turn = self.turn, %side, ?action, "illegal action, falling back to random");
                self.random_action(&snapshot)
            }
            Decision::Random => self.random_action(&snapshot),
        }
    }

    fn random_action(&mut self, snapshot: &BattleSnapshot) -> Option<Action> {
        let actions = snapshot.legal_actions().collect::<Vec<_>>();
        actions.choose(&mut self.rng).copied()
    }

    fn effective_speed(&self, side: SideId) -> f32 {
        let unit = self.active_unit(side);
        let mut speed = f32::from(unit.stats().speed) * unit.boosts().multiplier(BoostStat::Speed);
        if unit.status() == Some(Status::Paralysis) {
            speed *= PARALYSIS_SPEED_MULTIPLIER;
        }
        speed
    }

    /// Returns `true` if `side` attacks before `other` this turn.
    fn moves_before(&mut self, side: SideId, other: SideId) -> bool {
        let ord = self
            .effective_speed(side)
            .partial_cmp(&self.effective_speed(other))
            .unwrap_or(Ordering::Equal);
        let trick_room = self
            .field
            .condition_applied_turn(FieldCondition::TrickRoom)
            .is_some();
        match (ord, trick_room) {
            (Ordering::Equal, _) => self.rng.random_bool(0.5),
            (Ordering::Greater, false) | (Ordering::Less, true) => true,
            (Ordering::Less, false) | (Ordering::Greater, true) => false,
        }
    }

    /// Rolls status checks that may prevent the active unit of `side` from acting.
    fn can_act(&mut self, side: SideId) -> bool {
        let status = self.active_unit(side).status();
        match status {
            Some(Status::Sleep { turns }) if turns >= SLEEP_DURATION => {
                self.side_mut(side).active_unit_mut().set_status(None);
                true
            }
            Some(Status::Sleep { turns }) => {
                let unit = self.side_mut(side).active_unit_mut();
                unit.set_status(Some(Status::Sleep { turns: turns + 1 }));
                false
            }
            Some(Status::Freeze) => {
                let thawed = self.rng.random_bool(FREEZE_THAW_CHANCE);
                if thawed {
                    self.side_mut(side).active_unit_mut().set_status(None);
                }
                thawed
            }
            Some(Status::Paralysis) => !self.rng.random_bool(PARALYSIS_SKIP_CHANCE),
            _ => true,
        }
    }

    fn attack(&mut self, side: SideId, slot: MoveSlot) {
        if self.active_unit(side).is_fainted() || !self.can_act(side) {
            return;
        }
        let Some(mv) = self.active_unit(side).moves().get(slot.0).cloned() else {
            return;
        };
        let turn = self.turn;
        let roll = self.rng.random_range(MIN_DAMAGE_ROLL..=1.0);
        let effect_roll = self.rng.random_range(0..100);

        let [side1, side2] = &mut self.sides;
        let (attacker, defender) = match side {
            SideId::One => (side1.active_unit_mut(), side2.active_unit_mut()),
            SideId::Two => (side2.active_unit_mut(), side1.active_unit_mut()),
        };

        if mv.category() != MoveCategory::Status {
            if defender.is_fainted() {
                return;
            }
            let fraction = damage_fraction(attacker, defender, &mv, &self.field, roll);
            if fraction <= 0.0 {
                tracing::debug!(turn, %side, move_name = mv.name(), "no effect");
                return;
            }
            let lost = defender.take_damage(fraction);
            tracing::debug!(turn, %side, move_name = mv.name(), lost, "attack");
        }

        let Some(effect) = mv.effect() else {
            return;
        };
        match *effect {
            MoveEffect::Boost {
                target: EffectTarget::User,
                stat,
                stages,
            } => {
                attacker.boosts_mut().apply(stat, stages);
            }
            MoveEffect::Boost {
                target: EffectTarget::Target,
                stat,
                stages,
            } => {
                if !defender.is_fainted() {
                    defender.boosts_mut().apply(stat, stages);
                }
            }
            MoveEffect::Inflict { status, chance } => {
                if !defender.is_fainted() && defender.status().is_none() && effect_roll < chance {
                    defender.set_status(Some(status.inflict()));
                }
            }
            MoveEffect::SetWeather { weather } => self.field.set_weather(weather, turn),
            MoveEffect::SetField { condition } => {
                if condition == FieldCondition::TrickRoom
                    && self.field.remove_condition(condition).is_some()
                {
                    return;
                }
                self.field.set_condition(condition, turn);
            }
        }
    }

    fn end_of_turn(&mut self) {
        let weather = self.field.weather().collect::<Vec<_>>();
        for side in &mut self.sides {
            let unit = side.active_unit_mut();
            if unit.is_fainted() {
                continue;
            }
            let mut chip = match unit.status() {
                Some(Status::Burn) => 1.0 / 16.0,
                Some(Status::Poison) => 1.0 / 8.0,
                Some(Status::Toxic { turns }) => {
                    let turns = turns.saturating_add(1);
                    unit.set_status(Some(Status::Toxic { turns }));
                    f32::from(turns) / 16.0
                }
                _ => 0.0,
            };
            for weather in &weather {
                let immune: &[Type] = match weather {
                    Weather::Sandstorm => &[Type::Rock, Type::Ground, Type::Steel],
                    Weather::Hail => &[Type::Ice],
                    Weather::Sun | Weather::Rain | Weather::Snow => continue,
                };
                if !immune.iter().any(|ty| unit.has_type(*ty)) {
                    chip += 1.0 / 16.0;
                }
            }
            if chip > 0.0 {
                unit.take_damage(chip);
            }
        }
        if let Some(weather) = self.field.expire(self.turn + 1) {
            tracing::debug!(turn = self.turn, %weather, "weather ended");
        }
    }
}

/// Damage `mv` deals as a fraction of the defender's max HP.
///
/// ```text
/// ((22 · power · A / D) / 50 + 2) · STAB · effectiveness · roll · burn · weather
/// ```
///
/// `A` and `D` are the attacking and defending stats of the move's category with their
/// boost multipliers applied. Status moves deal no damage.
#[must_use]
pub fn damage_fraction(attacker: &Unit, defender: &Unit, mv: &Move, field: &FieldState, roll: f32) -> f32 {
    let (attack, defense) = match mv.category() {
        MoveCategory::Physical => (
            f32::from(attacker.stats().attack) * attacker.boosts().multiplier(BoostStat::Attack),
            f32::from(defender.stats().defense) * defender.boosts().multiplier(BoostStat::Defense),
        ),
        MoveCategory::Special => (
            f32::from(attacker.stats().special_attack)
                * attacker.boosts().multiplier(BoostStat::SpecialAttack),
            f32::from(defender.stats().special_defense)
                * defender.boosts().multiplier(BoostStat::SpecialDefense),
        ),
        MoveCategory::Status => return 0.0,
    };
    if defense <= 0.0 || defender.stats().hp == 0 {
        return 0.0;
    }

    let power = f32::from(mv.base_power());
    let mut damage = (22.0 * power * attack / defense) / 50.0 + 2.0;
    if attacker.has_type(mv.move_type()) {
        damage *= STAB_MULTIPLIER;
    }
    damage *= mv.move_type().multiplier_against(defender.defensive_types());
    damage *= roll;
    if mv.category() == MoveCategory::Physical && attacker.status() == Some(Status::Burn) {
        damage *= BURN_ATTACK_MULTIPLIER;
    }
    damage *= weather_multiplier(field, mv.move_type());
    damage / f32::from(defender.stats().hp)
}

fn weather_multiplier(field: &FieldState, move_type: Type) -> f32 {
    let mut multiplier = 1.0;
    for weather in field.weather() {
        multiplier *= match (weather, move_type) {
            (Weather::Sun, Type::Fire) | (Weather::Rain, Type::Water) => 1.5,
            (Weather::Sun, Type::Water) | (Weather::Rain, Type::Fire) => 0.5,
            _ => 1.0,
        };
    }
    multiplier
}

#[cfg(test)]
mod tests {
    use crate::{StatTable, StatusKind};

    use super::*;

    struct Scripted(Vec<Decision>);

    impl Player for Scripted {
        fn choose_action(&mut self, _snapshot: &BattleSnapshot) -> Decision {
            if self.0.is_empty() {
                Decision::Random
            } else {
                self.0.remove(0)
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        started: usize,
        outcome: Option<PlayerOutcome>,
        replacements: usize,
    }

    impl Player for Recorder {
        fn start_battle(&mut self) {
            self.started += 1;
        }

        fn choose_action(&mut self, snapshot: &BattleSnapshot) -> Decision {
            if snapshot.legal_moves.is_empty() {
                self.replacements += 1;
            }
            Decision::Random
        }

        fn finish_battle(&mut self, outcome: PlayerOutcome) {
            self.outcome = Some(outcome);
        }
    }

    fn unit(name: &str, ty: Type, speed: u16, moves: Vec<Move>) -> Unit {
        Unit::new(name, &[ty], StatTable::new(80, 80, 80, 80, 80, speed)).with_moves(moves)
    }

    fn tackle() -> Move {
        Move::new("Tackle", Type::Normal, MoveCategory::Physical, 40)
    }

    #[test]
    fn test_damage_formula() {
        let attacker = unit("A", Type::Fire, 80, vec![]);
        let defender = unit("D", Type::Grass, 80, vec![]);
        let field = FieldState::default();
        let ember = Move::new("Ember", Type::Fire, MoveCategory::Special, 40);

        let stats = attacker.stats();
        let base = (22.0 * 40.0 * f32::from(stats.special_attack) / f32::from(stats.special_defense)) / 50.0 + 2.0;
        let expected = base * 1.5 * 2.0 / f32::from(defender.stats().hp);
        let actual = damage_fraction(&attacker, &defender, &ember, &field, 1.0);
        assert!((actual - expected).abs() < 1e-6);

        let sunny = FieldState::default().with_weather(Weather::Sun, 1);
        let boosted = damage_fraction(&attacker, &defender, &ember, &sunny, 1.0);
        assert!((boosted - expected * 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_immune_and_status_moves_deal_no_damage() {
        let attacker = unit("A", Type::Normal, 80, vec![]);
        let ghost = unit("G", Type::Ghost, 80, vec![]);
        let field = FieldState::default();
        assert_eq!(damage_fraction(&attacker, &ghost, &tackle(), &field, 1.0), 0.0);
        let growl = Move::status(
            "Growl",
            Type::Normal,
            MoveEffect::Boost {
                target: EffectTarget::Target,
                stat: BoostStat::Attack,
                stages: -1,
            },
        );
        assert_eq!(damage_fraction(&attacker, &ghost, &growl, &field, 1.0), 0.0);
    }

    #[test]
    fn test_empty_team_is_rejected() {
        let team = vec![unit("A", Type::Normal, 80, vec![tackle()])];
        assert!(Battle::new(vec![], team, BattleSeed::from(0)).is_err());
    }

    #[test]
    fn test_battle_runs_to_completion() {
        let team = || {
            vec![
                unit("A", Type::Normal, 90, vec![tackle()]),
                unit("B", Type::Normal, 70, vec![tackle()]),
            ]
        };
        let mut battle = Battle::new(team(), team(), BattleSeed::from(3)).unwrap();
        let mut p1 = Recorder::default();
        let mut p2 = Recorder::default();
        let outcome = battle.run(&mut p1, &mut p2, 500);

        assert_eq!(p1.started, 1);
        assert_eq!(p1.outcome, Some(outcome.for_side(SideId::One)));
        assert_eq!(p2.outcome, Some(outcome.for_side(SideId::Two)));
        assert!(outcome.is_draw() || battle.outcome() == Some(outcome));
        assert!(p1.replacements + p2.replacements >= 1);
    }

    #[test]
    fn test_same_seed_same_battle() {
        let team = || {
            vec![
                unit("A", Type::Fire, 90, vec![tackle()]),
                unit("B", Type::Water, 70, vec![tackle()]),
            ]
        };
        let play = || {
            let mut battle = Battle::new(team(), team(), BattleSeed::from(11)).unwrap();
            let outcome = battle.run(&mut Recorder::default(), &mut Recorder::default(), 500);
            (outcome, battle.turn())
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_turn_limit_is_a_draw() {
        let splash = Move::status(
            "Splash",
            Type::Normal,
            MoveEffect::Boost {
                target: EffectTarget::User,
                stat: BoostStat::Evasion,
                stages: 0,
            },
        );
        let team = || vec![unit("A", Type::Normal, 80, vec![splash.clone()])];
        let mut battle = Battle::new(team(), team(), BattleSeed::from(5)).unwrap();
        let outcome = battle.run(&mut Recorder::default(), &mut Recorder::default(), 10);
        assert_eq!(outcome, BattleOutcome::Draw);
        assert_eq!(battle.turn(), 10);
    }

    #[test]
    fn test_switch_resolves_before_attacks() {
        let team1 = vec![
            unit("A", Type::Normal, 10, vec![tackle()]),
            unit("B", Type::Ghost, 10, vec![tackle()]),
        ];
        let team2 = vec![unit("C", Type::Normal, 200, vec![tackle()])];
        let mut battle = Battle::new(team1, team2, BattleSeed::from(1)).unwrap();
        let mut p1 = Scripted(vec![Decision::Act(Action::Switch(TeamSlot(1)))]);
        let mut p2 = Scripted(vec![Decision::Act(Action::Attack(MoveSlot(0)))]);
        battle.play_turn(&mut p1, &mut p2);

        assert_eq!(battle.active_unit(SideId::One).species(), "B");
        assert_eq!(battle.active_unit(SideId::One).hp_fraction(), 1.0);
        assert_eq!(battle.team(SideId::One)[0].hp_fraction(), 1.0);
    }

    #[test]
    fn test_illegal_decision_falls_back_to_random() {
        let team = || vec![unit("A", Type::Normal, 80, vec![tackle()])];
        let mut battle = Battle::new(team(), team(), BattleSeed::from(9)).unwrap();
        let mut p1 = Scripted(vec![Decision::Act(Action::Switch(TeamSlot(4)))]);
        let mut p2 = Scripted(vec![Decision::Act(Action::Attack(MoveSlot(0)))]);
        battle.play_turn(&mut p1, &mut p2);
        // The only legal action was the single attack, so both units took damage.
        assert!(battle.active_unit(SideId::One).hp_fraction() < 1.0);
        assert!(battle.active_unit(SideId::Two).hp_fraction() < 1.0);
    }

    #[test]
    fn test_weather_and_status_chip() {
        let sand = Move::status("Sandstorm", Type::Rock, MoveEffect::SetWeather { weather: Weather::Sandstorm });
        let toxic = Move::status(
            "Toxic",
            Type::Poison,
            MoveEffect::Inflict {
                status: StatusKind::Toxic,
                chance: 100,
            },
        );
        let team1 = vec![unit("Rock", Type::Rock, 80, vec![sand, toxic])];
        let team2 = vec![unit("Normal", Type::Normal, 80, vec![tackle()]).with_stats(StatTable::new(400, 1, 400, 1, 400, 1))];
        let mut battle = Battle::new(team1, team2, BattleSeed::from(2)).unwrap();

        let mut p1 = Scripted(vec![
            Decision::Act(Action::Attack(MoveSlot(0))),
            Decision::Act(Action::Attack(MoveSlot(1))),
        ]);
        let mut p2 = Scripted(vec![Decision::Act(Action::Attack(MoveSlot(0))); 2]);
        battle.play_turn(&mut p1, &mut p2);
        assert!(battle.field().has_weather(Weather::Sandstorm));
        let rock_hp = battle.active_unit(SideId::One).hp_fraction();
        battle.play_turn(&mut p1, &mut p2);

        let target = battle.active_unit(SideId::Two);
        assert_eq!(target.status(), Some(Status::Toxic { turns: 1 }));
        // Rock is immune to sandstorm; the only damage it takes comes from the weak attack.
        assert!(battle.active_unit(SideId::One).hp_fraction() <= rock_hp);
        assert!(target.hp_fraction() < 1.0 - 2.0 / 16.0 + 1e-6);
    }

    #[test]
    fn test_trick_room_toggles() {
        let trick_room = Move::status(
            "Trick Room",
            Type::Psychic,
            MoveEffect::SetField {
                condition: FieldCondition::TrickRoom,
            },
        );
        let team = || vec![unit("A", Type::Psychic, 80, vec![trick_room.clone()])];
        let mut battle = Battle::new(team(), team(), BattleSeed::from(4)).unwrap();
        let mut p1 = Scripted(vec![Decision::Act(Action::Attack(MoveSlot(0)))]);
        let mut p2 = Scripted(vec![Decision::Act(Action::Attack(MoveSlot(0)))]);
        battle.play_turn(&mut p1, &mut p2);
        assert_eq!(battle.field().condition_applied_turn(FieldCondition::TrickRoom), None);
    }

    #[test]
    fn test_terastallize_once_per_side() {
        let team1 = vec![
            unit("A", Type::Normal, 80, vec![tackle()]).with_tera_type(Type::Ghost),
            unit("B", Type::Normal, 80, vec![tackle()]).with_tera_type(Type::Steel),
        ];
        let team2 = vec![unit("C", Type::Normal, 80, vec![tackle()]).with_stats(StatTable::new(400, 1, 400, 1, 400, 80))];
        let mut battle = Battle::new(team1, team2, BattleSeed::from(6)).unwrap();
        assert!(battle.snapshot(SideId::One).can_terastallize);
        assert!(!battle.snapshot(SideId::Two).can_terastallize);

        let mut p1 = Scripted(vec![
            Decision::Act(Action::Terastallize(MoveSlot(0))),
            Decision::Act(Action::Switch(TeamSlot(1))),
        ]);
        let mut p2 = Scripted(vec![Decision::Act(Action::Attack(MoveSlot(0))); 2]);
        battle.play_turn(&mut p1, &mut p2);

        // The ghost tera type applies before the opposing attack lands.
        let active = battle.active_unit(SideId::One);
        assert!(active.is_terastallized());
        assert_eq!(active.hp_fraction(), 1.0);
        assert!(battle.active_unit(SideId::Two).hp_fraction() < 1.0);

        let seen = battle.snapshot(SideId::Two);
        assert!(seen.opponent.is_terastallized());
        assert_eq!(seen.opponent.defensive_types(), &[Type::Ghost]);

        battle.play_turn(&mut p1, &mut p2);
        let snapshot = battle.snapshot(SideId::One);
        assert_eq!(snapshot.active_unit().species(), "B");
        assert!(!snapshot.can_terastallize);
        assert!(!snapshot.is_legal(Action::Terastallize(MoveSlot(0))));
    }

    #[test]
    fn test_seed_serialization() {
        let seed = BattleSeed::from(0xdead_beef);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"000000000000000000000000deadbeef\"");
        let back: BattleSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seed);
        assert!(serde_json::from_str::<BattleSeed>("\"abc\"").is_err());
    }
}
