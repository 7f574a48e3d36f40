use std::{path::PathBuf, time::Instant};

use duelist_engine::Roster;
use duelist_evaluator::decision_engine::{DecisionEngine, TurnCounterPolicy};
use duelist_training::{
    hill_climb::EpochDriver as _,
    self_play::{Baseline, SelfPlayArena},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{model::EngineModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BattleArg {
    /// Number of battles to play
    #[arg(long, default_value_t = 100)]
    battles: usize,
    /// Opponent of the heuristic engine (random, greedy, heuristic)
    #[arg(long, default_value = "random")]
    baseline: Baseline,
    /// Model file with the engine's weights [default: tuned weights]
    #[arg(long)]
    model: Option<PathBuf>,
    /// Roster JSON file [default: built-in roster]
    #[arg(long)]
    roster: Option<PathBuf>,
    #[arg(long, default_value_t = 3)]
    team_size: usize,
    /// Turns after which a battle is a draw
    #[arg(long, default_value_t = 200)]
    turn_limit: u32,
    /// Whether the engine's turn counter restarts every battle (cumulative, perbattle)
    #[arg(long, default_value = "cumulative")]
    turn_counter: TurnCounterPolicy,
    /// Seed for teams and battles [default: random]
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &BattleArg) -> anyhow::Result<()> {
    let BattleArg {
        battles,
        baseline,
        model,
        roster,
        team_size,
        turn_limit,
        turn_counter,
        seed,
    } = arg;

    let weights = EngineModel::load_weights(model.as_deref())?;
    let roster = load_roster(roster.as_deref())?;
    let seed = seed.unwrap_or_else(rand::random);
    tracing::info!(seed, %baseline, battles, "starting battles");

    let mut engine = DecisionEngine::new(weights).with_policy(*turn_counter);
    let mut arena = SelfPlayArena::new(roster, *baseline, *team_size, *turn_limit, Pcg32::seed_from_u64(seed))?;

    let start = Instant::now();
    let record = arena.play_epoch(&mut engine, *battles);
    let elapsed = start.elapsed();

    #[expect(clippy::cast_precision_loss)]
    let win_rate = if record.battles() == 0 {
        0.0
    } else {
        record.won as f32 / record.battles() as f32 * 100.0
    };
    println!("Heuristic vs {baseline} ({} battles, seed {seed})", record.battles());
    println!("  Won:   {:5}", record.won);
    println!("  Lost:  {:5}", record.lost);
    println!("  Drawn: {:5}", record.drawn);
    println!("  Win rate: {win_rate:.1}%");
    println!("  Weights:  {:.3?}", weights.to_array());
    println!("  Elapsed:  {elapsed:.2?}");

    Ok(())
}

pub(crate) fn load_roster(path: Option<&std::path::Path>) -> anyhow::Result<Roster> {
    match path {
        Some(path) => util::read_json_file("roster", path),
        None => Ok(Roster::default()),
    }
}
