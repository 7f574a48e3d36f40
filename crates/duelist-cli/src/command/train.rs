use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Utc;
use duelist_evaluator::{
    decision_engine::{DecisionEngine, TurnCounterPolicy},
    weights::WeightVector,
};
use duelist_training::{
    config::SearchConfig,
    hill_climb::HillClimber,
    history::EpochSummary,
    self_play::{Baseline, SelfPlayArena},
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{
    command::battle::load_roster,
    model::EngineModel,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Search configuration JSON file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    epochs: Option<usize>,
    #[arg(long)]
    battles_per_epoch: Option<usize>,
    /// Largest offset added to each weight per step
    #[arg(long)]
    step: Option<f32>,
    #[arg(long)]
    team_size: Option<usize>,
    #[arg(long)]
    turn_limit: Option<u32>,
    /// Opponent of the engine during training (random, greedy, heuristic)
    #[arg(long)]
    baseline: Option<Baseline>,
    /// Start from the weights of this model instead of random weights
    #[arg(long)]
    init: Option<PathBuf>,
    /// Roster JSON file [default: built-in roster]
    #[arg(long)]
    roster: Option<PathBuf>,
    #[arg(long, default_value = "cumulative")]
    turn_counter: TurnCounterPolicy,
    /// Seed for weights, teams and battles [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Name stored in the saved model
    #[arg(long, default_value = "hill-climb")]
    name: String,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    fn search_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file::<SearchConfig, _>("search config", path)?,
            None => SearchConfig::default(),
        };
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(battles) = self.battles_per_epoch {
            config.battles_per_epoch = battles;
        }
        if let Some(step) = self.step {
            config.step = step;
        }
        if let Some(team_size) = self.team_size {
            config.team_size = team_size;
        }
        if let Some(turn_limit) = self.turn_limit {
            config.turn_limit = turn_limit;
        }
        if let Some(baseline) = self.baseline {
            config.baseline = baseline;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.search_config()?;
    let perturbation = config.perturbation().context("Invalid search configuration")?;
    let roster = load_roster(arg.roster.as_deref())?;
    let seed = arg.seed.unwrap_or_else(rand::random);
    let mut rng = Pcg32::seed_from_u64(seed);

    let initial = match &arg.init {
        Some(path) => EngineModel::load_weights(Some(path.as_path()))?,
        None => WeightVector::random_initial(&mut rng),
    };
    tracing::info!(seed, ?config, ?initial, "starting training");

    let arena_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let mut arena = SelfPlayArena::new(roster, config.baseline, config.team_size, config.turn_limit, arena_rng)?;
    let mut engine = DecisionEngine::new(initial).with_policy(arg.turn_counter);
    let mut climber = HillClimber::new(perturbation, config.battles_per_epoch, rng);

    for _ in 0..config.epochs {
        climber.run_epoch(&mut engine, &mut arena);
    }

    let state = climber.state();
    let (Some(best_wins), Some(best_weights)) = (state.best_wins(), state.best_weights()) else {
        anyhow::bail!("Training finished without playing an epoch");
    };

    eprintln!();
    eprintln!("Training completed");
    eprintln!("  Best epoch wins: {best_wins}/{}", config.battles_per_epoch);
    eprintln!("  Best weights:    {:.3?}", best_weights.to_array());
    eprintln!("  Total wins:      {}", state.cumulative_wins());
    if let Some(summary) = EpochSummary::new(state.history()) {
        eprintln!("  Epoch wins:");
        eprintln!("    Min:    {}", summary.min);
        eprintln!("    Max:    {}", summary.max);
        eprintln!("    Mean:   {:.3}", summary.mean);
        eprintln!("    Stddev: {:.3}", summary.std_dev);
    }

    let model = EngineModel {
        name: arg.name.clone(),
        trained_at: Utc::now(),
        best_epoch_wins: best_wins,
        battles_per_epoch: config.battles_per_epoch,
        weights: best_weights,
        epoch_wins: state.history().to_vec(),
    };
    Output::save_json(&model, arg.output.clone())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);

    Ok(())
}
