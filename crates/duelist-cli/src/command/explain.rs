use std::path::PathBuf;

use duelist_engine::{Action, ActionKind, BattleSnapshot, Decision};
use duelist_evaluator::{
    action_selector::{ActionSelector, switch_score},
    contextual_scorer::ContextualScorer,
    matchup_feature::Matchup,
};

use crate::{model::EngineModel, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExplainArg {
    /// Battle snapshot JSON file
    snapshot: PathBuf,
    /// Model file with the engine's weights [default: tuned weights]
    #[arg(long)]
    model: Option<PathBuf>,
    /// Value of the engine's turn counter [default: the snapshot's turn]
    #[arg(long)]
    turn: Option<u32>,
    /// Treat the previous action as a switch, which blocks switching again
    #[arg(long)]
    after_switch: bool,
}

pub(crate) fn run(arg: &ExplainArg) -> anyhow::Result<()> {
    let snapshot: BattleSnapshot = util::read_json_file("battle snapshot", &arg.snapshot)?;
    if let Err(e) = snapshot.validate() {
        tracing::warn!(error = %e, "snapshot has invalid entries");
    }
    let weights = EngineModel::load_weights(arg.model.as_deref())?;
    let turn = arg.turn.unwrap_or(snapshot.turn);

    let Some(matchup) = Matchup::from_snapshot(&snapshot, turn) else {
        anyhow::bail!("Active slot {} is not part of the team", snapshot.active);
    };
    let unit = matchup.unit;
    let opponent = matchup.opponent;

    println!("{} vs {} (turn {turn})", unit.species(), opponent.species());
    println!();

    let selector = ActionSelector::new(ContextualScorer::new(weights));
    let breakdown = selector.scorer().breakdown(&matchup);
    println!("{breakdown}");
    if breakdown.wants_switch() {
        println!("(bad matchup: wants to switch out)");
    }
    println!();

    if !snapshot.legal_switches.is_empty() {
        println!("Switch candidates:");
        for slot in &snapshot.legal_switches {
            match snapshot.switch_target(*slot) {
                Some(candidate) => println!(
                    "  {slot}: {:<16} {:>8.3}",
                    candidate.species(),
                    switch_score(candidate, opponent)
                ),
                None => println!("  {slot}: (not a valid switch)"),
            }
        }
        println!();
    }

    let last_action = arg.after_switch.then_some(ActionKind::Switch);
    let result = selector.select(&snapshot, turn, last_action);
    let described = match result.decision {
        Decision::Act(Action::Attack(slot)) => snapshot
            .move_at(slot)
            .map_or_else(|| format!("attack with move {slot}"), |mv| format!("use {}", mv.name())),
        Decision::Act(Action::Terastallize(slot)) => snapshot.move_at(slot).map_or_else(
            || format!("terastallize and attack with move {slot}"),
            |mv| format!("terastallize and use {}", mv.name()),
        ),
        Decision::Act(Action::Switch(slot)) => snapshot.switch_target(slot).map_or_else(
            || format!("switch to {slot}"),
            |unit| format!("switch to {}", unit.species()),
        ),
        Decision::Random => "random legal action".to_owned(),
    };
    println!("Decision: {described}");

    Ok(())
}
