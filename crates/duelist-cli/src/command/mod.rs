use clap::{Parser, Subcommand};

use self::{battle::BattleArg, explain::ExplainArg, train::TrainArg};

mod battle;
mod explain;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the heuristic engine against a baseline
    Battle(#[clap(flatten)] BattleArg),
    /// Tune the engine's weights by hill climbing
    Train(#[clap(flatten)] TrainArg),
    /// Show how the engine scores a saved battle snapshot
    Explain(#[clap(flatten)] ExplainArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Battle(arg) => battle::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Explain(arg) => explain::run(&arg)?,
    }
    Ok(())
}
