mod cli;
mod prefs;
mod run;

use anyhow::Result;
use cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Command::List(args) => run::run_list(args),
        Command::Show(args) => run::run_show(args),
        Command::Preview(args) => run::run_preview(args),
        Command::Transition(args) => run::run_transition(args),
        Command::Mask(args) => run::run_mask(args),
        Command::Prefs(command) => run::run_prefs(command),
    }
}
