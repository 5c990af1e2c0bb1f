use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use pomidor::config::{Config, LoadOutcome, Paths};
use pomidor::notify::DesktopNotifier;
use pomidor::session::SessionController;
use pomidor::tui::App;

/// A Pomodoro timer for the terminal.
///
/// Takes no arguments beyond launch; all behavior is driven by keys
/// inside the timer window and by `~/.pomidor/config.json`.
#[derive(Parser)]
#[command(name = "pomidor", version, about)]
struct Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let _cli = Cli::parse();

    let paths = Paths::new()?;
    paths.ensure_dirs()?;

    let (config, outcome) = Config::load_or_create(&paths.config_file)?;
    let warning = match outcome {
        LoadOutcome::RecoveredDefault(reason) => Some(format!(
            "Config file was invalid ({reason}); defaults restored"
        )),
        LoadOutcome::Loaded | LoadOutcome::CreatedDefault => None,
    };

    let controller = SessionController::new(config, paths.config_file, DesktopNotifier);
    let app = App::new(controller, warning);
    pomidor::tui::run(app)?;

    Ok(())
}
