//! Stamp CLI - materialize Cloud Run deployment config and deploy
//!
//! Usage: stamp <COMMAND>
//!
//! Commands:
//!   deploy  Validate inputs, write the artifact, run `gcloud run deploy`
//!   render  Validate inputs and write the artifact only
//!   check   Read-only preflight

use anyhow::Result;
use clap::Parser;

mod commands;
mod logging;
mod presentation;
mod ui;

use commands::deploy::{Action, DeployArgs};
use presentation::cli::{Cli, Commands};
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.color);
    logging::init(cli.verbose, cli.json, ui.color);

    if let Err(err) = run(cli, &ui) {
        ui::error::print_error(&err, &ui);
        std::process::exit(ui::error::exit_code(&err));
    }
}

fn run(cli: Cli, ui: &UiContext) -> Result<()> {
    let config = cli.config.as_deref();
    let env_file = cli.env_file.as_deref();

    match cli.command {
        Commands::Deploy {
            template,
            source,
            strict,
            dry_run,
        } => commands::deploy::cmd_deploy(
            Action::Deploy,
            DeployArgs {
                config,
                env_file,
                template: &template,
                source,
                strict,
                dry_run,
            },
            ui,
        ),
        Commands::Render { template, strict } => commands::deploy::cmd_deploy(
            Action::Render,
            DeployArgs {
                config,
                env_file,
                template: &template,
                source: None,
                strict,
                dry_run: false,
            },
            ui,
        ),
        Commands::Check {
            template,
            strict_warnings,
        } => commands::check::cmd_check(config, env_file, &template, strict_warnings, ui),
    }
}
