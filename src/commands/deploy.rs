//! `stamp deploy` and `stamp render`

use std::path::PathBuf;

use anyhow::Result;
use stamp::domain::ports::DeployEventSink;
use stamp::{DeployPipeline, PipelineOptions};

use crate::presentation::cli::TemplateArgs;
use crate::presentation::factory::create_context;
use crate::ui::context::UiContext;
use crate::ui::sinks::{ConsoleEventSink, JsonEventSink};
use crate::ui::views::deploy::{render_deploy_header, render_deploy_summary, DeployHeader};

/// Which of the two pipeline commands is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Deploy,
    Render,
}

impl Action {
    pub fn command(self) -> &'static str {
        match self {
            Action::Deploy => "deploy",
            Action::Render => "render",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Action::Deploy => "Deploy",
            Action::Render => "Render",
        }
    }
}

pub struct DeployArgs<'a> {
    pub config: Option<&'a std::path::Path>,
    pub env_file: Option<&'a std::path::Path>,
    pub template: &'a TemplateArgs,
    pub source: Option<PathBuf>,
    pub strict: bool,
    pub dry_run: bool,
}

pub fn cmd_deploy(action: Action, args: DeployArgs<'_>, ui: &UiContext) -> Result<()> {
    let mut ctx = create_context(args.config, args.env_file, args.template, ui.json)?;
    super::print_config_warnings(ctx.config_path.as_deref(), &ctx.config_warnings, ui);

    if let Some(source) = args.source {
        ctx.config.service.source = source;
    }

    let options = PipelineOptions {
        dry_run: args.dry_run,
        skip_deploy: action == Action::Render,
        strict: args.strict,
    };

    if !ui.json {
        print!(
            "{}",
            render_deploy_header(
                &DeployHeader {
                    action: action.title(),
                    template: &ctx.config.template.source,
                    output: &ctx.config.template.output,
                    service: &ctx.config.service.name,
                    region: &ctx.config.service.region,
                    dry_run: options.dry_run,
                },
                ui.color,
                ui.unicode,
            )
        );
    }

    let console;
    let json;
    let events: &dyn DeployEventSink = if ui.json {
        json = JsonEventSink::new(action.command());
        &json
    } else {
        console = ConsoleEventSink::new(*ui);
        &console
    };

    let pipeline = DeployPipeline::new(&ctx.config, &ctx.gcloud, &ctx.gcloud, &ctx.store, events);
    let outcome = pipeline.run(ctx.inputs, options)?;

    tracing::info!(
        digest = %outcome.digest,
        deployed = outcome.deployed,
        "{} finished",
        action.command()
    );

    if !ui.json {
        print!(
            "{}",
            render_deploy_summary(action.title(), &outcome, ui.color, ui.unicode)
        );
    }

    Ok(())
}
