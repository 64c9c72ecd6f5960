//! CLI Argument Parsing
//!
//! Global flags (--json, --color, --verbose, --config, --env-file) are
//! inherited by all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Stamp - materialize Cloud Run deployment config and deploy
#[derive(Parser, Debug)]
#[command(name = "stamp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Secrets are read from SLACK_BOT_TOKEN, SLACK_SIGNING_SECRET and SPREADSHEET_KEY.")]
pub struct Cli {
    /// Output NDJSON events for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./stamp.toml, then user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// dotenv file to seed the environment from (default: .env if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides shared by every command that touches the template
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Template to materialize
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Where to write the materialized artifact
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Cloud project id (overrides PROJECT_ID)
    #[arg(long)]
    pub project: Option<String>,

    /// Cloud Run service name
    #[arg(long)]
    pub service: Option<String>,

    /// Cloud Run region
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate inputs, write the artifact, and run `gcloud run deploy`
    Deploy {
        #[command(flatten)]
        template: TemplateArgs,

        /// Source directory passed to `--source`
        #[arg(short, long, value_name = "DIR")]
        source: Option<PathBuf>,

        /// Fail if the template has placeholders with no input
        #[arg(long)]
        strict: bool,

        /// Show the deploy command without writing or deploying
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate inputs and write the artifact without deploying
    Render {
        #[command(flatten)]
        template: TemplateArgs,

        /// Fail if the template has placeholders with no input
        #[arg(long)]
        strict: bool,
    },

    /// Preflight: check inputs, gcloud, template and artifact hygiene
    Check {
        #[command(flatten)]
        template: TemplateArgs,

        /// Fail on warnings too (CI mode)
        #[arg(long)]
        strict_warnings: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_deploy_defaults() {
        let cli = Cli::try_parse_from(["stamp", "deploy"]).unwrap();
        if let Commands::Deploy {
            template,
            source,
            strict,
            dry_run,
        } = cli.command
        {
            assert!(template.template.is_none());
            assert!(template.output.is_none());
            assert!(source.is_none());
            assert!(!strict);
            assert!(!dry_run);
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_cli_parse_deploy_overrides() {
        let cli = Cli::try_parse_from([
            "stamp",
            "deploy",
            "--template",
            "t.yaml.template",
            "-o",
            "out.yaml",
            "--project",
            "demo",
            "--region",
            "us-central1",
            "--dry-run",
        ])
        .unwrap();
        if let Commands::Deploy {
            template, dry_run, ..
        } = cli.command
        {
            assert_eq!(template.template, Some(PathBuf::from("t.yaml.template")));
            assert_eq!(template.output, Some(PathBuf::from("out.yaml")));
            assert_eq!(template.project.as_deref(), Some("demo"));
            assert_eq!(template.region.as_deref(), Some("us-central1"));
            assert!(dry_run);
        } else {
            panic!("Expected Deploy command");
        }
    }

    #[test]
    fn test_cli_parse_render_strict() {
        let cli = Cli::try_parse_from(["stamp", "render", "--strict"]).unwrap();
        assert!(matches!(cli.command, Commands::Render { strict: true, .. }));
    }

    #[test]
    fn test_cli_parse_check_strict_warnings() {
        let cli = Cli::try_parse_from(["stamp", "check", "--strict-warnings"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check {
                strict_warnings: true,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "stamp",
            "render",
            "--json",
            "-vv",
            "--color",
            "never",
            "--env-file",
            "prod.env",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert_eq!(cli.env_file, Some(PathBuf::from("prod.env")));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["stamp"]).is_err());
    }

    #[test]
    fn test_dry_run_only_on_deploy() {
        assert!(Cli::try_parse_from(["stamp", "render", "--dry-run"]).is_err());
    }
}
