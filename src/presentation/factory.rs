//! Run context factory
//!
//! Loads config and inputs in precedence order and wires the gcloud and
//! filesystem adapters.

use std::path::{Path, PathBuf};

use anyhow::Result;
use stamp::config::{self, ConfigWarning, LoadedConfig};
use stamp::{Config, GcloudCli, InputKey, InputSet, LocalArtifactStore};

use crate::presentation::cli::TemplateArgs;

/// Everything a command needs to run
pub struct RunContext {
    pub root: PathBuf,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub config_warnings: Vec<ConfigWarning>,
    pub inputs: InputSet,
    pub gcloud: GcloudCli,
    pub store: LocalArtifactStore,
}

/// Build the context: dotenv → config file → STAMP_* env → CLI flags
pub fn create_context(
    config_path: Option<&Path>,
    env_file: Option<&Path>,
    args: &TemplateArgs,
    json: bool,
) -> Result<RunContext> {
    let root = std::env::current_dir()?;

    if let Some(path) = config::load_env_file(env_file)? {
        tracing::debug!(path = %path.display(), "loaded env file");
    }

    let LoadedConfig {
        mut config,
        path,
        warnings,
    } = config::load_or_default(&root, config_path)?;
    apply_args(&mut config, args);

    let mut inputs = InputSet::from_env();
    if let Some(project) = &args.project {
        inputs.insert(InputKey::ProjectId, project.clone());
    }

    let gcloud = GcloudCli::new(config.gcloud.binary.clone()).with_stream_output(!json);

    Ok(RunContext {
        root,
        config,
        config_path: path,
        config_warnings: warnings,
        inputs,
        gcloud,
        store: LocalArtifactStore::new(),
    })
}

/// CLI flags take precedence over everything else
pub fn apply_args(config: &mut Config, args: &TemplateArgs) {
    if let Some(template) = &args.template {
        config.template.source = template.clone();
    }
    if let Some(output) = &args.output {
        config.template.output = output.clone();
    }
    if let Some(service) = &args.service {
        config.service.name = service.clone();
    }
    if let Some(region) = &args.region {
        config.service.region = region.clone();
    }
}
