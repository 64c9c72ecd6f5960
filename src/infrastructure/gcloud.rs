//! gcloud CLI adapter
//!
//! Implements project lookup and deployment by shelling out to `gcloud`.
//! Nothing here is retried; the first failure is returned.

use std::process::{Command, Output, Stdio};

use crate::domain::entities::DeployRequest;
use crate::domain::ports::{Deployer, ProjectLookup};
use crate::error::{StampError, StampResult};

/// Lines of captured stderr kept in error messages
const STDERR_TAIL_LINES: usize = 20;

/// gcloud command-line client
#[derive(Debug, Clone)]
pub struct GcloudCli {
    binary: String,
    /// Inherit stdout/stderr during deploy instead of capturing them
    stream_output: bool,
}

impl GcloudCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            stream_output: true,
        }
    }

    /// Capture deploy output instead of streaming it (JSON mode)
    pub fn with_stream_output(mut self, stream: bool) -> Self {
        self.stream_output = stream;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Check if the binary is installed and runnable
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn query(&self, what: &str, args: &[&str]) -> StampResult<String> {
        tracing::debug!(binary = %self.binary, ?args, "querying gcloud");

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| StampError::ExternalLookupFailure {
                what: what.to_string(),
                message: format!("could not run {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(StampError::ExternalLookupFailure {
                what: what.to_string(),
                message: failure_message(&self.binary, &output, |s| s.to_string()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl ProjectLookup for GcloudCli {
    fn default_project(&self) -> StampResult<Option<String>> {
        let value = self.query("default project", &["config", "get-value", "project"])?;
        // gcloud prints "(unset)" on some versions and nothing on others
        if value.is_empty() || value == "(unset)" {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    fn project_number(&self, project_id: &str) -> StampResult<String> {
        let value = self.query(
            "project number",
            &[
                "projects",
                "describe",
                project_id,
                "--format=value(projectNumber)",
            ],
        )?;

        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(StampError::ExternalLookupFailure {
                what: "project number".to_string(),
                message: format!(
                    "unexpected response for project '{}': '{}'",
                    project_id, value
                ),
            });
        }
        Ok(value)
    }
}

impl Deployer for GcloudCli {
    fn name(&self) -> &str {
        &self.binary
    }

    fn deploy(&self, request: &DeployRequest) -> StampResult<()> {
        let args = request.to_args(true)?;
        let shown = request.display_command(&self.binary)?;
        tracing::info!(command = %shown, "invoking deploy");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args).stdin(Stdio::inherit());

        if self.stream_output {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        }

        let output = cmd
            .output()
            .map_err(|e| StampError::DeploymentInvocationFailure {
                message: format!("could not run {}: {}", self.binary, e),
                exit_code: None,
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(StampError::DeploymentInvocationFailure {
            message: failure_message(&self.binary, &output, |s| request.redact(s)),
            exit_code: output.status.code(),
        })
    }
}

fn failure_message(binary: &str, output: &Output, redact: impl Fn(&str) -> String) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail = lines[lines.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");

    let status = match output.status.code() {
        Some(code) => format!("{} exited with code {}", binary, code),
        None => format!("{} was terminated by a signal", binary),
    };

    if tail.is_empty() {
        status
    } else {
        format!("{}: {}", status, redact(&tail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_is_unavailable() {
        let cli = GcloudCli::new("/nonexistent/stamp-test-gcloud");
        assert!(!cli.is_available());
    }

    #[test]
    fn missing_binary_fails_lookup() {
        let cli = GcloudCli::new("/nonexistent/stamp-test-gcloud");
        let err = cli.project_number("demo").unwrap_err();
        assert!(matches!(err, StampError::ExternalLookupFailure { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[cfg(unix)]
    mod fake_binary {
        use super::*;
        use crate::domain::entities::{InputSet, ResourceProfile};
        use crate::domain::value_objects::InputKey;
        use std::os::unix::fs::PermissionsExt;
        use std::path::{Path, PathBuf};
        use tempfile::TempDir;

        fn script(dir: &TempDir, body: &str) -> PathBuf {
            let path = dir.path().join("gcloud");
            std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn cli(path: &Path) -> GcloudCli {
            GcloudCli::new(path.display().to_string()).with_stream_output(false)
        }

        fn request() -> DeployRequest {
            let inputs = InputSet::new()
                .with(InputKey::ProjectId, "demo")
                .with(InputKey::SlackBotToken, "xoxb-leak");
            DeployRequest {
                service: "slack-bot".to_string(),
                source: PathBuf::from("."),
                region: "asia-northeast1".to_string(),
                platform: "managed".to_string(),
                project_id: "demo".to_string(),
                profile: ResourceProfile::default(),
                allow_unauthenticated: true,
                env: DeployRequest::env_from_inputs(&inputs, "asia-northeast1"),
            }
        }

        #[test]
        fn project_number_is_trimmed() {
            let dir = TempDir::new().unwrap();
            let bin = script(&dir, "echo '123456'");
            assert_eq!(cli(&bin).project_number("demo").unwrap(), "123456");
        }

        #[test]
        fn non_numeric_project_number_is_rejected() {
            let dir = TempDir::new().unwrap();
            let bin = script(&dir, "echo 'not-a-number'");
            assert!(cli(&bin).project_number("demo").is_err());
        }

        #[test]
        fn lookup_failure_includes_stderr() {
            let dir = TempDir::new().unwrap();
            let bin = script(&dir, "echo 'ERROR: project not found' >&2; exit 1");
            let err = cli(&bin).project_number("nope").unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("exited with code 1"), "got: {msg}");
            assert!(msg.contains("project not found"), "got: {msg}");
        }

        #[test]
        fn unset_default_project_is_none() {
            let dir = TempDir::new().unwrap();
            let bin = script(&dir, "echo '(unset)'");
            assert_eq!(cli(&bin).default_project().unwrap(), None);
        }

        #[test]
        fn deploy_failure_redacts_secrets_and_keeps_exit_code() {
            let dir = TempDir::new().unwrap();
            let bin = script(&dir, "echo \"rejected: $*\" >&2; exit 7");
            let err = cli(&bin).deploy(&request()).unwrap_err();

            let msg = err.to_string();
            assert!(!msg.contains("xoxb-leak"), "got: {msg}");
            assert!(msg.contains("SLACK_BOT_TOKEN=***"), "got: {msg}");
            assert_eq!(err.exit_code(), 7);
        }

        #[test]
        fn deploy_passes_full_argument_list() {
            let dir = TempDir::new().unwrap();
            let log = dir.path().join("args.log");
            let bin = script(&dir, &format!("echo \"$*\" > '{}'", log.display()));

            cli(&bin).deploy(&request()).unwrap();

            let args = std::fs::read_to_string(&log).unwrap();
            assert!(args.starts_with("run deploy slack-bot --source ."));
            assert!(args.contains("SLACK_BOT_TOKEN=xoxb-leak"));
            assert!(args.contains("LOCATION=asia-northeast1"));
        }

        #[test]
        fn unencodable_env_never_runs_gcloud() {
            let dir = TempDir::new().unwrap();
            let log = dir.path().join("args.log");
            let bin = script(&dir, &format!("echo \"$*\" > '{}'", log.display()));

            let mut req = request();
            req.env.push(("SPREADSHEET_KEY".to_string(), "a,b".into()));
            req.env.push(("SLACK_SIGNING_SECRET".to_string(), "@#|;~!:%+&?/-.".into()));

            let err = cli(&bin).deploy(&req).unwrap_err();
            assert!(matches!(err, StampError::EnvEncoding { .. }));
            assert!(!log.exists());
        }
    }
}
