//! Test environment builder for isolated Stamp testing.
//!
//! Provides `TestEnv` - a temp project directory, a temp HOME, and a fake
//! `gcloud` on disk, plus helpers to run the `stamp` binary against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

use super::fixtures::{FAKE_GCLOUD, SERVICE_TEMPLATE, VALID_INPUTS};

/// Variables that must not leak from the developer's shell into tests
const ISOLATED_VARS: &[&str] = &[
    "SLACK_BOT_TOKEN",
    "SLACK_SIGNING_SECRET",
    "SPREADSHEET_KEY",
    "PROJECT_ID",
    "PROJECT_NUMBER",
    "LOCATION",
    "STAMP_SERVICE",
    "STAMP_REGION",
    "STAMP_UNMATCHED",
    "STAMP_GCLOUD",
    "RUST_LOG",
    "LC_ALL",
    "CI",
    "GITHUB_ACTIONS",
    "FAKE_DEFAULT_PROJECT",
    "FAKE_DESCRIBE_FAIL",
    "FAKE_DEPLOY_FAIL",
];

/// Result of running a Stamp CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l).unwrap_or_else(|e| panic!("not JSON ({e}): {l}"))
            })
            .collect()
    }
}

/// Isolated test environment
pub struct TestEnv {
    /// Working directory for the run
    pub project_root: TempDir,
    /// HOME / XDG_CONFIG_HOME, so user config never leaks in
    pub home_dir: TempDir,
    /// Holds the fake gcloud and its log
    pub bin_dir: TempDir,
    env: Vec<(String, String)>,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Path of the fake gcloud
    pub fn gcloud_path(&self) -> PathBuf {
        self.bin_dir.path().join("gcloud")
    }

    /// Arguments the fake gcloud received for `run deploy`, if it ran
    pub fn deploy_log(&self) -> Option<Vec<String>> {
        std::fs::read_to_string(self.bin_dir.path().join("gcloud.log"))
            .ok()
            .map(|s| s.lines().map(str::to_string).collect())
    }

    /// Read a file under the project root
    pub fn read(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.project_path(relative)).ok()
    }

    /// Write a file under the project root
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.project_path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    /// Run stamp from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run stamp from the project root with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_stamp"));
        cmd.current_dir(self.project_root.path()).args(args);

        for key in ISOLATED_VARS {
            cmd.env_remove(key);
        }
        cmd.env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env("TERM", "dumb")
            .env("STAMP_GCLOUD", self.gcloud_path());

        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        output_to_result(cmd.output().expect("Failed to execute stamp"))
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for `TestEnv`
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    env: Vec<(String, String)>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Project with `service.yaml.template` and a `.gitignore` covering the artifact
    pub fn with_service_template(self) -> Self {
        self.with_file("service.yaml.template", SERVICE_TEMPLATE)
            .with_file(".gitignore", "service.yaml\n")
    }

    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// All required inputs plus `PROJECT_ID`
    pub fn with_valid_inputs(mut self) -> Self {
        for (key, value) in VALID_INPUTS {
            self = self.with_env(key, value);
        }
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            project_root: TempDir::new().unwrap(),
            home_dir: TempDir::new().unwrap(),
            bin_dir: TempDir::new().unwrap(),
            env: self.env,
        };

        for (relative, content) in &self.files {
            env.write(relative, content);
        }
        install_fake_gcloud(&env.gcloud_path());

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn install_fake_gcloud(path: &Path) {
    std::fs::write(path, FAKE_GCLOUD).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
}
