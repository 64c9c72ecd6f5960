//! Test fixtures: templates, inputs, and the fake gcloud script.

/// Template with all five known placeholders
pub const SERVICE_TEMPLATE: &str = r#"apiVersion: serving.knative.dev/v1
kind: Service
metadata:
  name: slack-bot
  annotations:
    run.googleapis.com/project-number: "${PROJECT_NUMBER}"
spec:
  template:
    spec:
      containers:
        - image: gcr.io/${PROJECT_ID}/slack-bot
          env:
            - name: SLACK_BOT_TOKEN
              value: "${SLACK_BOT_TOKEN}"
            - name: SLACK_SIGNING_SECRET
              value: "${SLACK_SIGNING_SECRET}"
            - name: SPREADSHEET_KEY
              value: "${SPREADSHEET_KEY}"
"#;

/// Template referencing a placeholder no input provides
pub const TEMPLATE_WITH_UNKNOWN: &str = r#"project: ${PROJECT_ID}
token: ${SLACK_BOT_TOKEN}
region: ${REGION}
"#;

/// A complete, valid set of required inputs
pub const VALID_INPUTS: &[(&str, &str)] = &[
    ("SLACK_BOT_TOKEN", "xoxb-1"),
    ("SLACK_SIGNING_SECRET", "s1"),
    ("SPREADSHEET_KEY", "sheet1"),
    ("PROJECT_ID", "demo-project"),
];

/// Project number the fake gcloud reports
pub const FAKE_PROJECT_NUMBER: &str = "123456";

/// Fake gcloud.
///
/// - `--version` succeeds
/// - `config get-value project` prints `$FAKE_DEFAULT_PROJECT` or `(unset)`
/// - `projects describe` prints 123456, or fails when `$FAKE_DESCRIBE_FAIL` is set
/// - `run deploy` records its argv (one per line) to `gcloud.log` next to the
///   script, and fails with code 7 when `$FAKE_DEPLOY_FAIL` is set
pub const FAKE_GCLOUD: &str = r#"#!/bin/sh
log="$(dirname "$0")/gcloud.log"
case "$1" in
  --version)
    echo "Google Cloud SDK 0.0.0 (fake)"
    ;;
  config)
    echo "${FAKE_DEFAULT_PROJECT:-(unset)}"
    ;;
  projects)
    if [ -n "$FAKE_DESCRIBE_FAIL" ]; then
      echo "ERROR: (gcloud.projects.describe) project [$3] not found" >&2
      exit 1
    fi
    echo "123456"
    ;;
  run)
    for arg in "$@"; do
      printf '%s\n' "$arg" >> "$log"
    done
    if [ -n "$FAKE_DEPLOY_FAIL" ]; then
      echo "ERROR: (gcloud.run.deploy) build failed using $SLACK_BOT_TOKEN" >&2
      exit 7
    fi
    echo "Service [slack-bot] has been deployed"
    ;;
  *)
    exit 2
    ;;
esac
"#;
