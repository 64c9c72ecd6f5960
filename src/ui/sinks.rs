//! Deploy event sinks for human and NDJSON output

use stamp::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::context::UiContext;
use crate::ui::json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::deploy::{render_stage_line, render_unmatched};

/// Stage lines on stdout
pub struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let (color, unicode) = (self.ui.color, self.ui.unicode);
        let line = match event {
            DeployEvent::StageCompleted { stage, detail } => {
                render_stage_line(Icon::Success, stage, &detail, color, unicode)
            }
            DeployEvent::StageSkipped { stage, reason } => {
                render_stage_line(Icon::Skipped, stage, &reason, color, unicode)
            }
            DeployEvent::StageFailed { stage, error } => {
                render_stage_line(Icon::Error, stage, &error, color, unicode)
            }
            DeployEvent::Unmatched(unmatched) => render_unmatched(&unmatched, color, unicode),
            DeployEvent::InvalidYaml { message } => format!(
                "  {} artifact is not valid YAML: {}\n",
                Icon::Warning.colored(color, unicode),
                message
            ),
            DeployEvent::Started { .. } | DeployEvent::Completed { .. } => return,
        };
        print!("{}", line);
    }
}

/// NDJSON events on stdout
pub struct JsonEventSink {
    command: &'static str,
}

impl JsonEventSink {
    pub fn new(command: &'static str) -> Self {
        Self { command }
    }
}

pub fn event_to_json(command: &str, event: DeployEvent) -> serde_json::Value {
    match event {
        DeployEvent::Started {
            template,
            output,
            service,
        } => serde_json::json!({
            "event": "start",
            "command": command,
            "template": template.display().to_string(),
            "output": output.display().to_string(),
            "service": service,
        }),
        DeployEvent::StageCompleted { stage, detail } => serde_json::json!({
            "event": "stage",
            "stage": stage.as_str(),
            "status": "ok",
            "detail": detail,
        }),
        DeployEvent::StageSkipped { stage, reason } => serde_json::json!({
            "event": "stage",
            "stage": stage.as_str(),
            "status": "skipped",
            "reason": reason,
        }),
        DeployEvent::StageFailed { stage, error } => serde_json::json!({
            "event": "stage",
            "stage": stage.as_str(),
            "status": "failed",
            "error": error,
        }),
        DeployEvent::Unmatched(unmatched) => serde_json::json!({
            "event": "warning",
            "kind": "unmatched_placeholder",
            "placeholder": unmatched.name,
            "lines": unmatched.lines,
        }),
        DeployEvent::InvalidYaml { message } => serde_json::json!({
            "event": "warning",
            "kind": "invalid_yaml",
            "message": message,
        }),
        DeployEvent::Completed { digest, deployed } => serde_json::json!({
            "event": "complete",
            "command": command,
            "digest": digest,
            "deployed": deployed,
        }),
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let _ = json::emit(event_to_json(self.command, event));
    }
}
