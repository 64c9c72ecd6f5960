//! Command handlers

pub mod check;
pub mod deploy;

use std::path::Path;

use stamp::config::ConfigWarning;

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

/// Report unknown config keys without failing the run
pub fn print_config_warnings(path: Option<&Path>, warnings: &[ConfigWarning], ui: &UiContext) {
    if let Some(path) = path {
        tracing::info!(config = %path.display(), "using config file");
    }

    for w in warnings {
        tracing::warn!(key = %w.key, file = %w.file.display(), "unknown config key");

        if ui.json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "kind": "unknown_config_key",
                "key": w.key,
                "file": w.file.display().to_string(),
                "line": w.line,
                "suggestion": w.suggestion,
            }));
            continue;
        }

        let icon = Icon::Warning.colored(ui.color, ui.unicode);
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        eprintln!("{} Unknown config key '{}' in {}", icon, w.key, location);
        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}
