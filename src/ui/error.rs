use stamp::StampError;

use crate::ui::ci::{github_actions_annotation, is_github_actions, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Suggested fix for an error, if there is an obvious one
fn fix_hint(err: &StampError) -> Option<String> {
    match err {
        StampError::MissingConfiguration { keys } => Some(format!(
            "Export {} or add {} to .env",
            keys.join(", "),
            if keys.len() == 1 { "it" } else { "them" }
        )),
        StampError::ExternalLookupFailure { .. } => Some(
            "Check `gcloud auth list` and that the project id is correct".to_string(),
        ),
        StampError::TemplateMismatch { .. } => Some(
            "Remove the placeholders, or drop --strict / template.unmatched = \"error\"".to_string(),
        ),
        StampError::EnvEncoding { .. } => Some(
            "Remove one of the delimiter characters from the listed values".to_string(),
        ),
        StampError::TemplateNotFound { .. } => {
            Some("Pass --template or set [template].source in stamp.toml".to_string())
        }
        _ => None,
    }
}

fn format_stamp_error_with(err: &StampError, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error("ERROR").bold().render(supports_color),
        err
    );
    if let Some(fix) = fix_hint(err) {
        out.push_str(&format!(
            "  {} {}\n",
            ColoredText::info("FIX:").render(supports_color),
            fix
        ));
    }
    out
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(stamp) = err.downcast_ref::<StampError>() {
        return format_stamp_error_with(stamp, supports_color, supports_unicode);
    }

    format!(
        "{} {} {:#}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        ColoredText::error("ERROR").bold().render(supports_color),
        err
    )
}

/// Exit code for an error; `StampError` carries its own
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<StampError>()
        .map(StampError::exit_code)
        .unwrap_or(1)
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        let mut output = serde_json::json!({
            "event": "error",
            "message": format!("{:#}", err),
            "exit_code": exit_code(err),
        });
        if let Some(StampError::MissingConfiguration { keys }) = err.downcast_ref::<StampError>() {
            output["missing"] = serde_json::json!(keys);
        }
        let _ = crate::ui::json::emit(output);
        return;
    }

    if ui.caps.is_ci && is_github_actions() {
        let file = err
            .downcast_ref::<StampError>()
            .and_then(StampError::file)
            .map(|p| p.to_string_lossy().to_string());
        println!(
            "{}",
            github_actions_annotation(
                AnnotationLevel::Error,
                &format!("{:#}", err),
                file.as_deref(),
                None,
                Some("Stamp"),
            )
        );
    }

    eprint!("{}", format_error(err, ui.color, ui.unicode));
}
