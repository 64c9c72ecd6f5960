//! `stamp check`

use std::path::Path;

use anyhow::Result;
use stamp::application::{CheckReport, CheckTarget};
use stamp::{run_check, CheckStatus};

use crate::presentation::cli::TemplateArgs;
use crate::presentation::factory::create_context;
use crate::ui::ci::{github_actions_annotation, is_github_actions, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::views::check::{render_check_header, render_check_report, render_check_summary};

pub fn cmd_check(
    config: Option<&Path>,
    env_file: Option<&Path>,
    template: &TemplateArgs,
    strict_warnings: bool,
    ui: &UiContext,
) -> Result<()> {
    let ctx = create_context(config, env_file, template, ui.json)?;
    super::print_config_warnings(ctx.config_path.as_deref(), &ctx.config_warnings, ui);

    if ui.json {
        let _ = crate::ui::json::emit(serde_json::json!({
            "event": "start",
            "command": "check",
            "strict_warnings": strict_warnings,
        }));
    } else {
        print!(
            "{}",
            render_check_header(
                &ctx.config.template.source,
                ctx.config_path.as_deref(),
                strict_warnings,
                ui.color,
                ui.unicode,
            )
        );
    }

    let target = CheckTarget {
        root: &ctx.root,
        config: &ctx.config,
        inputs: &ctx.inputs,
        gcloud_available: ctx.gcloud.is_available(),
    };
    let report = run_check(&target, &ctx.gcloud, &ctx.store);

    let has_issues = !report.is_success() || (strict_warnings && report.warnings() > 0);

    if ui.json {
        emit_json(&report, has_issues);
    } else {
        print!("{}", render_check_report(&report, ui.color, ui.unicode));
        print!(
            "{}",
            render_check_summary(&report, strict_warnings, ui.color, ui.unicode)
        );
        if ui.caps.is_ci && is_github_actions() {
            emit_github_annotations(&report);
        }
    }

    if has_issues {
        std::process::exit(1);
    }

    Ok(())
}

fn emit_json(report: &CheckReport, has_issues: bool) {
    let mut out = std::io::stdout().lock();
    for item in &report.items {
        let _ = crate::ui::json::write_event(
            &mut out,
            &serde_json::json!({
                "event": "check",
                "command": "check",
                "group": item.group,
                "name": item.name,
                "status": item.status.as_str(),
                "message": item.message,
                "recommendation": item.recommendation,
            }),
        );
    }
    let _ = crate::ui::json::write_event(
        &mut out,
        &serde_json::json!({
            "event": "complete",
            "command": "check",
            "passed": report.passes(),
            "warnings": report.warnings(),
            "errors": report.errors(),
            "success": !has_issues,
        }),
    );
}

fn emit_github_annotations(report: &CheckReport) {
    for item in &report.items {
        let level = match item.status {
            CheckStatus::Pass => continue,
            CheckStatus::Warning => AnnotationLevel::Warning,
            CheckStatus::Error => AnnotationLevel::Error,
        };
        println!(
            "{}",
            github_actions_annotation(
                level,
                &format!("{}: {}", item.name, item.message),
                None,
                None,
                Some(&format!("Stamp {}", item.group)),
            )
        );
    }
}
