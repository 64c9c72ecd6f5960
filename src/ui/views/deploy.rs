use std::path::Path;

use stamp::domain::entities::UnmatchedPlaceholder;
use stamp::domain::ports::Stage;
use stamp::DeployOutcome;

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct DeployHeader<'a> {
    pub action: &'a str,
    pub template: &'a Path,
    pub output: &'a Path,
    pub service: &'a str,
    pub region: &'a str,
    pub dry_run: bool,
}

pub fn render_deploy_header(
    header: &DeployHeader<'_>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = if header.action.eq_ignore_ascii_case("render") {
        Icon::Render
    } else {
        Icon::Deploy
    };
    let mut block = CommandHeader::new(icon, format!("Stamp {}", header.action));
    block.add("Template", header.template.display().to_string());
    block.add("Output", header.output.display().to_string());
    block.add("Service", format!("{} ({})", header.service, header.region));
    if header.dry_run {
        block.add("Mode", "dry run (nothing written)");
    }
    block.render(supports_color, supports_unicode)
}

pub fn render_stage_line(
    icon: Icon,
    stage: Stage,
    detail: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let name = format!("{:<10}", stage.as_str());
    format!(
        "  {} {} {}\n",
        icon.colored(supports_color, supports_unicode),
        name,
        ColoredText::dim(detail).render(supports_color)
    )
}

pub fn render_unmatched(
    unmatched: &UnmatchedPlaceholder,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let lines = unmatched
        .lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "  {} placeholder ${{{}}} has no input (line {})\n",
        Icon::Warning.colored(supports_color, supports_unicode),
        unmatched.name,
        lines
    )
}

pub fn render_deploy_summary(
    action: &str,
    outcome: &DeployOutcome,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let clean = outcome.unmatched.is_empty();
    let title = if clean {
        format!("{action} Complete")
    } else {
        format!("{action} Complete with warnings")
    };

    let mut summary = if clean {
        ResultSummary::success(title)
    } else {
        ResultSummary::partial(title)
    };

    summary.add_stat(
        "project",
        format!("{} ({})", outcome.project_id, outcome.project_number),
    );
    summary.add_stat("digest", &outcome.digest);
    if outcome.artifact_written {
        summary.add_stat("artifact", outcome.output.display());
    }
    if !outcome.deployed {
        summary.add_stat("command", &outcome.command);
    }

    if !clean {
        summary.add_warning(format!(
            "{} placeholder(s) left unfilled",
            outcome.unmatched.len()
        ));
    }

    if !outcome.artifact_written {
        summary.with_next_step("Run `stamp deploy` without --dry-run to apply");
    } else if !outcome.deployed {
        summary.with_next_step("Run `stamp deploy` to push it to Cloud Run");
    }

    summary.render(supports_color, supports_unicode)
}
