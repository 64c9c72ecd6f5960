use std::path::Path;

use stamp::CheckReport;

use crate::ui::blocks::check_item::render_check_item;
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_check_header(
    template: &Path,
    config: Option<&Path>,
    strict_warnings: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Check, "Stamp Check");
    header.add("Template", template.display().to_string());
    header.add(
        "Config",
        config
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "defaults".to_string()),
    );
    if strict_warnings {
        header.add("Strict", "failing on warnings");
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_check_report(
    report: &CheckReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    let mut current_group: Option<&str> = None;
    for item in &report.items {
        if current_group != Some(item.group.as_str()) {
            out.push('\n');
            out.push_str(&item.group);
            out.push('\n');
            current_group = Some(item.group.as_str());
        }
        out.push_str(&render_check_item(item, supports_color, supports_unicode));
    }

    out
}

pub fn render_check_summary(
    report: &CheckReport,
    strict_warnings: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let warnings = report.warnings();
    let failed = !report.is_success() || (strict_warnings && warnings > 0);

    let title = if failed {
        "Check FAILED"
    } else if warnings > 0 {
        "Check passed with warnings"
    } else {
        "All checks passed"
    };

    let mut summary = if failed || warnings > 0 {
        ResultSummary::partial(title)
    } else {
        ResultSummary::success(title)
    };

    summary.add_stat("passed", report.passes());
    summary.add_stat("warnings", warnings);
    summary.add_stat("errors", report.errors());
    if !failed {
        summary.with_next_step("Run `stamp deploy`");
    }

    summary.render(supports_color, supports_unicode)
}
