//! Pure renderers: each takes props and returns a string.

use std::fmt::Write as _;

use crate::compare::Comparison;
use crate::error::AppResult;
use ps_metrics::MetricKey;
use crate::run_service::{EstimateReport, RunMode};
use crate::session::{SessionView, StatusEntry, StatusLevel};

/// Escape text for HTML element and attribute content.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Results table fragment: gains, plant, one row per metric, heuristic note.
pub fn render_results_html(report: &EstimateReport) -> String {
    let mut html = String::new();
    html.push_str("<section class=\"results\">\n");
    let _ = writeln!(
        html,
        "  <p class=\"gains\">Kp = {}, Ki = {}, Kd = {}</p>",
        report.gains.kp, report.gains.ki, report.gains.kd
    );
    if let Some(base) = &report.baseline {
        let _ = writeln!(
            html,
            "  <p class=\"baseline\">Auto-tuned from baseline Kp = {}, Ki = {}, Kd = {}</p>",
            base.kp, base.ki, base.kd
        );
    }
    let _ = writeln!(
        html,
        "  <p class=\"plant\">Plant: {}</p>",
        escape_html(&report.plant.summary())
    );
    html.push_str("  <table class=\"metrics\">\n");
    html.push_str("    <thead><tr><th>Metric</th><th>Value</th><th>Unit</th></tr></thead>\n");
    html.push_str("    <tbody>\n");
    for entry in &report.metrics {
        let _ = writeln!(
            html,
            "      <tr data-key=\"{}\"><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.key.name(),
            escape_html(entry.key.label()),
            escape_html(&entry.value),
            escape_html(entry.unit)
        );
    }
    html.push_str("    </tbody>\n  </table>\n");
    if report.heuristic {
        let _ = writeln!(
            html,
            "  <p class=\"notice\">{}</p>",
            escape_html(EstimateReport::HEURISTIC_NOTICE)
        );
    }
    html.push_str("</section>\n");
    html
}

/// Plain-text results table for terminals.
pub fn render_results_text(report: &EstimateReport) -> String {
    let mut out = String::new();
    if report.mode == RunMode::AutoTune {
        if let Some(base) = &report.baseline {
            let _ = writeln!(
                out,
                "Baseline gains: Kp={} Ki={} Kd={}",
                base.kp, base.ki, base.kd
            );
        }
    }
    let _ = writeln!(
        out,
        "Gains: Kp={} Ki={} Kd={}",
        report.gains.kp, report.gains.ki, report.gains.kd
    );
    let _ = writeln!(out, "Plant: {}", report.plant.summary());
    out.push('\n');
    for entry in &report.metrics {
        let _ = writeln!(
            out,
            "  {:<20} {:>10} {}",
            entry.key.label(),
            entry.value,
            entry.unit
        );
    }
    if report.heuristic {
        out.push('\n');
        let _ = writeln!(out, "Note: {}", EstimateReport::HEURISTIC_NOTICE);
    }
    out
}

/// Pretty-printed JSON report.
pub fn render_results_json(report: &EstimateReport) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Comparison table fragment: one row per gain set, best set marked.
pub fn render_comparison_html(comparison: &Comparison) -> String {
    let mut html = String::from("<section class=\"comparison\">\n");
    let _ = writeln!(
        html,
        "  <p class=\"plant\">Plant: {}</p>",
        escape_html(&comparison.plant.summary())
    );
    html.push_str("  <table class=\"metrics\">\n    <thead><tr><th>Gain set</th><th>Kp</th><th>Ki</th><th>Kd</th>");
    for key in MetricKey::ALL {
        let _ = write!(html, "<th>{}</th>", escape_html(key.label()));
    }
    html.push_str("</tr></thead>\n    <tbody>\n");
    for (idx, row) in comparison.rows.iter().enumerate() {
        let class = if comparison.is_best(idx) { " class=\"best\"" } else { "" };
        let _ = write!(
            html,
            "      <tr{class}><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            escape_html(&row.name),
            row.gains.kp,
            row.gains.ki,
            row.gains.kd
        );
        for entry in &row.metrics {
            let _ = write!(html, "<td>{}</td>", escape_html(&entry.value));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("    </tbody>\n  </table>\n");
    let best = comparison.best_row();
    let _ = writeln!(
        html,
        "  <p class=\"best\">Best: {} (IAE = {})</p>",
        escape_html(&best.name),
        escape_html(best.metrics.value(MetricKey::Iae))
    );
    if comparison.heuristic {
        let _ = writeln!(
            html,
            "  <p class=\"notice\">{}</p>",
            escape_html(EstimateReport::HEURISTIC_NOTICE)
        );
    }
    html.push_str("</section>\n");
    html
}

/// Plain-text comparison table.
pub fn render_comparison_text(comparison: &Comparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Plant: {}", comparison.plant.summary());
    out.push('\n');
    let _ = write!(out, "  {:<14} {:>8} {:>8} {:>8}", "Gain set", "Kp", "Ki", "Kd");
    for key in MetricKey::ALL {
        let _ = write!(out, " {:>10}", key.name());
    }
    out.push('\n');
    for (idx, row) in comparison.rows.iter().enumerate() {
        let marker = if comparison.is_best(idx) { '*' } else { ' ' };
        let _ = write!(
            out,
            "{marker} {:<14} {:>8} {:>8} {:>8}",
            row.name, row.gains.kp, row.gains.ki, row.gains.kd
        );
        for entry in &row.metrics {
            let _ = write!(out, " {:>10}", entry.value);
        }
        out.push('\n');
    }
    let best = comparison.best_row();
    out.push('\n');
    let _ = writeln!(
        out,
        "Best: {} (IAE = {}, Kp={} Ki={} Kd={})",
        best.name,
        best.metrics.value(MetricKey::Iae),
        best.gains.kp,
        best.gains.ki,
        best.gains.kd
    );
    if comparison.heuristic {
        let _ = writeln!(out, "Note: {}", EstimateReport::HEURISTIC_NOTICE);
    }
    out
}

pub fn render_comparison_json(comparison: &Comparison) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(comparison)?)
}

fn level_class(level: StatusLevel) -> &'static str {
    match level {
        StatusLevel::Info => "info",
        StatusLevel::Success => "success",
        StatusLevel::Error => "error",
    }
}

/// Status log as a list, oldest first.
pub fn render_status_html<'a>(entries: impl IntoIterator<Item = &'a StatusEntry>) -> String {
    let mut html = String::from("<ul class=\"status\">\n");
    for entry in entries {
        let _ = writeln!(
            html,
            "  <li class=\"{}\"><time>{}</time> {}</li>",
            level_class(entry.level),
            entry.at.format("%H:%M:%S"),
            escape_html(&entry.text)
        );
    }
    html.push_str("</ul>\n");
    html
}

/// Standalone HTML page for a session.
pub fn render_page_html(view: &SessionView<'_>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(view.name));
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<h1>{}</h1>", escape_html(view.name));
    let _ = writeln!(
        html,
        "<p class=\"state\">Status: {}</p>",
        escape_html(view.state.label())
    );
    match view.report {
        Some(report) => html.push_str(&render_results_html(report)),
        None => html.push_str("<p class=\"empty\">No results yet.</p>\n"),
    }
    html.push_str(&render_status_html(view.status));
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
    }
}
