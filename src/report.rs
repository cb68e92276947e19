//! Text and JSON rendering of mining results

use crate::model::{MiningReport, Rule};
use clap::ValueEnum;

/// Output format for the mining report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render one rule as a three-line block with percentages
pub fn format_rule(rule: &Rule) -> String {
    format!(
        "Rule: [{}] => [{}]\n   Support: {:.1}% | Confidence: {:.1}%\n---\n",
        rule.antecedent,
        rule.consequent,
        rule.support * 100.0,
        rule.confidence * 100.0
    )
}

/// Render the whole report for the console
pub fn render_text(report: &MiningReport) -> String {
    let mut out = format!(
        "Min support: {:.1}% | Min confidence: {:.1}%\n",
        report.thresholds.min_support * 100.0,
        report.thresholds.min_confidence * 100.0
    );
    out.push_str(&format!(
        "Total transactions: {}\n",
        report.total_transactions
    ));
    out.push_str(&format!(
        "Frequent items ({} of {}): [{}]\n",
        report.frequent_items.len(),
        report.universe.len(),
        report.frequent_items.join(", ")
    ));
    out.push('\n');

    if report.rules.is_empty() {
        out.push_str("No rules met the thresholds.\n");
    } else {
        for rule in &report.rules {
            out.push_str(&format_rule(rule));
        }
    }

    out
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &MiningReport) -> crate::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn render(report: &MiningReport, format: OutputFormat) -> crate::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}
