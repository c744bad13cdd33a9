//! Output formatting for CLI results

use colored::{ColoredString, Colorize};

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::models::display::{FindingDisplay, SummaryDisplay};
use crate::models::{AuditResult, Severity};

pub mod json;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

impl Formattable for AuditResult {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(render_report(self)),
            OutputFormat::Table => {
                let rows: Vec<FindingDisplay> =
                    self.findings.iter().map(FindingDisplay::from).collect();
                Ok(format!(
                    "{}\n{}",
                    table::format_table(&[SummaryDisplay::from(self)]),
                    table::format_table(&rows)
                ))
            }
            OutputFormat::Json => json::format_json(self).map_err(Error::Json),
        }
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::Critical => "CRITICAL".red().bold(),
        Severity::High => "HIGH".red(),
        Severity::Medium => "MEDIUM".yellow(),
        Severity::Low => "LOW".dimmed(),
    }
}

fn score_label(score: u8) -> ColoredString {
    let text = format!("{score}/100");
    match score {
        80..=100 => text.green().bold(),
        50..=79 => text.yellow().bold(),
        _ => text.red().bold(),
    }
}

/// Human-oriented report for the default pretty format.
fn render_report(result: &AuditResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        "Security Audit:".bold(),
        result.file_name.bold().cyan()
    ));
    out.push_str(&format!("Score: {}\n", score_label(result.score)));
    out.push_str(&format!("{}\n\n", result.summary));

    if result.findings.is_empty() {
        out.push_str(&format!(
            "{}\n",
            "No exploitable vulnerabilities found.".green()
        ));
        return out;
    }

    for finding in &result.findings {
        out.push_str(&format!(
            "{} {} (lines {}-{}, confidence {}%)\n",
            severity_label(finding.severity),
            finding.name.bold(),
            finding.line_start,
            finding.line_end,
            finding.confidence
        ));
        if let Some(cwe) = &finding.cwe_id {
            let owasp = finding.owasp_category.as_deref().unwrap_or("-");
            out.push_str(&format!("  {} {} / {}\n", "Refs:".dimmed(), cwe, owasp));
        }
        out.push_str(&format!("  {} {}\n", "Issue:".dimmed(), finding.description));
        out.push_str(&format!("  {} {}\n", "Risk:".dimmed(), finding.risk));
        out.push_str(&format!(
            "  {} {}\n",
            "Attack:".dimmed(),
            finding.attack_scenario
        ));
        out.push_str(&format!("  {} {}\n\n", "Fix:".dimmed(), finding.fix));
    }

    let breakdown: Vec<String> = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ]
    .iter()
    .filter_map(|s| {
        let n = result.count_by_severity(*s);
        (n > 0).then(|| format!("{n} {s}"))
    })
    .collect();

    out.push_str(&format!(
        "{} finding(s) ({}). Save the report with {} and remediate with {}.\n",
        result.findings.len(),
        breakdown.join(", "),
        "--format json".cyan(),
        "deepaudit fix".cyan()
    ));

    out
}
