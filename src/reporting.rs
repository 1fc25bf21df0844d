// Reporting and output for devflow-check
// Console text for per-candidate verdicts and the final summary, plus JSON

use crate::models::{display_field, Outcome, ScanReport, ScanResult};
use serde::Serialize;
use std::fmt;

/// The line(s) printed right after a candidate has been tested.
pub fn render_outcome(client_id: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Vulnerable(grant) => format!(
            "  [VULNERABLE] Found user_code: {}",
            display_field(Some(&grant.user_code))
        ),
        Outcome::Unclassified(body) => {
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            format!(
                "  [WARN] Response received but no user_code found\n     Response: {}",
                pretty
            )
        }
        Outcome::InvalidResponse(failure) | Outcome::NoResponse(failure) => format!(
            "  [ERROR] {}: {}\n  [ERROR] No valid response",
            client_id, failure
        ),
    }
}

/// Horizontal rule used in the banner and the summary header.
pub const RULE: &str = "============================================================";

/// End-of-scan summary, rendered through `Display`.
pub struct Summary<'a>(pub &'a ScanReport);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "SUMMARY")?;
        writeln!(f, "{}", RULE)?;

        let vulnerable = report.vulnerable_count();
        if vulnerable > 0 {
            writeln!(f, "VULNERABLE CONNECTED APPS FOUND: {}", vulnerable)?;
            writeln!(f)?;
            for (client_id, grant) in report.vulnerable() {
                writeln!(f, " Client ID: {}", client_id)?;
                writeln!(f, "   User Code: {}", display_field(Some(&grant.user_code)))?;
                writeln!(f, "   Device Code: {}", display_field(grant.device_code.as_ref()))?;
                writeln!(
                    f,
                    "   Verification URI: {}",
                    display_field(grant.verification_uri.as_ref())
                )?;
                writeln!(f, "   Interval: {}", display_field(grant.interval.as_ref()))?;
                writeln!(f)?;
            }
        } else {
            writeln!(f, "No vulnerable client IDs found")?;
        }

        writeln!(f, "Total tested: {}", report.tested())?;
        writeln!(f, "Vulnerable: {}", vulnerable)?;
        writeln!(f, "Secure: {}", report.secure_count())
    }
}

/// Human readable end-of-scan summary.
pub fn render_summary(report: &ScanReport) -> String {
    Summary(report).to_string()
}

#[derive(Serialize)]
struct JsonReport<'a> {
    target: &'a str,
    total_tested: usize,
    vulnerable: usize,
    secure: usize,
    results: &'a [ScanResult],
}

/// Pretty JSON rendering of the whole report, counts included.
pub fn render_json(report: &ScanReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        target: &report.target,
        total_tested: report.tested(),
        vulnerable: report.vulnerable_count(),
        secure: report.secure_count(),
        results: &report.results,
    })
}
