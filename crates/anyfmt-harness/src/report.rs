//! Report generation for conformance results.

use serde::{Deserialize, Serialize};

use crate::verify::VerificationSummary;

/// A conformance report over one verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Report title.
    pub title: String,
    /// Engine modes exercised (e.g. `legacy+strict`).
    pub mode: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl ConformanceReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Mode: {}\n", self.mode));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Case | Family | Mode | Template | Status |\n");
        out.push_str("|------|--------|------|----------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} | `{}` | {} |\n",
                r.case_name,
                r.family,
                r.mode,
                r.template.replace('|', "\\|"),
                status
            ));
        }

        let failures: Vec<_> = self.summary.results.iter().filter(|r| !r.passed).collect();
        if !failures.is_empty() {
            out.push_str("\n## Failures\n");
            for r in failures {
                out.push_str(&format!("\n### {} [{}]\n\n```diff\n", r.case_name, r.mode));
                out.push_str(r.diff.as_deref().unwrap_or(""));
                out.push_str("```\n");
            }
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::VerificationResult;

    fn result(name: &str, passed: bool) -> VerificationResult {
        VerificationResult {
            case_name: name.to_string(),
            family: "integer".to_string(),
            mode: "legacy".to_string(),
            template: "%d|%d".to_string(),
            passed,
            expected: "1|2".to_string(),
            actual: if passed { "1|2" } else { "1|3" }.to_string(),
            diff: (!passed).then(|| crate::diff::render_diff("1|2", "1|3")),
        }
    }

    #[test]
    fn markdown_lists_cases_and_failures() {
        let report = ConformanceReport {
            title: "anyfmt Conformance Report".to_string(),
            mode: "legacy".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
            summary: VerificationSummary::from_results(vec![
                result("ok", true),
                result("broken", false),
            ]),
        };
        let md = report.to_markdown();
        assert!(md.contains("- Total: 2"));
        assert!(md.contains("- Failed: 1"));
        assert!(md.contains("`%d\\|%d`"));
        assert!(md.contains("### broken [legacy]"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["summary"]["passed"], 1);
    }
}
