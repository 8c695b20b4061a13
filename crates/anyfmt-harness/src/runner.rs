//! Test execution engine.

use std::time::Instant;

use anyfmt_core::{Exhausted, FormatOptions, Formatter, Value};

use crate::diff;
use crate::error::HarnessError;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Engine configuration a fixture runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Default options: exhausted arguments echo the next character.
    Legacy,
    /// Exhausted arguments raise `ArgumentUnderflow`.
    Strict,
}

impl RunMode {
    pub const ALL: [Self; 2] = [Self::Legacy, Self::Strict];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Strict => "strict",
        }
    }

    pub fn parse(mode: &str) -> Result<Self, HarnessError> {
        match mode.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "strict" => Ok(Self::Strict),
            _ => Err(HarnessError::UnknownMode(mode.to_string())),
        }
    }

    #[must_use]
    pub const fn options(self) -> FormatOptions {
        match self {
            Self::Legacy => FormatOptions {
                on_exhausted: Exhausted::EchoNext,
            },
            Self::Strict => FormatOptions::strict(),
        }
    }
}

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
    /// Mode being tested.
    pub mode: RunMode,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>, mode: RunMode) -> Self {
        Self {
            campaign: campaign.into(),
            mode,
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        self.run_inner(fixture_set, |_, _| Ok(()))
            .unwrap_or_default()
    }

    /// Run all fixtures, emitting one structured log line per case.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        self.run_inner(fixture_set, |result, latency_ns| {
            let (level, outcome) = if result.passed {
                (LogLevel::Info, Outcome::Pass)
            } else {
                (LogLevel::Warn, Outcome::Fail)
            };
            let mut entry = LogEntry::new("", level, "case_result")
                .with_case(&fixture_set.family, &result.case_name)
                .with_mode(self.mode.as_str())
                .with_outcome(outcome)
                .with_latency_ns(latency_ns);
            if !result.passed {
                entry = entry.with_details(serde_json::json!({
                    "campaign": self.campaign,
                    "template": result.template,
                    "expected": result.expected,
                    "actual": result.actual,
                }));
            }
            log.emit_entry(entry)
        })
    }

    fn run_inner(
        &self,
        fixture_set: &FixtureSet,
        mut on_result: impl FnMut(&VerificationResult, u64) -> std::io::Result<()>,
    ) -> std::io::Result<Vec<VerificationResult>> {
        let formatter = Formatter::new(self.mode.options());
        let mut results = Vec::new();
        for case in fixture_set
            .cases
            .iter()
            .filter(|case| mode_matches(self.mode, &case.mode))
        {
            let started = Instant::now();
            let actual = execute_case(&formatter, case);
            let latency_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);

            let expected = case.expectation();
            let passed = actual == expected;
            let case_name = if case.mode.eq_ignore_ascii_case("both") {
                format!("{} [{}]", case.name, self.mode.as_str())
            } else {
                case.name.clone()
            };
            let result = VerificationResult {
                case_name,
                family: fixture_set.family.clone(),
                mode: self.mode.as_str().to_string(),
                template: case.template.clone(),
                passed,
                diff: (!passed).then(|| diff::render_diff(&expected, &actual)),
                expected,
                actual,
            };
            on_result(&result, latency_ns)?;
            results.push(result);
        }
        Ok(results)
    }
}

fn mode_matches(active: RunMode, case_mode: &str) -> bool {
    case_mode.eq_ignore_ascii_case("both") || case_mode.eq_ignore_ascii_case(active.as_str())
}

/// Render one case; failures come back as `error:<code>`.
fn execute_case(formatter: &Formatter, case: &FixtureCase) -> String {
    let args: Vec<Value<'_>> = case.args.iter().map(|a| a.to_value()).collect();
    match formatter.render(&case.template, &args) {
        Ok(out) => out,
        Err(err) => format!("error:{}", err.code()),
    }
}
