//! CLI entrypoint for the anyfmt conformance harness.

use std::path::PathBuf;

use anyfmt_core::{Formatter, Value};
use anyfmt_harness::structured_log::{
    ArtifactIndex, LogEmitter, LogEntry, LogLevel, now_utc, validate_log_file,
};
use anyfmt_harness::{
    ConformanceReport, FixtureArg, FixtureSet, RunMode, TestRunner, VerificationSummary,
};
use clap::{Parser, Subcommand};

/// Conformance tooling for anyfmt.
#[derive(Debug, Parser)]
#[command(name = "anyfmt-harness")]
#[command(about = "Conformance testing harness for anyfmt")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render one template with typed arguments and print the result.
    Render {
        /// Template to render.
        template: String,
        /// Arguments as `kind:value` (e.g. `i32:-1`, `str:hello`, `f64:1.5`).
        args: Vec<String>,
        /// Fail when directives outnumber arguments instead of echoing.
        #[arg(long)]
        strict: bool,
    },
    /// Verify the engine against fixture sets.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long, default_value = "tests/conformance/fixtures")]
        fixture: PathBuf,
        /// Modes to run (`legacy`, `strict`); both when omitted.
        #[arg(long = "mode")]
        modes: Vec<String>,
        /// Output report path (markdown; a `.json` twin is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Validate a structured JSONL log produced by `verify`.
    ValidateLog {
        /// JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            template,
            args,
            strict,
        } => {
            let parsed = args
                .iter()
                .map(|a| FixtureArg::parse_literal(a))
                .collect::<Result<Vec<_>, _>>()?;
            let values: Vec<Value<'_>> = parsed.iter().map(FixtureArg::to_value).collect();
            let mode = if strict {
                RunMode::Strict
            } else {
                RunMode::Legacy
            };
            let out = Formatter::new(mode.options()).render(&template, &values)?;
            println!("{out}");
        }
        Command::Verify {
            fixture,
            modes,
            report,
            log,
            timestamp,
        } => {
            eprintln!("Verifying against fixtures in {}", fixture.display());
            let (fixture_sets, skipped) = FixtureSet::load_dir(&fixture)?;
            for (path, err) in &skipped {
                eprintln!("Skipping {path}: {err}");
            }

            let modes = if modes.is_empty() {
                RunMode::ALL.to_vec()
            } else {
                modes
                    .iter()
                    .map(|m| RunMode::parse(m))
                    .collect::<Result<Vec<_>, _>>()?
            };
            let mode_label = modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join("+");

            let run_id = format!("verify-{}", std::process::id());
            let mut emitter = match &log {
                Some(path) => LogEmitter::to_file(path, "harness", &run_id)?,
                None => LogEmitter::sink("harness", &run_id),
            };
            emitter.emit_entry(
                LogEntry::new("", LogLevel::Info, "verify_start").with_details(
                    serde_json::json!({
                        "fixture_dir": fixture.display().to_string(),
                        "sets": fixture_sets.len(),
                        "skipped": skipped.len(),
                        "modes": mode_label,
                    }),
                ),
            )?;

            let mut results = Vec::new();
            for mode in &modes {
                let runner = TestRunner::new("fixture-verify", *mode);
                for set in &fixture_sets {
                    results.extend(runner.run_logged(set, &mut emitter)?);
                }
            }

            // Stabilize report ordering for reproducible output.
            results.sort_by(|a, b| {
                a.family
                    .cmp(&b.family)
                    .then_with(|| a.case_name.cmp(&b.case_name))
                    .then_with(|| a.mode.cmp(&b.mode))
            });

            let summary = VerificationSummary::from_results(results);
            let report_doc = ConformanceReport {
                title: String::from("anyfmt Conformance Report"),
                mode: mode_label,
                timestamp: timestamp.unwrap_or_else(now_utc),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            let mut artifacts = Vec::new();
            if let Some(report_path) = &report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;

                let mut index = ArtifactIndex::new(&run_id);
                index
                    .add_file(report_path, "report_markdown")?
                    .add_file(&json_path, "report_json")?;
                let index_path = report_path.with_extension("artifacts.json");
                std::fs::write(&index_path, index.to_json()?)?;
                artifacts.extend(index.artifacts.into_iter().map(|a| a.path));
                artifacts.push(index_path.display().to_string());
            }

            let level = if report_doc.summary.all_passed() {
                LogLevel::Info
            } else {
                LogLevel::Error
            };
            emitter.emit_entry(
                LogEntry::new("", level, "verify_complete")
                    .with_artifacts(artifacts)
                    .with_details(serde_json::json!({
                        "total": report_doc.summary.total,
                        "passed": report_doc.summary.passed,
                        "failed": report_doc.summary.failed,
                    })),
            )?;
            emitter.flush()?;

            if !report_doc.summary.all_passed() {
                return Err("Conformance verification failed".into());
            }
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!("Validated {lines} lines, {} errors", errors.len());
            if !errors.is_empty() {
                return Err(format!("{} invalid log lines", errors.len()).into());
            }
        }
    }

    Ok(())
}
