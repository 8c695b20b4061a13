//! Integration test: every conformance fixture passes under every mode.

use std::path::{Path, PathBuf};

use anyfmt_harness::{FixtureSet, RunMode, TestRunner, VerificationSummary};

fn workspace_root() -> PathBuf {
    let manifest = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest)
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    workspace_root().join("tests/conformance/fixtures")
}

#[test]
fn fixture_dir_loads_without_skips() {
    let (sets, skipped) = FixtureSet::load_dir(&fixture_dir()).expect("fixture dir readable");
    assert!(skipped.is_empty(), "unparseable fixtures: {skipped:?}");

    let families: Vec<&str> = sets.iter().map(|s| s.family.as_str()).collect();
    for family in ["exhaustion", "float", "integer", "mismatch", "text"] {
        assert!(families.contains(&family), "missing family {family}");
    }
    for set in &sets {
        assert_eq!(set.version, "v1", "{}", set.family);
        assert!(!set.cases.is_empty(), "{} has no cases", set.family);
    }
}

#[test]
fn all_fixtures_pass_in_every_mode() {
    let (sets, _) = FixtureSet::load_dir(&fixture_dir()).unwrap();
    let mut results = Vec::new();
    for mode in RunMode::ALL {
        let runner = TestRunner::new("integration", mode);
        for set in &sets {
            results.extend(runner.run(set));
        }
    }

    let summary = VerificationSummary::from_results(results);
    let failures: Vec<String> = summary
        .results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| {
            format!(
                "{}/{} [{}]\n{}",
                r.family,
                r.case_name,
                r.mode,
                r.diff.as_deref().unwrap_or("")
            )
        })
        .collect();
    assert!(summary.all_passed(), "failures:\n{}", failures.join("\n"));
    assert!(summary.total > 0);
}

#[test]
fn mode_specific_cases_run_only_in_their_mode() {
    let set = FixtureSet::from_file(&fixture_dir().join("exhaustion.json")).unwrap();
    let legacy = TestRunner::new("integration", RunMode::Legacy).run(&set);
    let strict = TestRunner::new("integration", RunMode::Strict).run(&set);

    assert!(legacy.iter().all(|r| r.mode == "legacy"));
    assert!(strict.iter().all(|r| r.mode == "strict"));
    assert!(
        strict
            .iter()
            .any(|r| r.actual == "error:argument_underflow")
    );
    assert!(
        legacy
            .iter()
            .all(|r| !r.actual.starts_with("error:"))
    );
}
