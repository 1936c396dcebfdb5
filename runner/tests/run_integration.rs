//! End-to-end runs against a fixture script standing in for the analyzer:
//! spawn, concurrent stream draining, exit-code handling, report decode.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use rucop_runner::{AnalysisSession, RunError, RunnerConfig, SessionEvent, task};

const TWO_FILE_REPORT: &str = r#"{
    "metadata": {"rubocop_version": "0.27.0"},
    "files": [
        {"path": "Gemfile", "offenses": []},
        {"path": "test.rb", "offenses": [
            {"severity": "convention", "message": "Prefer single-quoted strings.",
             "cop_name": "Style/StringLiterals",
             "location": {"line": 5, "column": 7, "length": 11}},
            {"severity": "warning", "message": "`end` is not aligned with `if`",
             "cop_name": "Lint/EndAlignment",
             "location": {"line": 11, "column": 7, "length": 3}}
        ]}
    ],
    "summary": {"offense_count": 2}
}"#;

/// Write an executable script that plays the analyzer: dumps a canned stdout
/// payload, a canned stderr payload, then exits with `exit_code`.
fn fixture_tool(dir: &Path, stdout_body: &str, stderr_body: &str, exit_code: i32) -> PathBuf {
    let stdout_file = dir.join("stdout.payload");
    let stderr_file = dir.join("stderr.payload");
    fs::write(&stdout_file, stdout_body).unwrap();
    fs::write(&stderr_file, stderr_body).unwrap();

    let script = dir.join("fake-rubocop");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\ncat '{}'\ncat '{}' >&2\nexit {}\n",
            stdout_file.display(),
            stderr_file.display(),
            exit_code
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn fixture_config(script: &Path) -> RunnerConfig {
    RunnerConfig {
        command: script.to_string_lossy().into_owned(),
        ..RunnerConfig::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_parses_report_and_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let script = fixture_tool(
        dir.path(),
        TWO_FILE_REPORT,
        "Warning: unrecognized cop Style/CaseIndentation found in .rubocop.yml\nInspecting 2 files\n",
        1,
    );

    let report = task::run(
        &fixture_config(&script),
        dir.path(),
        &[PathBuf::from("test.rb")],
    )
    .await
    .unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.file_results()[0].path(), "Gemfile");
    assert!(report.file_results()[0].is_empty());
    assert_eq!(report.file_results()[1].offenses().len(), 2);
    assert_eq!(report.file_results()[1].offenses_at(5).count(), 1);
    assert_eq!(report.file_results()[1].offenses_at(11).count(), 1);
    assert_eq!(
        report.warnings(),
        ["unrecognized cop Style/CaseIndentation found in .rubocop.yml"]
    );
}

// Both payloads are several times the usual 64 KiB OS pipe buffer. The
// script writes stdout to completion before touching stderr, so this
// deadlocks unless both pipes are drained concurrently.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn run_survives_payloads_larger_than_pipe_buffer() {
    let dir = tempfile::tempdir().unwrap();

    let long_message = "x".repeat(512);
    let offenses: Vec<String> = (1..=600)
        .map(|line| {
            format!(
                r#"{{"severity":"convention","message":"{long_message}","cop_name":"Style/Bulk","location":{{"line":{line},"column":1,"length":3}}}}"#
            )
        })
        .collect();
    let big_report = format!(
        r#"{{"files":[{{"path":"big.rb","offenses":[{}]}}]}}"#,
        offenses.join(",")
    );
    assert!(big_report.len() > 256 * 1024);

    let noise_line = format!("{}\n", "n".repeat(255));
    let big_stderr = noise_line.repeat(1200);
    assert!(big_stderr.len() > 256 * 1024);

    let script = fixture_tool(dir.path(), &big_report, &big_stderr, 1);
    let report = task::run(
        &fixture_config(&script),
        dir.path(),
        &[PathBuf::from("big.rb")],
    )
    .await
    .unwrap();

    assert_eq!(report.len(), 1);
    assert_eq!(report.file_results()[0].offenses().len(), 600);
    assert!(report.warnings().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abnormal_exit_does_not_discard_parsed_report() {
    let dir = tempfile::tempdir().unwrap();
    let script = fixture_tool(dir.path(), r#"{"files":[]}"#, "", 2);

    let report = task::run(&fixture_config(&script), dir.path(), &[])
        .await
        .unwrap();
    assert!(report.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn parse_failure_surfaces_raw_output() {
    let dir = tempfile::tempdir().unwrap();
    let script = fixture_tool(
        dir.path(),
        "bundler: command not found: rubocop\n",
        "Install missing gem executables with `bundle install`\n",
        127,
    );

    let err = task::run(&fixture_config(&script), dir.path(), &[])
        .await
        .unwrap_err();

    match &err {
        RunError::ParseFailed { stdout, stderr, .. } => {
            assert!(stdout.contains("command not found"));
            assert!(stderr.contains("bundle install"));
        }
        other => panic!("expected ParseFailed, got {other:?}"),
    }
    assert!(err.hints().iter().any(|h| h.contains("bundle install")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn launch_failure_for_missing_tool() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunnerConfig {
        command: dir.path().join("no-such-tool").to_string_lossy().into_owned(),
        ..RunnerConfig::default()
    };

    let err = task::run(&config, dir.path(), &[]).await.unwrap_err();
    match err {
        RunError::LaunchFailed { workdir, .. } => assert_eq!(workdir, dir.path()),
        other => panic!("expected LaunchFailed, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn session_merges_completed_runs() {
    let dir = tempfile::tempdir().unwrap();
    let script = fixture_tool(dir.path(), TWO_FILE_REPORT, "", 1);

    let (session, mut events) =
        AnalysisSession::new(fixture_config(&script), dir.path().to_path_buf());

    session
        .spawn_run(vec![PathBuf::from("test.rb")])
        .await
        .unwrap();

    match events.recv().await {
        Some(SessionEvent::Updated { files }) => assert_eq!(files, 2),
        other => panic!("expected Updated, got {other:?}"),
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.len(), 2);
    let test_rb = snapshot.lookup("test.rb").unwrap();
    assert_eq!(test_rb.offenses().len(), 2);
    assert!(snapshot.lookup("Gemfile").unwrap().is_empty());
    assert!(snapshot.lookup("missing.rb").is_none());
}
