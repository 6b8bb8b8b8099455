use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use coherence_core::RedactedEndpoint;
use coherence_eval::{PerformanceMetrics, StructurednessReport, append_summary};

use super::{RegistryError, RegistryResult};

/// Serializable options for runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunOptions {
    pub named_graph: Option<String>,
    pub output: Option<PathBuf>,
    pub timeout_secs: u64,
    pub authenticated: bool,
}

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub report_version: String,
    pub run_dir: PathBuf,
    pub options: RunOptions,
    pub endpoint: RedactedEndpoint,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub report_version: String,
    pub options: RunOptions,
    pub endpoint: RedactedEndpoint,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Contents of `metrics.json`.
#[derive(Debug, Serialize)]
pub struct MetricsArtifact<'a> {
    pub run_id: &'a str,
    pub report: &'a StructurednessReport,
    pub performance: &'a PerformanceMetrics,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub run_root: PathBuf,
    pub logs_path: PathBuf,
    pub metrics_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let run_root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&run_root)?;

    let config_path = run_root.join("config.json");
    let logs_path = run_root.join("logs.ndjson");
    let metrics_path = run_root.join("metrics.json");
    let report_path = run_root.join("report.md");

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        report_version: ctx.report_version.clone(),
        options: ctx.options.clone(),
        endpoint: ctx.endpoint.clone(),
        git: collect_git_info(),
    };

    write_json(&config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logs_path)?;

    Ok(RunPaths {
        run_root,
        logs_path,
        metrics_path,
        report_path,
    })
}

pub fn write_metrics(paths: &RunPaths, metrics: &MetricsArtifact<'_>) -> RegistryResult<()> {
    write_json(&paths.metrics_path, metrics)
}

pub fn write_report(paths: &RunPaths, markdown: &str) -> RegistryResult<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&paths.report_path)?;
    file.write_all(markdown.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Append the summary lines to the user-requested output file.
pub fn append_output(path: &Path, report: &StructurednessReport) -> RegistryResult<()> {
    append_summary(path, report).map_err(|source| RegistryError::Output {
        path: path.to_path_buf(),
        source,
    })
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coherence_core::{DatasetProfile, TypeStats, redact_endpoint};
    use coherence_eval::aggregate_structuredness;

    fn context(run_dir: &Path) -> RunContext {
        RunContext {
            run_id: "00000000-0000-4000-8000-000000000000".to_string(),
            started_at: DateTime::parse_from_rfc3339("2026-03-01T12:30:00Z")
                .expect("timestamp")
                .with_timezone(&Utc),
            report_version: coherence_core::REPORT_VERSION.to_string(),
            run_dir: run_dir.to_path_buf(),
            options: RunOptions {
                named_graph: None,
                output: None,
                timeout_secs: 60,
                authenticated: false,
            },
            endpoint: redact_endpoint("http://admin:pw@localhost:8890/sparql"),
        }
    }

    #[test]
    fn writes_run_artifacts_without_secrets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = start_run(&context(dir.path())).expect("start run");

        assert!(
            paths
                .run_root
                .ends_with("2026-03-01T12-30-00Z__run_00000000-0000-4000-8000-000000000000")
        );
        assert!(paths.logs_path.exists());

        let config = std::fs::read_to_string(paths.run_root.join("config.json")).expect("config");
        assert!(!config.contains(":pw@"));
        assert!(config.contains("\"timeout_secs\": 60"));

        let report = aggregate_structuredness(&DatasetProfile::new(
            None,
            vec![TypeStats::new("http://ex.org/A", 1).with_predicate("http://ex.org/p", 1)],
        ));
        let performance = PerformanceMetrics {
            profile_ms: 1,
            aggregate_ms: 0,
            total_ms: 1,
        };
        write_metrics(
            &paths,
            &MetricsArtifact {
                run_id: "run",
                report: &report,
                performance: &performance,
            },
        )
        .expect("write metrics");
        let metrics: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&paths.metrics_path).expect("metrics"),
        )
        .expect("parse metrics");
        assert_eq!(metrics["report"]["structuredness"], 1.0);

        write_report(&paths, "# report").expect("write report");
        assert_eq!(
            std::fs::read_to_string(&paths.report_path).expect("report"),
            "# report\n"
        );
    }

    #[test]
    fn summary_append_failure_names_the_output_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let report = aggregate_structuredness(&DatasetProfile::default());

        let err = append_output(dir.path(), &report).expect_err("a directory is not appendable");
        match err {
            RegistryError::Output { path, .. } => assert_eq!(path, dir.path()),
            other => panic!("unexpected error: {other}"),
        }

        let output = dir.path().join("scores.tsv");
        append_output(&output, &report).expect("append");
        append_output(&output, &report).expect("append again");
        let text = std::fs::read_to_string(&output).expect("summary");
        assert_eq!(text.lines().count(), 4);
    }
}
