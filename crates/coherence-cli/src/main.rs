mod args;
mod registry;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use coherence_core::{Error as CoreError, REPORT_VERSION, RedactedEndpoint, redact_endpoint};
use coherence_eval::{
    EvalError, StructurednessEngine, StructurednessReport, format_score, render_report,
};
use coherence_sparql::{HttpGateway, HttpGatewayOptions, ProfileOptions, QueryGateway};
use registry::{
    MetricsArtifact, RunContext, RunOptions, RunPaths, append_output, init_logging, start_run,
    write_metrics, write_report,
};
use settings::{FileConfig, Overrides, Settings, SettingsError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("configuration error: {0}")]
    Settings(#[from] SettingsError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

#[derive(Parser, Debug)]
#[command(
    name = "coherence",
    version,
    about = "Measure the structuredness (coherence) of an RDF dataset behind a SPARQL endpoint"
)]
struct Cli {
    /// SPARQL endpoint URL.
    #[arg(value_name = "ENDPOINT-URL")]
    endpoint: Option<String>,
    /// Restrict every query to this named graph.
    #[arg(long, value_name = "NAMED-GRAPH")]
    named: Option<String>,
    /// Append the type count and score to this tab-separated file.
    #[arg(long, value_name = "OUTPUT")]
    file: Option<PathBuf>,
    /// Per-query timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,
    /// Bearer token for protected endpoints.
    #[arg(long)]
    token: Option<String>,
    /// TOML file with defaults for any of these options.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Directory for run artifacts.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Skip writing run artifacts.
    #[arg(long, default_value_t = false)]
    no_run_dir: bool,
    /// Emit JSON logs on stdout.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            endpoint: self.endpoint.clone(),
            named_graph: self.named.clone(),
            output: self.file.clone(),
            timeout_secs: self.timeout_secs,
            token: self.token.clone(),
            run_dir: self.run_dir.clone(),
            no_run_dir: self.no_run_dir,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse_from(args::normalize_legacy_args(std::env::args_os()));
    run_structuredness(cli).await
}

async fn run_structuredness(cli: Cli) -> Result<(), CliError> {
    let file_config = match &cli.config {
        Some(path) => settings::load_config(path)?,
        None => FileConfig::default(),
    };
    let settings = settings::resolve(cli.overrides(), file_config)?;

    let endpoint = redact_endpoint(&settings.endpoint);
    let run_id = Uuid::new_v4().to_string();

    let run_paths = match &settings.run_dir {
        Some(run_dir) => {
            let ctx = run_context(&settings, &endpoint, &run_id, run_dir.clone());
            Some(start_run(&ctx)?)
        }
        None => None,
    };
    init_logging(
        run_paths.as_ref().map(|paths| paths.logs_path.as_path()),
        cli.json_logs,
    )?;
    if let Some(paths) = &run_paths {
        tracing::info!(event = "run_registered", path = %paths.run_root.display());
    }

    println!("Endpoint:\t{}", endpoint.redacted);
    println!(
        "Named Graph:\t{}",
        settings.named_graph.as_deref().unwrap_or("(all graphs)")
    );

    let gateway = HttpGateway::new(
        &settings.endpoint,
        HttpGatewayOptions {
            timeout: settings.timeout,
            token: settings.token.clone(),
        },
    )?;
    score_and_record(&gateway, &settings, run_paths.as_ref(), &run_id).await?;
    Ok(())
}

fn run_context(
    settings: &Settings,
    endpoint: &RedactedEndpoint,
    run_id: &str,
    run_dir: PathBuf,
) -> RunContext {
    RunContext {
        run_id: run_id.to_string(),
        started_at: chrono::Utc::now(),
        report_version: REPORT_VERSION.to_string(),
        run_dir,
        options: RunOptions {
            named_graph: settings.named_graph.clone(),
            output: settings.output.clone(),
            timeout_secs: settings.timeout.as_secs(),
            authenticated: settings.token.is_some(),
        },
        endpoint: endpoint.clone(),
    }
}

/// Score the dataset behind `gateway`, print the result, then persist it to
/// the run directory and the summary file, in that order.
async fn score_and_record<G: QueryGateway + ?Sized>(
    gateway: &G,
    settings: &Settings,
    run_paths: Option<&RunPaths>,
    run_id: &str,
) -> Result<StructurednessReport, CliError> {
    let endpoint = redact_endpoint(&settings.endpoint);
    tracing::info!(event = "run_started", run_id = %run_id, endpoint = %endpoint.redacted);
    let timer = Instant::now();

    let mut options = ProfileOptions::default().with_request_timeout(settings.timeout);
    if let Some(graph) = &settings.named_graph {
        options = options.with_partition(graph)?;
    }

    let result = StructurednessEngine::new(options).run(gateway).await?;

    println!("Total rdf:types:\t{}", result.report.type_count);
    println!("Structuredness:\t{}", format_score(result.report.structuredness));

    if let Some(paths) = run_paths {
        write_metrics(
            paths,
            &MetricsArtifact {
                run_id,
                report: &result.report,
                performance: &result.performance,
            },
        )?;
        tracing::info!(event = "metrics_written", path = %paths.metrics_path.display());

        write_report(paths, &render_report(&result.report, &endpoint.redacted))?;
        tracing::info!(event = "report_written", path = %paths.report_path.display());
    }

    // The score is already printed and recorded; a failed append still fails the run.
    if let Some(output) = &settings.output {
        append_output(output, &result.report)?;
        tracing::info!(event = "summary_appended", path = %output.display());
    }

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);

    Ok(result.report)
}
