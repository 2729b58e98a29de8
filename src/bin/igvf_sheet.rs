use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use igvf_sample_sheet::app::{App, ProgressEvent, ProgressSink, RunOutputs, RunResult};
use igvf_sample_sheet::catalog::{Credentials, IgvfHttpClient};
use igvf_sample_sheet::config::{ConfigLoader, ConfigOverrides};
use igvf_sample_sheet::domain::AnalysisSetId;
use igvf_sample_sheet::error::{ErrorKind, SheetError};
use igvf_sample_sheet::output::{JsonOutput, OutputMode};

#[derive(Parser)]
#[command(name = "igvf-sheet")]
#[command(about = "Build per-sample R1/R2 file tables from an IGVF analysis set")]
#[command(version, author)]
struct Cli {
    #[arg(short = 'i', long, help = "Analysis set accession, e.g. IGVFDS0001")]
    analysis_set_id: String,

    #[arg(long, env = "IGVF_ACCESS_KEY", hide_env_values = true)]
    access_key: String,

    #[arg(long, env = "IGVF_SECRET_KEY", hide_env_values = true)]
    secret_key: String,

    #[arg(long, help = "Per-sample table [default: per_sample_file.tsv]")]
    per_sample_output: Option<String>,

    #[arg(long, help = "Analysis set table [default: analysis_sets.tsv]")]
    analysis_set_output: Option<String>,

    #[arg(long, help = "JSON config file [default: igvf-sheet.json if present]")]
    config: Option<String>,

    #[arg(long, help = "Catalog API base URL")]
    endpoint: Option<String>,

    #[arg(long)]
    timeout_secs: Option<u64>,

    #[arg(long, help = "Print a JSON run summary instead of confirmations")]
    json: bool,
}

struct TextOutput;

impl ProgressSink for TextOutput {
    fn event(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::AnalysisSetsSaved(path) => {
                println!("Successfully saved analysis sets data to {path}");
            }
            ProgressEvent::PerSampleSaved(path) => {
                println!("Successfully saved per-sample data to {path}");
            }
        }
    }
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<SheetError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &SheetError) -> u8 {
    match error.kind() {
        ErrorKind::Transport => 3,
        ErrorKind::Configuration => 2,
        ErrorKind::Processing => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let overrides = ConfigOverrides {
        endpoint: cli.endpoint,
        timeout_secs: cli.timeout_secs,
        analysis_set_output: cli.analysis_set_output.map(Utf8PathBuf::from),
        per_sample_output: cli.per_sample_output.map(Utf8PathBuf::from),
    };
    let resolved = ConfigLoader::resolve(cli.config.as_deref(), overrides)?;
    let analysis_set: AnalysisSetId = cli.analysis_set_id.parse()?;

    let client = IgvfHttpClient::new(
        resolved.endpoint,
        Credentials::new(cli.access_key, cli.secret_key),
        resolved.timeout,
    )?;
    let app = App::new(client);
    let outputs = RunOutputs {
        analysis_set_output: resolved.analysis_set_output,
        per_sample_output: resolved.per_sample_output,
    };

    match output_mode {
        OutputMode::Text => {
            app.run(&analysis_set, &outputs, &TextOutput)?;
        }
        OutputMode::Json => {
            let result: RunResult = app.run(&analysis_set, &outputs, &JsonOutput)?;
            JsonOutput::print_run(&result).into_diagnostic()?;
        }
    }
    Ok(())
}
