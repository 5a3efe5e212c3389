mod config;
mod discover;

use camino::Utf8PathBuf;
use clap::Parser;
use errfix_edit::{repair_file, RepairOptions};
use errfix_types::{FileReport, FileStatus, RunSummary};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "errfix",
    version,
    about = "Repairs malformed error-construction literals in Rust sources."
)]
struct Cli {
    /// File or directory to repair.
    #[arg(default_value = "src")]
    path: Utf8PathBuf,

    /// Extension filter for directory walks [default: rs, or the config
    /// file's `extension`].
    #[arg(long)]
    ext: Option<String>,

    /// Compute repairs without writing anything back.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Print a unified diff for each changed file.
    #[arg(long, default_value_t = false)]
    diff: bool,

    /// Explicit config file (default: errfix.toml beside the target).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match real_main() {
        Ok(summary) if summary.failed > 0 => ExitCode::from(1),
        Ok(_) => ExitCode::from(0),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<RunSummary> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&cli.path)?,
    };
    let schemas = file_config.resolve_schemas();
    anyhow::ensure!(!schemas.is_empty(), "no schemas registered");

    // An explicit --ext beats the config file's extension.
    let ext = cli
        .ext
        .as_deref()
        .or(file_config.extension.as_deref())
        .unwrap_or("rs");
    let targets = discover::collect_targets(&cli.path, ext)?;
    debug!(
        "repairing {} file(s) under {} with {} schema(s)",
        targets.len(),
        cli.path,
        schemas.len()
    );

    let opts = RepairOptions {
        dry_run: cli.dry_run,
    };

    let mut summary = RunSummary::default();
    let mut reports = Vec::with_capacity(targets.len());
    for path in &targets {
        let report = match repair_file(path, &schemas, &opts) {
            Ok((report, patch)) => {
                if cli.diff && !patch.is_empty() {
                    print!("{patch}");
                }
                report
            }
            Err(err) => FileReport::failed(path.clone(), format!("{err:#}")),
        };

        summary.record(&report);
        if matches!(cli.format, OutputFormat::Text) {
            println!("{}", report_line(&report, cli.dry_run));
        }
        reports.push(report);
    }

    if matches!(cli.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    info!(
        "done: {} changed, {} unchanged, {} failed",
        summary.changed, summary.unchanged, summary.failed
    );
    Ok(summary)
}

fn report_line(report: &FileReport, dry_run: bool) -> String {
    match report.status {
        FileStatus::Changed => format!(
            "{} {} ({} of {} literal(s) repaired)",
            if dry_run { "would change" } else { "changed" },
            report.path,
            report.literals_repaired,
            report.literals_seen
        ),
        FileStatus::Unchanged => format!("unchanged {}", report.path),
        FileStatus::Failed => format!(
            "failed {}: {}",
            report.path,
            report.message.as_deref().unwrap_or("unknown error")
        ),
    }
}
