use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cif_ingest::config::IngestConfig;
use cif_ingest::format::Format;
use cif_ingest::ingest::{IngestError, ingest_all};
use cif_ingest::sink::JsonLinesSink;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = match IngestConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: cif-ingest FILE...");
        eprintln!();
        eprintln!("Formats are chosen by extension: mca, ztr, msn, alf, tsi.");
        eprintln!("Rows are written to <CIF_OUTPUT_DIR>/<file name>.jsonl.");
        return ExitCode::FAILURE;
    }

    let mut failed = false;
    let mut jobs = Vec::new();
    for path in paths {
        match Format::from_path(&path) {
            Some(format) if config.wants(format) => jobs.push((path, format)),
            Some(format) => info!(path = %path.display(), %format, "skipping file"),
            None => {
                error!("{}", IngestError::UnknownFormat { path });
                failed = true;
            }
        }
    }

    let output_dir = config.output_dir.clone();
    let results = ingest_all(
        jobs,
        |path, _| {
            let name = path.file_name().unwrap_or(path.as_os_str());
            let mut output = output_dir.join(name);
            output.as_mut_os_string().push(".jsonl");
            JsonLinesSink::create(&output).map_err(|source| IngestError::Sink {
                path: path.to_owned(),
                source,
            })
        },
        &config,
    )
    .await;

    let mut total = 0;
    for result in results {
        match result {
            Ok(summary) => total += summary.lines,
            Err(e) => {
                error!("{e}");
                failed = true;
            }
        }
    }

    if failed {
        warn!(lines = total, "finished with errors");
        ExitCode::FAILURE
    } else {
        info!(lines = total, "finished");
        ExitCode::SUCCESS
    }
}
