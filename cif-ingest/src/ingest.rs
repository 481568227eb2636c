//! File-level ingest driver.
//!
//! A file is read one line at a time into a single reader, strictly in
//! order. Separate files share nothing, so [`ingest_all`] reads them
//! concurrently, each on its own blocking task with its own reader and sink.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use futures::future::join_all;
use tracing::{debug, info};

use crate::config::IngestConfig;
use crate::format::Format;
use crate::reader::ReadError;
use crate::sink::{RowSink, SinkError};

/// Errors that stop a file from being ingested.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line was rejected; `line` counts from 1
    #[error("{}:{line}: {source}", path.display())]
    Line {
        path: PathBuf,
        line: usize,
        #[source]
        source: ReadError,
    },

    /// The input ended early or the sink could not be flushed
    #[error("{}: {source}", path.display())]
    Finish {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("{}: cannot open output: {source}", path.display())]
    Sink {
        path: PathBuf,
        #[source]
        source: SinkError,
    },

    #[error("{}: no known format uses this extension", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("{}: ingest task failed: {message}", path.display())]
    Task { path: PathBuf, message: String },
}

impl IngestError {
    /// The input file the error concerns.
    pub fn path(&self) -> &Path {
        match self {
            IngestError::Io { path, .. }
            | IngestError::Line { path, .. }
            | IngestError::Finish { path, .. }
            | IngestError::Sink { path, .. }
            | IngestError::UnknownFormat { path }
            | IngestError::Task { path, .. } => path,
        }
    }
}

/// Outcome of ingesting one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: PathBuf,
    pub format: Format,
    /// Lines read, including any banner line.
    pub lines: usize,
}

/// Read a whole file of `format` into `sink`.
///
/// Stops at the first line that cannot be read. Rows already emitted stay
/// emitted; undoing them is up to the sink.
pub fn ingest_file<S>(
    path: &Path,
    format: Format,
    sink: S,
    config: &IngestConfig,
) -> Result<FileSummary, IngestError>
where
    S: RowSink + Send,
{
    let io_error = |source| IngestError::Io {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;
    let mut input = BufReader::new(file);
    let mut reader = format.reader(sink);

    info!(path = %path.display(), %format, "ingesting file");

    let mut line = String::new();
    let mut number = 0;
    loop {
        line.clear();
        if input.read_line(&mut line).map_err(io_error)? == 0 {
            break;
        }
        number += 1;
        if number == 1 && format.has_header_line() {
            continue;
        }

        reader
            .process(&line)
            .map_err(|source| IngestError::Line {
                path: path.to_owned(),
                line: number,
                source,
            })?;

        if config.progress_every > 0 && number % config.progress_every == 0 {
            debug!(path = %path.display(), lines = number, "progress");
        }
    }

    reader.finish().map_err(|source| IngestError::Finish {
        path: path.to_owned(),
        source,
    })?;

    info!(path = %path.display(), %format, lines = number, "finished file");
    Ok(FileSummary {
        path: path.to_owned(),
        format,
        lines: number,
    })
}

/// Ingest every `(path, format)` job concurrently.
///
/// `make_sink` is called once per job, before any reading starts. Results
/// come back in the order of `jobs`; one file failing does not stop the
/// others.
pub async fn ingest_all<S, F>(
    jobs: Vec<(PathBuf, Format)>,
    mut make_sink: F,
    config: &IngestConfig,
) -> Vec<Result<FileSummary, IngestError>>
where
    S: RowSink + Send + 'static,
    F: FnMut(&Path, Format) -> Result<S, IngestError>,
{
    let tasks: Vec<_> = jobs
        .into_iter()
        .map(|(path, format)| {
            let sink = make_sink(&path, format);
            run_job(path, format, sink, config.clone())
        })
        .collect();
    join_all(tasks).await
}

async fn run_job<S>(
    path: PathBuf,
    format: Format,
    sink: Result<S, IngestError>,
    config: IngestConfig,
) -> Result<FileSummary, IngestError>
where
    S: RowSink + Send + 'static,
{
    let sink = sink?;
    let task_path = path.clone();
    tokio::task::spawn_blocking(move || ingest_file(&task_path, format, sink, &config))
        .await
        .map_err(|e| IngestError::Task {
            path,
            message: e.to_string(),
        })?
}
