use std::{io, process::ExitStatus};

use thiserror::Error;

/// Errors that can occur while emitting a plot.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to write graph file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to launch plotter `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("plotter `{program}` exited unsuccessfully ({status})")]
    ExitStatus { program: String, status: ExitStatus },
}
