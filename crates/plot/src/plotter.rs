use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    process::Command,
};

use log::{debug, info};

use crate::{Error, Graph};

/// Runs an external program on a graph file.
///
/// The program is invoked as `program args... <json path>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plotter {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for Plotter {
    /// `python3 grapher.py`, the matplotlib front end.
    fn default() -> Self {
        Self {
            program: "python3".to_owned(),
            args: vec!["grapher.py".to_owned()],
        }
    }
}

impl Plotter {
    /// Creates a plotter that runs `program` with leading `args`.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Writes `graph` to `path` as JSON, then runs the plotter on it.
    ///
    /// Blocks until the plotter exits.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] or [`Error::Json`] if the file cannot be written.
    /// - [`Error::Launch`] if the program cannot be started.
    /// - [`Error::ExitStatus`] if it exits unsuccessfully.
    pub fn plot(&self, graph: &Graph, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        write_json(graph, path)?;

        debug!("running {} {:?} {}", self.program, self.args, path.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ExitStatus {
                program: self.program.clone(),
                status,
            });
        }

        info!("plotted {}", path.display());
        Ok(())
    }
}

/// Writes `graph` to `path` as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_json(graph: &Graph, path: impl AsRef<Path>) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, graph)?;
    writer.flush()?;
    Ok(())
}
