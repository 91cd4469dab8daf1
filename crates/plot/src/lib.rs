//! Plot emission.
//!
//! A [`Graph`] is a JSON document: global parameters at the top level plus a
//! `series` array whose entries carry their own string parameters and a
//! `data` array of `[x, y]` pairs. A [`Plotter`] writes the document to a file
//! and runs an external program on it, blocking until the program exits.

mod error;
mod graph;
mod plotter;

pub use error::Error;
pub use graph::{Graph, Series};
pub use plotter::{Plotter, write_json};
