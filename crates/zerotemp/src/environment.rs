use std::{fmt, fs, path::Path};

use polecalc_mesh::Square;
use serde::{Deserialize, Serialize};

use crate::{Error, spectrum};

/// The parameters of the zero-temperature model.
///
/// An environment is a plain value: equations update it by returning modified
/// copies. It reads and writes the JSON layout of the historical parameter
/// files, with PascalCase keys and missing keys taking their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Environment {
    /// Points per side of the Brillouin-zone mesh.
    pub grid_length: u32,
    /// Worker threads used by each mesh reduction.
    pub num_procs: u16,

    /// Number of histogram bins for the imaginary part of the bare Green's
    /// function.
    pub im_gc0_bins: usize,
    /// Samples per side of the principal-value integral for its real part.
    pub re_gc0_points: usize,
    /// Initial half-width excluded around the pole in that integral.
    #[serde(rename = "ReGc0dw")]
    pub re_gc0_dw: f64,

    pub init_d1: f64,
    pub init_mu: f64,
    pub init_f0: f64,

    /// Sign of the pairing symmetry, `+1` for s-wave and `-1` for d-wave.
    pub alpha: i32,
    /// Electron hopping.
    pub t: f64,
    pub t0: f64,
    pub tz: f64,
    pub thp: f64,
    /// Hole doping.
    pub x: f64,
    #[serde(rename = "DeltaS")]
    pub delta_s: f64,
    #[serde(rename = "CS")]
    pub cs: f64,
    pub superconducting: bool,

    pub d1: f64,
    pub mu: f64,
    pub f0: f64,
    /// Minimum of the bare dispersion over the mesh.
    pub epsilon_min: f64,
}

impl Environment {
    /// Parses an environment from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the text is not a valid environment.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads an environment from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Json`] if
    /// its contents are not a valid environment.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the environment as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the environment to a JSON file, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        fs::write(path, self.to_json_string()?)?;
        Ok(())
    }

    /// Prepares a freshly loaded environment for solving.
    ///
    /// Copies the initial guesses into `D1`, `Mu`, and `F0`, then computes
    /// `EpsilonMin` for the new `D1`.
    pub fn initialize(&mut self) {
        self.d1 = self.init_d1;
        self.mu = self.init_mu;
        self.f0 = self.init_f0;
        self.epsilon_min = spectrum::epsilon_min(self);
    }

    /// Effective hopping `T0 (1 - X)`.
    #[must_use]
    pub fn th(&self) -> f64 {
        self.t0 * (1.0 - self.x)
    }

    /// Largest spinon energy scale, `sqrt(DeltaS² + 2 CS²)`.
    #[must_use]
    pub fn lambda(&self) -> f64 {
        (self.delta_s * self.delta_s + 2.0 * self.cs * self.cs).sqrt()
    }

    /// The Brillouin-zone mesh for this environment.
    #[must_use]
    pub fn square(&self) -> Square {
        Square::new(self.grid_length)
    }

    /// Worker threads for mesh reductions, at least one.
    #[must_use]
    pub fn workers(&self) -> usize {
        usize::from(self.num_procs).max(1)
    }

    /// Bit patterns of every field, for exact hashing and comparison.
    ///
    /// Two environments have the same fingerprint exactly when every field
    /// holds the same bits, so NaN fields compare equal to themselves and
    /// `0.0` differs from `-0.0`.
    #[must_use]
    pub fn fingerprint(&self) -> [u64; 21] {
        [
            u64::from(self.grid_length),
            u64::from(self.num_procs),
            self.im_gc0_bins as u64,
            self.re_gc0_points as u64,
            self.re_gc0_dw.to_bits(),
            self.init_d1.to_bits(),
            self.init_mu.to_bits(),
            self.init_f0.to_bits(),
            u64::from(u32::from_ne_bytes(self.alpha.to_ne_bytes())),
            self.t.to_bits(),
            self.t0.to_bits(),
            self.tz.to_bits(),
            self.thp.to_bits(),
            self.x.to_bits(),
            self.delta_s.to_bits(),
            self.cs.to_bits(),
            u64::from(self.superconducting),
            self.d1.to_bits(),
            self.mu.to_bits(),
            self.f0.to_bits(),
            self.epsilon_min.to_bits(),
        ]
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
