use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use log::debug;
use polecalc_core::Vector2;
use polecalc_solvers::spline::CubicSpline;

use crate::Environment;

/// Identifies a Green's-function spline by environment and k-point.
///
/// Keys compare floating-point fields by their bit patterns, so they can be
/// hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GreenKey {
    env: [u64; 21],
    k: [u64; 2],
}

impl GreenKey {
    #[must_use]
    pub fn new(env: &Environment, k: Vector2) -> Self {
        Self {
            env: env.fingerprint(),
            k: [k.x.to_bits(), k.y.to_bits()],
        }
    }
}

/// Memoized splines of the imaginary part of the bare Green's function.
///
/// Building one spline costs a full mesh reduction, so pole searches share a
/// cache for the duration of a run. The cache is safe to share between
/// threads; the lock is held only for lookups and inserts, never while a
/// spline is being built.
#[derive(Debug, Default)]
pub struct GreenCache {
    splines: Mutex<HashMap<GreenKey, Arc<CubicSpline>>>,
}

impl GreenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of cached splines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn contains(&self, env: &Environment, k: Vector2) -> bool {
        self.lock().contains_key(&GreenKey::new(env, k))
    }

    #[must_use]
    pub fn get(&self, env: &Environment, k: Vector2) -> Option<Arc<CubicSpline>> {
        self.lock().get(&GreenKey::new(env, k)).cloned()
    }

    /// Stores `spline` for `(env, k)`, replacing any previous entry.
    pub fn set(&self, env: &Environment, k: Vector2, spline: CubicSpline) {
        self.lock().insert(GreenKey::new(env, k), Arc::new(spline));
    }

    /// Returns the spline for `(env, k)`, building it with `build` on a miss.
    ///
    /// If two threads miss on the same key at once, both build a spline and
    /// the first to finish is kept and returned to both.
    ///
    /// # Errors
    ///
    /// Returns the error from `build`; nothing is cached in that case.
    pub fn get_or_try_insert_with<F, E>(
        &self,
        env: &Environment,
        k: Vector2,
        build: F,
    ) -> Result<Arc<CubicSpline>, E>
    where
        F: FnOnce() -> Result<CubicSpline, E>,
    {
        let key = GreenKey::new(env, k);
        if let Some(spline) = self.lock().get(&key) {
            return Ok(Arc::clone(spline));
        }

        debug!("green cache miss at k = {k}");
        let spline = Arc::new(build()?);
        Ok(Arc::clone(self.lock().entry(key).or_insert(spline)))
    }

    /// Drops every cached spline.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // A panic while holding the lock cannot leave the map half-updated.
    fn lock(&self) -> MutexGuard<'_, HashMap<GreenKey, Arc<CubicSpline>>> {
        self.splines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
