use std::{panic, thread};

use crossbeam_channel::bounded;
use log::trace;
use polecalc_core::Vector2;

use crate::Square;

/// Points buffered between the mesh producer and the workers.
const CHANNEL_CAPACITY: usize = 1024;

/// Folds per-point values into a single result.
///
/// Each worker thread owns one reducer created by the factory passed to
/// [`reduce`]. When the mesh is exhausted the per-worker reducers are merged
/// and [`Reducer::result`] is taken from the merged one. Because points reach
/// workers in no fixed order, `absorb` and `merge` must be associative and
/// commutative.
pub trait Reducer: Send {
    /// The value computed for each mesh point.
    type Value;

    /// The final result of the reduction.
    type Output;

    /// Folds the value computed at one point.
    fn absorb(&mut self, value: Self::Value);

    /// Folds another reducer's partial result into this one.
    fn merge(&mut self, other: Self);

    /// Returns the result of the reduction.
    fn result(self) -> Self::Output;
}

/// Maps `worker` over every point of `square` and folds the values.
///
/// A producer streams points through a bounded channel to `workers` threads
/// (at least one). Each thread applies `worker` and absorbs the value into its
/// own reducer from `factory`. Closing the channel after the last point is the
/// only termination signal. Once every thread has drained the channel, the
/// reducers are merged and the result returned.
///
/// # Panics
///
/// Re-raises a panic from `worker` or the reducer on the calling thread.
pub fn reduce<R, W, F>(square: Square, workers: usize, worker: W, factory: F) -> R::Output
where
    R: Reducer,
    W: Fn(Vector2) -> R::Value + Sync,
    F: Fn() -> R + Sync,
{
    let workers = workers.max(1);
    let (sender, receiver) = bounded::<Vector2>(CHANNEL_CAPACITY);
    let worker = &worker;
    let factory = &factory;

    trace!("reducing {} mesh points on {workers} workers", square.len());

    let merged = thread::scope(|scope| {
        let producer = scope.spawn(move || {
            for point in square {
                if sender.send(point).is_err() {
                    break;
                }
            }
        });

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let receiver = receiver.clone();
                scope.spawn(move || {
                    let mut reducer = factory();
                    for point in receiver {
                        reducer.absorb(worker(point));
                    }
                    reducer
                })
            })
            .collect();
        drop(receiver);

        let mut merged = factory();
        for handle in handles {
            match handle.join() {
                Ok(reducer) => merged.merge(reducer),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        if let Err(payload) = producer.join() {
            panic::resume_unwind(payload);
        }
        merged
    });

    merged.result()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts points and sums their x coordinates exactly (as integers).
    #[derive(Default)]
    struct Tally {
        count: u64,
        columns: u64,
    }

    impl Reducer for Tally {
        type Value = u64;
        type Output = (u64, u64);

        fn absorb(&mut self, value: u64) {
            self.count += 1;
            self.columns += value;
        }

        fn merge(&mut self, other: Self) {
            self.count += other.count;
            self.columns += other.columns;
        }

        fn result(self) -> (u64, u64) {
            (self.count, self.columns)
        }
    }

    fn column(square: Square) -> impl Fn(Vector2) -> u64 + Sync {
        move |point| {
            let offset = (point.x + std::f64::consts::PI) / square.step();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let column = offset.round() as u64;
            column
        }
    }

    #[test]
    fn every_point_is_visited_once() {
        let square = Square::new(33);
        // Each column 0..33 appears 33 times.
        let expected_columns = 33 * (32 * 33 / 2);

        for workers in [0, 1, 3, 8] {
            let (count, columns) = reduce(square, workers, column(square), Tally::default);
            assert_eq!(count, 33 * 33, "{workers} workers");
            assert_eq!(columns, expected_columns, "{workers} workers");
        }
    }

    #[test]
    fn empty_mesh_yields_fresh_reducer() {
        let (count, _) = reduce(Square::new(0), 4, |_| 1, Tally::default);
        assert_eq!(count, 0);
    }

    #[test]
    #[should_panic(expected = "worker failed")]
    fn worker_panics_propagate() {
        reduce(
            Square::new(4),
            2,
            |point: Vector2| -> u64 {
                assert!(point.x < 0.0, "worker failed");
                0
            },
            Tally::default,
        );
    }
}
