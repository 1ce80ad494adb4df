//! Latency sketches used by the `profiler` feature of rangekit.
//!
//! A [Sketch] is cheap to clone and shares its underlying DDSketch, which lets a
//! [Measure] guard record into it on drop without borrowing the owning structure.
#![deny(missing_docs)]

use core::cell::RefCell;
use minstant::Instant;
use sketches_ddsketch::{Config, DDSketch};
use std::rc::Rc;

/// Records the elapsed time of the enclosing scope into the given [Sketch]
#[macro_export]
macro_rules! profile_scope {
    ($sketch:expr) => {
        let _measure = $crate::Measure::new($sketch);
    };
}

/// Sample count and latency quantiles of a [Sketch], in nanoseconds
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of recorded samples
    pub count: usize,
    /// Fastest sample
    pub min: f64,
    /// Median
    pub median: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Slowest sample
    pub max: f64,
}

/// A shared latency sketch
#[derive(Clone)]
pub struct Sketch {
    inner: Rc<RefCell<DDSketch>>,
}

impl Default for Sketch {
    fn default() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DDSketch::new(Config::defaults()))),
        }
    }
}

impl Sketch {
    /// Adds a single sample to the sketch
    #[inline]
    pub fn add(&self, data: f64) {
        self.inner.borrow_mut().add(data)
    }
    /// Returns the number of samples recorded so far
    pub fn count(&self) -> usize {
        self.inner.borrow().count()
    }
    /// Summarises the samples recorded so far
    ///
    /// An empty sketch summarises to all zeroes.
    pub fn summary(&self) -> Summary {
        let sketch = self.inner.borrow();
        let quantile = |q| sketch.quantile(q).ok().flatten().unwrap_or(0.0);
        Summary {
            count: sketch.count(),
            min: sketch.min().unwrap_or(0.0),
            median: quantile(0.5),
            p95: quantile(0.95),
            p99: quantile(0.99),
            max: sketch.max().unwrap_or(0.0),
        }
    }
}

/// Scope guard that records its lifetime into a [Sketch] when dropped
pub struct Measure {
    start: Instant,
    sketch: Sketch,
}

impl Measure {
    /// Starts a new measurement
    #[inline]
    pub fn new(sketch: &Sketch) -> Measure {
        Measure {
            sketch: sketch.clone(),
            start: Instant::now(),
        }
    }
}

impl Drop for Measure {
    #[inline]
    fn drop(&mut self) {
        self.sketch.add(self.start.elapsed().as_nanos() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_records_on_drop() {
        let sketch = Sketch::default();
        {
            profile_scope!(&sketch);
        }
        {
            profile_scope!(&sketch);
        }
        assert_eq!(sketch.count(), 2);
        assert_eq!(sketch.summary().count, 2);
    }

    #[test]
    fn empty_sketch_summary() {
        assert_eq!(Sketch::default().summary(), Summary::default());
    }

    #[test]
    fn summary_bounds() {
        let sketch = Sketch::default();
        for sample in 1..=100 {
            sketch.add(sample as f64);
        }
        let summary = sketch.summary();
        assert_eq!(summary.count, 100);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert!(summary.min <= summary.median && summary.median <= summary.p99);
    }

    #[test]
    fn clones_share_samples() {
        let sketch = Sketch::default();
        let other = sketch.clone();
        other.add(42.0);
        assert_eq!(sketch.count(), 1);
    }
}
