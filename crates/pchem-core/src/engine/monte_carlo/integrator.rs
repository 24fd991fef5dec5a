use nalgebra::Point3;
use tracing::{debug, instrument};

use super::sampler::{Drawer, SamplingDistribution};
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;

pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

/// Sample mean of `f/g` and its standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub mean: f64,
    pub std_error: f64,
    pub samples: usize,
}

impl Estimate {
    /// Multiplies the estimate by a constant, e.g. a symmetry factor.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            mean: self.mean * factor,
            std_error: self.std_error * factor.abs(),
            samples: self.samples,
        }
    }
}

/// Running mean and squared deviations, updated one sample at a time.
#[derive(Debug, Default)]
struct Accumulator {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Accumulator {
    #[inline]
    fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn finish(self) -> Estimate {
        let std_error = if self.count > 1 {
            (self.m2 / (self.count - 1) as f64 / self.count as f64).sqrt()
        } else {
            f64::NAN
        };
        Estimate {
            mean: self.mean,
            std_error,
            samples: self.count,
        }
    }
}

pub struct MonteCarlo<F, D> {
    integrand: F,
    drawer: Drawer<D>,
}

impl<F, D> MonteCarlo<F, D>
where
    F: Fn(&Point3<f64>) -> f64,
    D: SamplingDistribution,
{
    pub fn new(integrand: F, drawer: Drawer<D>) -> Self {
        Self { integrand, drawer }
    }

    pub fn drawer(&self) -> &Drawer<D> {
        &self.drawer
    }

    /// Estimates `∫ f` from `n` samples, drawn `chunk_size` at a time.
    ///
    /// The drawer is reseeded first, so repeated calls are reproducible, and samples are
    /// folded in draw order, so the result does not depend on `chunk_size`.
    #[instrument(skip(self, reporter), name = "monte_carlo_integrate")]
    pub fn integrate(
        &mut self,
        n: usize,
        chunk_size: usize,
        reporter: &ProgressReporter,
    ) -> Result<Estimate, EngineError> {
        if n == 0 {
            return Err(EngineError::invalid("n", "sample count must be positive"));
        }
        if chunk_size == 0 {
            return Err(EngineError::invalid("chunk_size", "must be positive"));
        }
        self.drawer.reseed();

        let full_chunks = n / chunk_size;
        let remainder = n % chunk_size;
        let chunk_sizes =
            std::iter::repeat_n(chunk_size, full_chunks).chain((remainder > 0).then_some(remainder));
        debug!(full_chunks, remainder, "Sampling in chunks.");

        let task = reporter.task((full_chunks + usize::from(remainder > 0)) as u64);
        let mut acc = Accumulator::default();
        for size in chunk_sizes {
            for point in self.drawer.draw(size) {
                let density = self.drawer.pdf(&point);
                if !(density > 0.0) {
                    return Err(EngineError::invalid(
                        "pdf",
                        format!("proposal density vanished at a drawn point ({point})"),
                    ));
                }
                acc.push((self.integrand)(&point) / density);
            }
            task.tick();
        }
        Ok(acc.finish())
    }
}
