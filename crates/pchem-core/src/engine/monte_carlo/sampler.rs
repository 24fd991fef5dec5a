use nalgebra::Point3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Exp, Gamma as GammaSampler, Normal, Uniform};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;

use crate::core::special::ln_gamma;
use crate::engine::error::EngineError;

pub const DEFAULT_SEED: u64 = 114514;

/// A proposal density on ℝ³ that can be sampled and evaluated.
pub trait SamplingDistribution {
    /// Draws `n` points, consuming the generator in sample order.
    fn draw(&self, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>>;
    fn pdf(&self, point: &Point3<f64>) -> f64;
}

fn draw_axes<D: Distribution<f64>>(axis: &D, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>> {
    (0..n)
        .map(|_| Point3::new(axis.sample(rng), axis.sample(rng), axis.sample(rng)))
        .collect()
}

fn product_pdf(point: &Point3<f64>, axis_pdf: impl Fn(f64) -> f64) -> f64 {
    axis_pdf(point.x) * axis_pdf(point.y) * axis_pdf(point.z)
}

fn require_positive(name: &'static str, value: f64) -> Result<(), EngineError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(EngineError::invalid(
            name,
            format!("must be positive and finite, got {value}"),
        ))
    }
}

/// Uniform on the cube `[low, high)³`.
#[derive(Debug, Clone)]
pub struct UniformBox {
    low: f64,
    high: f64,
    axis: Uniform<f64>,
}

impl UniformBox {
    pub fn new(low: f64, high: f64) -> Result<Self, EngineError> {
        if !(low.is_finite() && high.is_finite() && low < high) {
            return Err(EngineError::invalid(
                "high",
                format!("uniform box needs low < high, got [{low}, {high})"),
            ));
        }
        Ok(Self {
            low,
            high,
            axis: Uniform::new(low, high),
        })
    }

    /// The cube `[−half_width, half_width)³`.
    pub fn centered(half_width: f64) -> Result<Self, EngineError> {
        Self::new(-half_width, half_width)
    }

    pub fn volume(&self) -> f64 {
        (self.high - self.low).powi(3)
    }
}

impl SamplingDistribution for UniformBox {
    fn draw(&self, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>> {
        draw_axes(&self.axis, n, rng)
    }

    fn pdf(&self, point: &Point3<f64>) -> f64 {
        let width = self.high - self.low;
        product_pdf(point, |v| {
            if (self.low..self.high).contains(&v) {
                1.0 / width
            } else {
                0.0
            }
        })
    }
}

/// Independent exponentials with mean `scale` on each axis; support `[0, ∞)³`.
#[derive(Debug, Clone)]
pub struct Exponential {
    scale: f64,
    axis: Exp<f64>,
}

impl Exponential {
    pub fn new(scale: f64) -> Result<Self, EngineError> {
        require_positive("scale", scale)?;
        let axis = Exp::new(1.0 / scale).map_err(|e| EngineError::invalid("scale", e.to_string()))?;
        Ok(Self { scale, axis })
    }
}

impl SamplingDistribution for Exponential {
    fn draw(&self, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>> {
        draw_axes(&self.axis, n, rng)
    }

    fn pdf(&self, point: &Point3<f64>) -> f64 {
        product_pdf(point, |v| {
            if v < 0.0 {
                0.0
            } else {
                (-v / self.scale).exp() / self.scale
            }
        })
    }
}

/// Independent gamma variates with shape `k` and scale `θ`; support `[0, ∞)³`.
#[derive(Debug, Clone)]
pub struct Gamma {
    shape: f64,
    scale: f64,
    ln_norm: f64,
    axis: GammaSampler<f64>,
}

impl Gamma {
    pub fn new(shape: f64, scale: f64) -> Result<Self, EngineError> {
        require_positive("shape", shape)?;
        require_positive("scale", scale)?;
        let axis = GammaSampler::new(shape, scale)
            .map_err(|e| EngineError::invalid("shape", e.to_string()))?;
        Ok(Self {
            shape,
            scale,
            ln_norm: ln_gamma(shape) + shape * scale.ln(),
            axis,
        })
    }
}

impl SamplingDistribution for Gamma {
    fn draw(&self, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>> {
        draw_axes(&self.axis, n, rng)
    }

    fn pdf(&self, point: &Point3<f64>) -> f64 {
        product_pdf(point, |v| {
            if v < 0.0 {
                0.0
            } else if v == 0.0 {
                match self.shape.total_cmp(&1.0) {
                    Ordering::Less => f64::INFINITY,
                    Ordering::Equal => 1.0 / self.scale,
                    Ordering::Greater => 0.0,
                }
            } else {
                ((self.shape - 1.0) * v.ln() - v / self.scale - self.ln_norm).exp()
            }
        })
    }
}

/// Independent normals `N(loc, scale²)` on each axis.
#[derive(Debug, Clone)]
pub struct Gaussian {
    loc: f64,
    scale: f64,
    axis: Normal<f64>,
}

impl Gaussian {
    pub fn new(loc: f64, scale: f64) -> Result<Self, EngineError> {
        require_positive("scale", scale)?;
        let axis = Normal::new(loc, scale).map_err(|e| EngineError::invalid("scale", e.to_string()))?;
        Ok(Self { loc, scale, axis })
    }
}

impl SamplingDistribution for Gaussian {
    fn draw(&self, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>> {
        draw_axes(&self.axis, n, rng)
    }

    fn pdf(&self, point: &Point3<f64>) -> f64 {
        let norm = 1.0 / (self.scale * (2.0 * PI).sqrt());
        product_pdf(point, |v| {
            let z = (v - self.loc) / self.scale;
            norm * (-0.5 * z * z).exp()
        })
    }
}

/// Serializable choice of proposal, as it appears in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum ProposalSpec {
    Uniform { low: f64, high: f64 },
    Exponential { scale: f64 },
    Gamma { shape: f64, scale: f64 },
    Gaussian { loc: f64, scale: f64 },
}

impl ProposalSpec {
    pub fn build(&self) -> Result<Proposal, EngineError> {
        Ok(match *self {
            Self::Uniform { low, high } => Proposal::Uniform(UniformBox::new(low, high)?),
            Self::Exponential { scale } => Proposal::Exponential(Exponential::new(scale)?),
            Self::Gamma { shape, scale } => Proposal::Gamma(Gamma::new(shape, scale)?),
            Self::Gaussian { loc, scale } => Proposal::Gaussian(Gaussian::new(loc, scale)?),
        })
    }

    /// Whether every draw lies in the closed positive octant `[0, ∞)³`.
    ///
    /// Integrands that are even in x, y and z can then be estimated on one octant and
    /// multiplied by 8.
    pub fn is_positive_octant(&self) -> bool {
        match *self {
            Self::Uniform { low, .. } => low >= 0.0,
            Self::Exponential { .. } | Self::Gamma { .. } => true,
            Self::Gaussian { .. } => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::Exponential { .. } => "exponential",
            Self::Gamma { .. } => "gamma",
            Self::Gaussian { .. } => "gaussian",
        }
    }
}

/// A validated proposal chosen at runtime.
#[derive(Debug, Clone)]
pub enum Proposal {
    Uniform(UniformBox),
    Exponential(Exponential),
    Gamma(Gamma),
    Gaussian(Gaussian),
}

impl SamplingDistribution for Proposal {
    fn draw(&self, n: usize, rng: &mut StdRng) -> Vec<Point3<f64>> {
        match self {
            Self::Uniform(d) => d.draw(n, rng),
            Self::Exponential(d) => d.draw(n, rng),
            Self::Gamma(d) => d.draw(n, rng),
            Self::Gaussian(d) => d.draw(n, rng),
        }
    }

    fn pdf(&self, point: &Point3<f64>) -> f64 {
        match self {
            Self::Uniform(d) => d.pdf(point),
            Self::Exponential(d) => d.pdf(point),
            Self::Gamma(d) => d.pdf(point),
            Self::Gaussian(d) => d.pdf(point),
        }
    }
}

/// A distribution paired with a reproducible random stream.
#[derive(Debug, Clone)]
pub struct Drawer<D> {
    distribution: D,
    seed: u64,
    rng: StdRng,
}

impl<D: SamplingDistribution> Drawer<D> {
    pub fn new(distribution: D) -> Self {
        Self::with_seed(distribution, DEFAULT_SEED)
    }

    pub fn with_seed(distribution: D, seed: u64) -> Self {
        Self {
            distribution,
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Restores the generator to its freshly seeded state.
    pub fn reseed(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    pub fn draw(&mut self, n: usize) -> Vec<Point3<f64>> {
        self.distribution.draw(n, &mut self.rng)
    }

    #[inline]
    pub fn pdf(&self, point: &Point3<f64>) -> f64 {
        self.distribution.pdf(point)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn distribution(&self) -> &D {
        &self.distribution
    }
}
