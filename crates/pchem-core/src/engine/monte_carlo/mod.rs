//! Importance-sampled Monte Carlo integration in three dimensions.
//!
//! A [`Drawer`] wraps a [`SamplingDistribution`] with a seeded generator; [`MonteCarlo`]
//! averages `f(x)/g(x)` over samples drawn from it in fixed-size chunks so that memory use is
//! bounded by the chunk size rather than the sample count.

pub mod integrator;
pub mod sampler;

pub use integrator::{DEFAULT_CHUNK_SIZE, Estimate, MonteCarlo};
pub use sampler::{
    DEFAULT_SEED, Drawer, Exponential, Gamma, Gaussian, Proposal, ProposalSpec,
    SamplingDistribution, UniformBox,
};
