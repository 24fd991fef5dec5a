//! # PChem Core Library
//!
//! Numerical recipes for an undergraduate/graduate physical-chemistry course: second virial
//! coefficients, Lennard-Jones cluster geometries, 1-D Schrödinger eigen-solving, linear
//! regression with confidence intervals, ideal-gas work, canonical-ensemble thermodynamics
//! and importance-sampled Monte Carlo integrals.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless building blocks: physical constants,
//!   potentials, geometry, quadrature and differentiation, the Nelder-Mead minimizer,
//!   regression statistics and the output writers (CSV, XYZ, markdown, SVG plots).
//!
//! - **[`engine`]: The Recipes.** Each submodule implements one computational model on top
//!   of `core` (virial integrator, cluster optimizer, oscillator solver, canonical ensemble,
//!   Monte Carlo integrator with pluggable sampling distributions).
//!
//! - **[`workflows`]: The Public API.** One pipeline per task: build the model, compute,
//!   tabulate, plot and write a discussion. Each returns a typed report so callers can
//!   inspect the numbers that ended up in the files.

pub mod core;
pub mod engine;
pub mod workflows;
