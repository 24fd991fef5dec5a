//! # Core Module
//!
//! Stateless building blocks shared by every computation in the crate.
//!
//! - **Physical constants** ([`constants`]) - SI values used throughout
//! - **Potentials** ([`potentials`]) - Pair potentials and 1-D oscillator potentials
//! - **Geometry** ([`geometry`]) - Bond lengths and angles on Cartesian points
//! - **Numerics** ([`numerics`]) - Grids, trapezoid quadrature and numerical gradients
//! - **Optimization** ([`optimize`]) - Derivative-free Nelder-Mead minimization
//! - **Statistics** ([`stats`], [`special`]) - Ordinary least squares and Student-t quantiles
//! - **Output** ([`io`]) - CSV tables, XYZ geometries, markdown and SVG plots

pub mod constants;
pub mod geometry;
pub mod io;
pub mod numerics;
pub mod optimize;
pub mod potentials;
pub mod special;
pub mod stats;
