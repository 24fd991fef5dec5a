//! # Engine Module
//!
//! The computational models of the crate. Each submodule owns one physical model and the
//! numerical procedure that evaluates it; none of them touch the filesystem, which is left
//! to [`crate::workflows`].
//!
//! ## Models
//!
//! - **Second virial coefficient** ([`virial`]) - Quadrature of the Mayer function for a pair potential
//! - **Argon clusters** ([`cluster`]) - Nelder-Mead geometry optimization of Ar₂ and Ar₃
//! - **1-D Schrödinger solver** ([`schrodinger`]) - Finite-difference Hamiltonian and its lowest eigenstates
//! - **Trouton regression** ([`regression`]) - OLS with confidence intervals and an SSE minimization variant
//! - **Ideal gas** ([`ideal_gas`]) - Pressure-volume work for isothermal and adiabatic processes
//! - **Canonical ensemble** ([`ensemble`]) - Thermodynamic functions from a partition function
//! - **Monte Carlo** ([`monte_carlo`]) - Importance-sampled integration in memory-bounded chunks
//! - **Hydrogenic orbitals** ([`orbitals`]) - Wavefunctions and the integrands built from them
//!
//! ## Support
//!
//! - **Error Handling** ([`error`]) - Engine-level error type wrapping the `core` errors
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for long computations

pub mod cluster;
pub mod ensemble;
pub mod error;
pub mod ideal_gas;
pub mod monte_carlo;
pub mod orbitals;
pub mod progress;
pub mod regression;
pub mod schrodinger;
pub mod virial;
