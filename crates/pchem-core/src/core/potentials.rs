use serde::{Deserialize, Serialize};

/// Energy assigned inside the hard core of the step potentials (eV).
pub const DEFAULT_WALL_HEIGHT: f64 = 1000.0;

#[inline]
pub fn lennard_jones(dist: f64, epsilon: f64, sigma: f64) -> f64 {
    let rho = sigma / dist;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    4.0 * epsilon * (rho12 - rho6)
}

/// Distance of the Lennard-Jones minimum, `2^(1/6)·σ`.
#[inline]
pub fn lennard_jones_minimum(sigma: f64) -> f64 {
    2f64.powf(1.0 / 6.0) * sigma
}

#[inline]
pub fn harmonic(x: f64, mass: f64, omega: f64) -> f64 {
    0.5 * mass * omega * omega * x * x
}

#[inline]
pub fn morse(x: f64, depth: f64, beta: f64) -> f64 {
    let damp = 1.0 - (-beta * x).exp();
    depth * damp * damp
}

/// Spherically symmetric pair potentials, energies in eV and distances in Å.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum PairPotential {
    LennardJones {
        epsilon: f64,
        sigma: f64,
    },
    HardSphere {
        sigma: f64,
        wall: f64,
    },
    SquareWell {
        sigma: f64,
        epsilon: f64,
        lambda: f64,
        wall: f64,
    },
}

impl PairPotential {
    pub fn lennard_jones_argon() -> Self {
        Self::LennardJones {
            epsilon: 0.01,
            sigma: 3.4,
        }
    }

    pub fn hard_sphere_argon() -> Self {
        Self::HardSphere {
            sigma: 3.4,
            wall: DEFAULT_WALL_HEIGHT,
        }
    }

    pub fn square_well_argon() -> Self {
        Self::SquareWell {
            sigma: 3.4,
            epsilon: 0.01,
            lambda: 1.5,
            wall: DEFAULT_WALL_HEIGHT,
        }
    }

    #[inline]
    pub fn energy(&self, r: f64) -> f64 {
        match *self {
            Self::LennardJones { epsilon, sigma } => lennard_jones(r, epsilon, sigma),
            Self::HardSphere { sigma, wall } => {
                if r < sigma {
                    wall
                } else {
                    0.0
                }
            }
            Self::SquareWell {
                sigma,
                epsilon,
                lambda,
                wall,
            } => {
                if r < sigma {
                    wall
                } else if r < lambda * sigma {
                    -epsilon
                } else {
                    0.0
                }
            }
        }
    }

    /// Characteristic length of the potential (Å).
    pub fn sigma(&self) -> f64 {
        match *self {
            Self::LennardJones { sigma, .. }
            | Self::HardSphere { sigma, .. }
            | Self::SquareWell { sigma, .. } => sigma,
        }
    }

    /// Column-friendly identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LennardJones { .. } => "lennard_jones",
            Self::HardSphere { .. } => "hard_sphere",
            Self::SquareWell { .. } => "square_well",
        }
    }
}

/// One-dimensional confining potentials in atomic units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum OscillatorPotential {
    Harmonic { mass: f64, omega: f64 },
    Morse { depth: f64, beta: f64 },
}

impl OscillatorPotential {
    pub fn unit_harmonic() -> Self {
        Self::Harmonic {
            mass: 1.0,
            omega: 1.0,
        }
    }

    /// Morse well whose curvature at the bottom matches the unit harmonic oscillator.
    pub fn matched_morse(depth: f64) -> Self {
        Self::Morse {
            depth,
            beta: (1.0 / (2.0 * depth)).sqrt(),
        }
    }

    #[inline]
    pub fn energy(&self, x: f64) -> f64 {
        match *self {
            Self::Harmonic { mass, omega } => harmonic(x, mass, omega),
            Self::Morse { depth, beta } => morse(x, depth, beta),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Harmonic { .. } => "Harmonic",
            Self::Morse { .. } => "Anharmonic",
        }
    }
}
