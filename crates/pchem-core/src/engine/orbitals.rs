//! Hydrogen-like orbitals in atomic units and the Monte Carlo integrands built from them.

use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Radius substituted for `r = 0` wherever the formula divides by `r`.
const R_FLOOR: f64 = 1e-12;

/// Off-diagonal separation of the H₂ kinetic-energy matrix element (bohr).
pub const DEFAULT_BOND_LENGTH: f64 = 1.4;

#[inline]
fn radius(p: &Point3<f64>) -> f64 {
    p.coords.norm()
}

/// 1s orbital `(π a³)^{−1/2} e^{−r/a}` with `a = a0/Z`.
pub fn psi_1s(p: &Point3<f64>, z: f64, a0: f64) -> f64 {
    let a = a0 / z;
    (-radius(p) / a).exp() / (PI * a.powi(3)).sqrt()
}

/// `∇²ψ_1s = (1/a² − 2/(a r)) ψ_1s`.
pub fn laplacian_psi_1s(p: &Point3<f64>, z: f64, a0: f64) -> f64 {
    let a = a0 / z;
    let r = radius(p).max(R_FLOOR);
    (1.0 / (a * a) - 2.0 / (a * r)) * psi_1s(p, z, a0)
}

/// Hydrogen 2p_z orbital with `a0 = 1`.
pub fn psi_2pz(p: &Point3<f64>) -> f64 {
    let r = radius(p).max(R_FLOOR);
    let coeff = 1.0 / (4.0 * (2.0 * PI).sqrt());
    coeff * (p.z / r) * r * (-r / 2.0).exp()
}

fn shifted(p: &Point3<f64>, dz: f64) -> Point3<f64> {
    p + Vector3::new(0.0, 0.0, dz)
}

/// Product of two 2p_z orbitals centred at `z = ±separation/2`.
pub fn overlap_2pz_integrand(separation: f64) -> impl Fn(&Point3<f64>) -> f64 + Copy {
    let half = separation / 2.0;
    move |p: &Point3<f64>| psi_2pz(&shifted(p, half)) * psi_2pz(&shifted(p, -half))
}

/// `−½ ψ_a ∇²ψ_b` for hydrogen 1s orbitals centred at `z = ±separation/2`.
///
/// With `separation = 0` this is the diagonal element of the kinetic-energy matrix.
pub fn kinetic_1s_integrand(separation: f64) -> impl Fn(&Point3<f64>) -> f64 + Copy {
    let half = separation / 2.0;
    move |p: &Point3<f64>| {
        -0.5 * psi_1s(&shifted(p, half), 1.0, 1.0) * laplacian_psi_1s(&shifted(p, -half), 1.0, 1.0)
    }
}

/// Analytic 2p_z–2p_z overlap at separation `R` (bohr) for comparison with sampling.
pub fn overlap_2pz_exact(separation: f64) -> f64 {
    let p = separation / 2.0;
    (-p).exp() * (1.0 + p + p * p / 5.0 - 2.0 * p.powi(3) / 15.0 - p.powi(4) / 15.0)
}

/// Analytic `−½⟨1s_a|∇²|1s_b⟩` at separation `R`, `½ e^{−R} (1 + R − R²/3)`.
pub fn kinetic_1s_exact(separation: f64) -> f64 {
    let r = separation;
    0.5 * (-r).exp() * (1.0 + r - r * r / 3.0)
}
