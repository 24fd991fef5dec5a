/// Boltzmann constant in J/K.
pub const BOLTZMANN_J_PER_K: f64 = 1.380649e-23;
/// Boltzmann constant in eV/K.
pub const BOLTZMANN_EV_PER_K: f64 = 8.617333262e-5;
/// One electron-volt in J.
pub const ELECTRON_VOLT_J: f64 = 1.602176634e-19;
/// Planck constant in J·s.
pub const PLANCK_J_S: f64 = 6.62607015e-34;
/// Thermochemical calorie in J.
pub const CALORIE_J: f64 = 4.184;
/// Molar gas constant in J/(mol·K), rounded as in the work integrals.
pub const GAS_CONSTANT: f64 = 8.314;
/// Avogadro constant as used by the virial coefficient integrator (mol⁻¹).
pub const AVOGADRO_VIRIAL: f64 = 6.02e23;
