/// Output directories used when neither the command line nor the config file names one.
pub struct DefaultsConfig {
    pub argon_dir: &'static str,
    pub virial_dir: &'static str,
    pub oscillator_dir: &'static str,
    pub trouton_dir: &'static str,
    pub work_dir: &'static str,
    pub cerium_dir: &'static str,
    pub lj_heat_capacity_dir: &'static str,
    pub overlap_dir: &'static str,
    pub kinetic_dir: &'static str,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            argon_dir: "homework-2-1",
            virial_dir: "homework-2-2",
            oscillator_dir: "homework-2-grad",
            trouton_dir: "homework-3-1",
            work_dir: "homework-4-1",
            cerium_dir: "homework-4-2",
            lj_heat_capacity_dir: "homework-4-grad",
            overlap_dir: "homework-5-1",
            kinetic_dir: "homework-5-grad",
        }
    }
}
