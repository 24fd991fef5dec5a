mod builder;
mod defaults;
mod file;
mod models;

pub use builder::{
    build_argon, build_cerium, build_kinetic, build_lj_heat_capacity, build_oscillator,
    build_overlap, build_trouton, build_virial, build_work,
};
