// common helpers
pub mod algorithms;
pub mod report;
pub mod errors;
pub mod config;
pub mod offsets;
pub mod signs;
pub mod solver;
pub(crate) mod eval;

// bracketing
pub mod bisection;

// refinement
pub mod newton;
pub mod secant;
pub mod regula_falsi;
pub mod muller;
pub mod chebyshev;
pub mod multipoint;
