//! Root-finding error types.
//!
//! ┌ [`RootFindingError`] : common runtime errors
//! │   ├ non-finite function evaluation
//! │   └ invalid global parameters (e.g. max_iter)
//! │
//! ├ [`ToleranceError`]   : tolerance-related errors
//! │   └ invalid epsilon
//! │
//! └ [`SolverError`]      : solver lifecycle misuse
//!     ├ approximations requested before intervals were attached
//!     └ approximations/roots read before they were computed


use thiserror::Error;


/// Root-finding runtime errors.
///
/// ┌ Non-finite function evaluation
/// └ Invalid global configuration (e.g. max_iter < 1)
#[derive(Debug, Error, PartialEq)]
pub enum RootFindingError {
    #[error("function non-finite at x={x}, f(x)={fx}")]
    NonFiniteEvaluation { x: f64, fx: f64 },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter   { got: usize },
}


/// Tolerance configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ToleranceError {
    #[error("invalid `epsilon` tolerance: must be finite and > 0. got {got}")]
    InvalidEpsilon { got: f64 },
}


/// Solver lifecycle errors.
///
/// Raised when an operation runs before the state it depends on exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("intervals must be attached before computing approximations")]
    IntervalsNotSet,

    #[error("approximations must be computed before they are read or used as seeds")]
    ApproximationsNotComputed,

    #[error("roots must be computed before they are read")]
    RootsNotComputed,
}
