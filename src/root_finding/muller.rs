//! Muller's method.
//!
//! Fits a parabola through the three most recent iterates and steps to its
//! zero closest to the newest one. Needs neither derivative nor a bracket.

use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil, Best};
use super::errors::{RootFindingError, ToleranceError, SolverError};
use super::config::{CommonCfg, impl_common_cfg};
use super::eval::eval_fx_checked;
use super::offsets::SeedOffsets;
use super::bisection::BisectionError;
use super::solver::{Solver, SolverState};
use thiserror::Error;


/// Square root of the discriminant used when `b^2 - 4ac < 0`.
pub const DISCRIMINANT_FALLBACK: f64 = 0.1;


#[derive(Debug, Error, PartialEq)]
pub enum MullerError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Bisection(#[from] BisectionError),

    #[error("invalid initial guesses: {x:?} must be finite")]
    InvalidGuess { x: [f64; 3] },

    #[error("invalid seed offsets: offsets must be finite and non-zero")]
    InvalidOffsets,

    #[error("step non-finite at x={x}: parabola a={a}, b={b}, c={c} has no usable zero")]
    StepNotFinite { x: f64, a: f64, b: f64, c: f64 },

    #[error("failed to converge: degenerate configuration persisted after {restarts} restarts")]
    DegenerateConfiguration { restarts: usize },
}


/// Muller configuration.
///
/// # Fields
/// - `common`       : [`CommonCfg`] with `epsilon` and optional `max_iter`.
/// - `offsets`      : [`SeedOffsets`] placing the second and third point
///                    when a solver starts from a single seed.
/// - `max_restarts` : how often [`MullerSolver`] may restart after a
///                    singular system before giving up.
///
/// # Defaults
/// - `max_restarts = 8`
/// - If `common.max_iter` is `None`, [`muller`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Muller`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MullerCfg {
    common       : CommonCfg,
    offsets      : SeedOffsets,
    max_restarts : usize,
}
impl MullerCfg {
    pub const DEFAULT_MAX_RESTARTS: usize = 8;

    #[must_use]
    pub fn new() -> Self {
        Self {
            common       : CommonCfg::new(),
            offsets      : SeedOffsets::default(),
            max_restarts : Self::DEFAULT_MAX_RESTARTS,
        }
    }
    pub fn set_offsets(mut self, v: SeedOffsets) -> Result<Self, MullerError> {
        if !v.is_valid() {
            return Err(MullerError::InvalidOffsets);
        }
        self.offsets = v;
        Ok(self)
    }
    /// `0` disables restarts: the first singular system is fatal.
    pub fn set_max_restarts(mut self, v: usize) -> Self {
        self.max_restarts = v;
        self
    }
    #[inline] pub fn offsets(&self) -> SeedOffsets { self.offsets }
    #[inline] pub fn max_restarts(&self) -> usize { self.max_restarts }
}
impl Default for MullerCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(MullerCfg);


/// Coefficients `(a, b, c)` of `a (x - x2)^2 + b (x - x2) + c` through the
/// three points, by Cramer's rule on the 2x2 system for `a` and `b`;
/// `c = f(x2)`.
///
/// # Returns
/// - `None` if the system determinant
///   `(x2 - x0)(x2 - x1)(x1 - x0)` is zero or not finite
#[inline]
pub(crate) fn parabola_coefficients(
    (x0, f0): (f64, f64),
    (x1, f1): (f64, f64),
    (x2, f2): (f64, f64),
) -> Option<(f64, f64, f64)> {
    let det = (x2 - x0) * (x2 - x1) * (x1 - x0);
    if det == 0.0 || !det.is_finite() {
        return None;
    }

    let (h0, h1) = (x0 - x2, x1 - x2);
    let (d0, d1) = (f0 - f2, f1 - f2);
    let a = (d1 * h0 - d0 * h1) / det;
    let b = (d0 * h1 * h1 - d1 * h0 * h0) / det;

    Some((a, b, f2))
}


/// Offset from `x2` to the parabola zero closest to `x2`, in rationalized
/// form `-2c / (b + sign(b) sqrt(b^2 - 4ac))`.
///
/// A negative discriminant is replaced by [`DISCRIMINANT_FALLBACK`].
#[inline]
pub(crate) fn parabola_step(a: f64, b: f64, c: f64) -> f64 {
    let discriminant = b * b - 4.0 * a * c;
    let root = if discriminant < 0.0 {
        log::warn!("muller: negative discriminant {discriminant}, using {DISCRIMINANT_FALLBACK}");
        DISCRIMINANT_FALLBACK
    } else {
        discriminant.sqrt()
    };

    // same sign as b: no cancellation in the denominator
    let denom = if b >= 0.0 { b + root } else { b - root };
    -2.0 * c / denom
}


/// Finds a root of a function using
/// [Muller's method](https://en.wikipedia.org/wiki/Muller%27s_method).
///
/// # Arguments
/// - `func` : The function whose root is to be found
/// - `x`    : three finite starting points `[x0, x1, x2]`, `x2` the newest
/// - `cfg`  : [`MullerCfg`] (`epsilon`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root, see below
/// - `f_root`              : function value at `root`
/// - `iterations`          : number of iterations performed
/// - `evaluations`         : total function evaluations
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered
/// - `stencil`             : the three running points at termination
/// - `algorithm_name`      : "muller"
///
/// # Errors
/// - [`MullerError::InvalidGuess`]  : a starting point is NaN/inf
/// - [`MullerError::StepNotFinite`] : the parabola step is not finite
///
/// * Propagated via [`MullerError::RootFinding`]
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Behavior
/// - Continues while |f(x2)| >= epsilon.
/// - A negative discriminant is logged and replaced, never fatal.
/// - Coinciding running points make the system singular; the refinement
///   stops with [`TerminationReason::SingularSystem`] and reports the newest
///   point `x2`. [`MullerSolver`] restarts from such reports.
///
/// # Notes
/// - Convergence order ~1.84 near simple roots; sensitive to the start.
pub fn muller<F>(
    func: F,
    x: [f64; 3],
    cfg: MullerCfg
) -> Result<RootFindingReport, MullerError>
where F: Fn(f64) -> f64 {

    if !x.iter().all(|v| v.is_finite()) {
        return Err(MullerError::InvalidGuess { x });
    }

    let algorithm = Algorithm::Open(OpenFamily::Muller);
    let algo_name = algorithm.algorithm_name();
    let epsilon   = cfg.epsilon();
    let num_iter  = algorithm.resolve_max_iter(cfg.max_iter());

    let mut evals = 0;
    let [mut x0, mut x1, mut x2] = x;
    let mut f0 = eval_fx_checked(&func, x0, &mut evals)?;
    let mut f1 = eval_fx_checked(&func, x1, &mut evals)?;
    let mut f2 = eval_fx_checked(&func, x2, &mut evals)?;
    let mut best = Best::new(x2, f2);

    let mut iter = 0;
    while f2.abs() >= epsilon {
        if iter == num_iter {
            log::debug!("{algo_name}: no convergence from {x:?} after {num_iter} iterations");
            return Ok(RootFindingReport {
                root                : best.x(),
                f_root              : best.fx(),
                iterations          : num_iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::IterationLimit,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::tripleton(x0, x1, x2),
                algorithm_name      : algo_name
            });
        }

        let Some((a, b, c)) = parabola_coefficients((x0, f0), (x1, f1), (x2, f2)) else {
            log::debug!("{algo_name}: singular system at ({x0}, {x1}, {x2})");
            return Ok(RootFindingReport {
                root                : x2,
                f_root              : f2,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::SingularSystem,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::tripleton(x0, x1, x2),
                algorithm_name      : algo_name
            });
        };
        iter += 1;

        let x_next = x2 + parabola_step(a, b, c);
        if !x_next.is_finite() {
            return Err(MullerError::StepNotFinite { x: x2, a, b, c });
        }
        let f_next = eval_fx_checked(&func, x_next, &mut evals)?;
        log::trace!("{algo_name}: iter={iter}, x={x_next}, f(x)={f_next}");

        (x0, f0) = (x1, f1);
        (x1, f1) = (x2, f2);
        (x2, f2) = (x_next, f_next);
        best.update(x2, f2);
    }

    Ok(RootFindingReport {
        root                : x2,
        f_root              : f2,
        iterations          : iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::ToleranceReached,
        tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
        stencil             : Stencil::tripleton(x0, x1, x2),
        algorithm_name      : algo_name
    })
}


/// [`Solver`] refining every seed `x0` with [`muller`] from
/// `(x0, x0 + offset, x0 + offset')`.
///
/// If any seed ends in a singular system, the whole batch is refined again
/// using the roots reached so far as seeds, at most `max_restarts` times.
/// Each restart is logged and counted in [`MullerSolver::restarts`].
pub struct MullerSolver<F> {
    func     : F,
    cfg      : MullerCfg,
    state    : SolverState,
    restarts : usize,
}
impl<F> MullerSolver<F> where F: Fn(f64) -> f64 {
    pub fn new(func: F, cfg: MullerCfg) -> Self {
        Self { func, cfg, state: SolverState::new(), restarts: 0 }
    }

    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Self {
        self.set_intervals(intervals);
        self
    }

    /// Restarts needed by the last [`Solver::compute_roots`] call.
    pub fn restarts(&self) -> usize { self.restarts }

    fn refine_once(&self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, MullerError> {
        let mut offsets = self.cfg.offsets().stream();
        seeds
            .iter()
            .map(|&x0| {
                let x1 = x0 + offsets.draw();
                let x2 = x0 + offsets.draw();
                muller(&self.func, [x0, x1, x2], self.cfg)
            })
            .collect()
    }
}
impl<F> Solver for MullerSolver<F> where F: Fn(f64) -> f64 {
    type Error = MullerError;

    fn state(&self) -> &SolverState { &self.state }
    fn state_mut(&mut self) -> &mut SolverState { &mut self.state }
    fn eval(&self, x: f64) -> f64 { (self.func)(x) }
    fn algorithm(&self) -> Algorithm { Algorithm::Open(OpenFamily::Muller) }

    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, MullerError> {
        self.restarts = 0;
        let mut seeds = seeds.to_vec();
        loop {
            let reports = self.refine_once(&seeds)?;
            let singular = reports
                .iter()
                .filter(|r| r.termination_reason == TerminationReason::SingularSystem)
                .count();
            if singular == 0 {
                return Ok(reports);
            }
            if self.restarts == self.cfg.max_restarts() {
                return Err(MullerError::DegenerateConfiguration { restarts: self.restarts });
            }

            self.restarts += 1;
            log::warn!(
                "muller: {singular} singular system(s), restart {}/{} from current roots",
                self.restarts,
                self.cfg.max_restarts()
            );
            seeds = reports.iter().map(|r| r.root).collect();
        }
    }
}
