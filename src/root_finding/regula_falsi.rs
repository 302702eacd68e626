use super::algorithms::{Algorithm, BracketFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil, Best};
use super::errors::{RootFindingError, ToleranceError, SolverError};
use super::config::{CommonCfg, impl_common_cfg};
use super::eval::eval_fx_checked;
use super::offsets::SeedOffsets;
use super::secant::secant_x_intercept;
use super::signs::{sign_test_values, SignTest};
use super::bisection::BisectionError;
use super::solver::{Solver, SolverState};
use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum RegulaFalsiError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Bisection(#[from] BisectionError),

    #[error("invalid initial guesses: x0 and x1 must be finite and distinct")]
    InvalidGuess { x0: f64, x1: f64 },

    #[error("invalid seed offsets: offsets must be finite and non-zero")]
    InvalidOffsets,

    #[error("degenerate secant at x0={x0}, x1={x1}: f(x1) - f(x0) = 0")]
    DegenerateSecantStep { x0: f64, x1: f64 },
}


/// RegulaFalsi Configuration
///
/// # Fields
/// - `common`  : [`CommonCfg`] with `epsilon` and optional `max_iter`.
/// - `offsets` : [`SeedOffsets`] placing the second point when a solver
///               starts from a single seed.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`regula_falsi`] resolves it using
///   [`Algorithm::default_max_iter`] for [`BracketFamily::RegulaFalsi`].
///   The budget is larger than secant's since a stagnant endpoint makes
///   convergence linear.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RegulaFalsiCfg {
    common  : CommonCfg,
    offsets : SeedOffsets,
}
impl RegulaFalsiCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common  : CommonCfg::new(),
            offsets : SeedOffsets::default(),
        }
    }
    pub fn set_offsets(mut self, v: SeedOffsets) -> Result<Self, RegulaFalsiError> {
        if !v.is_valid() {
            return Err(RegulaFalsiError::InvalidOffsets);
        }
        self.offsets = v;
        Ok(self)
    }
    #[inline] pub fn offsets(&self) -> SeedOffsets { self.offsets }
}
impl Default for RegulaFalsiCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(RegulaFalsiCfg);


/// Finds a root of a function using the
/// [regula falsi method](https://en.wikipedia.org/wiki/Regula_falsi).
///
/// # Arguments
/// - `func` : The function whose root is to be found
/// - `x0`   : retained endpoint. Must be finite and not equal to `x1`
/// - `x1`   : most recent endpoint. Must be finite and not equal to `x0`
/// - `cfg`  : [`RegulaFalsiCfg`] (`epsilon`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root (best iterate on iteration limit)
/// - `f_root`              : function value at `root`
/// - `iterations`          : number of iterations performed
/// - `evaluations`         : total function evaluations
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered
/// - `stencil`             : [`Stencil::Bracket`] with the final `{x0, x1}` pair
/// - `algorithm_name`      : "regula_falsi"
///
/// # Errors
/// - [`RegulaFalsiError::InvalidGuess`]         : `x0` or `x1` is NaN/inf or equal
/// - [`RegulaFalsiError::DegenerateSecantStep`] : `f(x1) == f(x0)`
///
/// * Propagated via [`RegulaFalsiError::RootFinding`]
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Behavior
/// - Candidate: the secant intercept of `(x0, f(x0))`, `(x1, f(x1))`.
/// - If `f(candidate)` and `f(x1)` differ in sign, `x0` advances to `x1`;
///   otherwise `x0` is retained. `x1` always becomes the candidate.
/// - Continues while both |x1 - x0| >= epsilon and |f(x1)| >= epsilon.
///
/// # Warning
/// - The pair only encloses a root at every step if `f(x0)` and `f(x1)`
///   differ in sign initially. Without that, this is a secant variant that
///   never discards `x0` and may wander.
pub fn regula_falsi<F>(
    func: F,
    x0: f64,
    x1: f64,
    cfg: RegulaFalsiCfg
) -> Result<RootFindingReport, RegulaFalsiError>
where F: Fn(f64) -> f64 {

    if !(x0.is_finite() && x1.is_finite()) || x0 == x1 {
        return Err(RegulaFalsiError::InvalidGuess { x0, x1 });
    }

    let algorithm = Algorithm::Bracket(BracketFamily::RegulaFalsi);
    let algo_name = algorithm.algorithm_name();
    let epsilon   = cfg.epsilon();
    let num_iter  = algorithm.resolve_max_iter(cfg.max_iter());

    let mut evals = 0;
    let mut a  = x0;
    let mut b  = x1;
    let mut fa = eval_fx_checked(&func, a, &mut evals)?;
    let mut fb = eval_fx_checked(&func, b, &mut evals)?;
    let mut best = Best::new(b, fb);

    let mut iter = 0;
    while (b - a).abs() >= epsilon && fb.abs() >= epsilon {
        if iter == num_iter {
            log::debug!("{algo_name}: no convergence from ({x0}, {x1}) after {num_iter} iterations");
            return Ok(RootFindingReport {
                root                : best.x(),
                f_root              : best.fx(),
                iterations          : num_iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::IterationLimit,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::bracket(a, b),
                algorithm_name      : algo_name
            });
        }
        iter += 1;

        let x_next = secant_x_intercept((a, fa), (b, fb))
            .ok_or(RegulaFalsiError::DegenerateSecantStep { x0: a, x1: b })?;
        let f_next = eval_fx_checked(&func, x_next, &mut evals)?;

        // sign change between the newest two points: both ends move
        if sign_test_values(f_next, fb) == SignTest::Brackets {
            a  = b;
            fa = fb;
        }
        b  = x_next;
        fb = f_next;
        best.update(b, fb);
        log::trace!("{algo_name}: iter={iter}, bracket=({a}, {b}), f(x)={fb}");
    }

    let tolerance_satisfied = if fb.abs() < epsilon {
        ToleranceSatisfied::AbsFxReached
    } else {
        ToleranceSatisfied::StepSizeReached
    };

    Ok(RootFindingReport {
        root                : b,
        f_root              : fb,
        iterations          : iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::ToleranceReached,
        tolerance_satisfied,
        stencil             : Stencil::bracket(a, b),
        algorithm_name      : algo_name
    })
}


/// [`Solver`] refining every seed `x0` with [`regula_falsi`] from `(x0, x0 + offset)`.
pub struct RegulaFalsiSolver<F> {
    func  : F,
    cfg   : RegulaFalsiCfg,
    state : SolverState,
}
impl<F> RegulaFalsiSolver<F> where F: Fn(f64) -> f64 {
    pub fn new(func: F, cfg: RegulaFalsiCfg) -> Self {
        Self { func, cfg, state: SolverState::new() }
    }

    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Self {
        self.set_intervals(intervals);
        self
    }
}
impl<F> Solver for RegulaFalsiSolver<F> where F: Fn(f64) -> f64 {
    type Error = RegulaFalsiError;

    fn state(&self) -> &SolverState { &self.state }
    fn state_mut(&mut self) -> &mut SolverState { &mut self.state }
    fn eval(&self, x: f64) -> f64 { (self.func)(x) }
    fn algorithm(&self) -> Algorithm { Algorithm::Bracket(BracketFamily::RegulaFalsi) }

    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, RegulaFalsiError> {
        let mut offsets = self.cfg.offsets().stream();
        seeds
            .iter()
            .map(|&x0| regula_falsi(&self.func, x0, x0 + offsets.draw(), self.cfg))
            .collect()
    }
}
