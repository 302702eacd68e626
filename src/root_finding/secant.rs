use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil, Best};
use super::errors::{RootFindingError, ToleranceError, SolverError};
use super::config::{CommonCfg, impl_common_cfg};
use super::eval::eval_fx_checked;
use super::offsets::SeedOffsets;
use super::bisection::BisectionError;
use super::solver::{Solver, SolverState};
use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum SecantError {
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


/// Secant configuration
///
/// # Fields
/// - `common`  : [`CommonCfg`] with `epsilon` and optional `max_iter`.
/// - `offsets` : [`SeedOffsets`] placing the second point when a solver
///               starts from a single seed.
///
/// # Construction
/// - Use [`SecantCfg::new`] then optional setters.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`secant`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Secant`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SecantCfg {
    common  : CommonCfg,
    offsets : SeedOffsets,
}
impl SecantCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common  : CommonCfg::new(),
            offsets : SeedOffsets::default(),
        }
    }
    pub fn set_offsets(mut self, v: SeedOffsets) -> Result<Self, SecantError> {
        if !v.is_valid() {
            return Err(SecantError::InvalidOffsets);
        }
        self.offsets = v;
        Ok(self)
    }
    #[inline] pub fn offsets(&self) -> SeedOffsets { self.offsets }
}
impl Default for SecantCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(SecantCfg);


/// Calculates the secant x-intercept for the line
/// connecting `(x0, fx0)` and `(x1, fx1)`:
/// `x1 - f(x1) * (x1 - x0) / (f(x1) - f(x0))`
///
/// # Returns
/// - `Some(x_next)` : finite intercept
/// - `None`         : `f(x1) == f(x0)` or the intercept is not finite
#[inline]
pub(crate) fn secant_x_intercept(
    (x0, fx0): (f64, f64),
    (x1, fx1): (f64, f64),
) -> Option<f64> {
    let denom = fx1 - fx0;
    if denom == 0.0 {
        return None;
    }
    let x_next = x1 - fx1 * (x1 - x0) / denom;
    x_next.is_finite().then_some(x_next)
}


/// Finds a root of a function using the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `func` : The function whose root is to be found
/// - `x0`   : First initial guess.  Must be finite and not equal to `x1`
/// - `x1`   : Second initial guess. Must be finite and not equal to `x0`
/// - `cfg`  : [`SecantCfg`] (`epsilon`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : approximate root (best iterate on iteration limit)
/// - `f_root`              : function value at `root`
/// - `iterations`          : number of iterations performed
/// - `evaluations`         : total function evaluations
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : which tolerance triggered
/// - `stencil`             : the last pair `{x_{k-1}, x_k}`
/// - `algorithm_name`      : "secant"
///
/// # Errors
/// - [`SecantError::InvalidGuess`]         : `x0` or `x1` is NaN/inf or equal
/// - [`SecantError::DegenerateSecantStep`] : `f(x_k) == f(x_{k-1})`
///
/// * Propagated via [`SecantError::RootFinding`]
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Behavior
/// - Update:
///   x_{k+1} = x_k - f(x_k) * (x_k - x_{k-1}) / (f(x_k) - f(x_{k-1}))
/// - Continues while both |x_k - x_{k-1}| >= epsilon and |f(x_k)| >= epsilon;
///   whichever drops below epsilon first stops the iteration.
///
/// # Notes
/// - Convergence is superlinear (~1.618) near simple roots but requires two
///   distinct starting guesses.
pub fn secant<F>(
    func: F,
    x0: f64,
    x1: f64,
    cfg: SecantCfg
) -> Result<RootFindingReport, SecantError>
where F: Fn(f64) -> f64 {

    if !(x0.is_finite() && x1.is_finite()) || x0 == x1 {
        return Err(SecantError::InvalidGuess { x0, x1 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Secant);
    let algo_name = algorithm.algorithm_name();
    let epsilon   = cfg.epsilon();
    let num_iter  = algorithm.resolve_max_iter(cfg.max_iter());

    let mut evals = 0;
    let mut x_prev = x0;
    let mut x_curr = x1;
    let mut f_prev = eval_fx_checked(&func, x_prev, &mut evals)?;
    let mut f_curr = eval_fx_checked(&func, x_curr, &mut evals)?;
    let mut best   = Best::new(x_curr, f_curr);

    let mut iter = 0;
    while (x_curr - x_prev).abs() >= epsilon && f_curr.abs() >= epsilon {
        if iter == num_iter {
            log::debug!("{algo_name}: no convergence from ({x0}, {x1}) after {num_iter} iterations");
            return Ok(RootFindingReport {
                root                : best.x(),
                f_root              : best.fx(),
                iterations          : num_iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::IterationLimit,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::doubleton(x_prev, x_curr),
                algorithm_name      : algo_name
            });
        }
        iter += 1;

        let x_next = secant_x_intercept((x_prev, f_prev), (x_curr, f_curr))
            .ok_or(SecantError::DegenerateSecantStep { x0: x_prev, x1: x_curr })?;
        let f_next = eval_fx_checked(&func, x_next, &mut evals)?;
        log::trace!("{algo_name}: iter={iter}, x={x_next}, f(x)={f_next}");

        x_prev = x_curr;
        f_prev = f_curr;
        x_curr = x_next;
        f_curr = f_next;
        best.update(x_curr, f_curr);
    }

    let tolerance_satisfied = if f_curr.abs() < epsilon {
        ToleranceSatisfied::AbsFxReached
    } else {
        ToleranceSatisfied::StepSizeReached
    };

    Ok(RootFindingReport {
        root                : x_curr,
        f_root              : f_curr,
        iterations          : iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::ToleranceReached,
        tolerance_satisfied,
        stencil             : Stencil::doubleton(x_prev, x_curr),
        algorithm_name      : algo_name
    })
}


/// [`Solver`] refining every seed `x0` with [`secant`] from `(x0, x0 + offset)`.
pub struct SecantSolver<F> {
    func  : F,
    cfg   : SecantCfg,
    state : SolverState,
}
impl<F> SecantSolver<F> where F: Fn(f64) -> f64 {
    pub fn new(func: F, cfg: SecantCfg) -> Self {
        Self { func, cfg, state: SolverState::new() }
    }

    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Self {
        self.set_intervals(intervals);
        self
    }
}
impl<F> Solver for SecantSolver<F> where F: Fn(f64) -> f64 {
    type Error = SecantError;

    fn state(&self) -> &SolverState { &self.state }
    fn state_mut(&mut self) -> &mut SolverState { &mut self.state }
    fn eval(&self, x: f64) -> f64 { (self.func)(x) }
    fn algorithm(&self) -> Algorithm { Algorithm::Open(OpenFamily::Secant) }

    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, SecantError> {
        let mut offsets = self.cfg.offsets().stream();
        seeds
            .iter()
            .map(|&x0| secant(&self.func, x0, x0 + offsets.draw(), self.cfg))
            .collect()
    }
}
