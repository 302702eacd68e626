//! Newton-Raphson method

use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil, Best};
use super::errors::{RootFindingError, ToleranceError, SolverError};
use super::config::{CommonCfg, impl_common_cfg};
use super::eval::{eval_fx_checked, eval_dfx_checked};
use super::bisection::BisectionError;
use super::solver::{Solver, SolverState};
use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Bisection(#[from] BisectionError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("step non-finite from vanishing derivative at x={x}, f'(x)={dfx}")]
    DerivativeTooSmall { x: f64, dfx: f64 },

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with `epsilon` and optional `max_iter`.
///
/// # Construction
/// - Use [`NewtonCfg::new`] then optional setters.
///
/// # Defaults
/// - `epsilon = 1e-5`
/// - If `common.max_iter` is `None`, [`newton`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Newton`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NewtonCfg {
    common: CommonCfg,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for NewtonCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(NewtonCfg);


/// One Newton step from `x`, returning `(x_next, f'(x), step)`.
///
/// `step = f(x) / f'(x)` is returned raw so higher order methods can
/// correct it.
#[inline]
pub(crate) fn newton_step<G>(
    df: &G,
    x: f64,
    fx: f64,
    evals: &mut usize,
) -> Result<(f64, f64, f64), NewtonError> where G: Fn(f64) -> f64 {
    let dfx  = eval_dfx_checked(df, x, evals, |x, dfx| NewtonError::DerivativeNotFinite { x, dfx })?;
    let step = fx / dfx;
    if !step.is_finite() {
        return Err(NewtonError::DerivativeTooSmall { x, dfx });
    }

    Ok((x - step, dfx, step))
}


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method).
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : analytic derivative of `func`
/// - `x0`    : finite initial guess
/// - `cfg`   : [`NewtonCfg`] (`epsilon`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with:
/// - `root`                : approximate root (best iterate on iteration limit)
/// - `f_root`              : function value at `root`
/// - `iterations`          : number of iterations performed
/// - `evaluations`         : total evaluations (f and f')
/// - `termination_reason`  : why it stopped
/// - `tolerance_satisfied` : [`ToleranceSatisfied::AbsFxReached`] or not reached
/// - `stencil`             : previous iterate used to form the step
/// - `algorithm_name`      : "newton"
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]        : `x0` non-finite
/// - [`NewtonError::DerivativeTooSmall`]  : `f(x)/f'(x)` not finite (e.g. `f'(x) = 0`)
/// - [`NewtonError::DerivativeNotFinite`] : derivative non-finite
///
/// * Propagated via [`NewtonError::RootFinding`]:
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Behavior
/// - Update: x_{k+1} = x_k - f(x_k) / f'(x_k)
/// - Continues while |f(x_k)| >= epsilon, at most `max_iter` steps.
///
/// # Notes
/// - Quadratic convergence requires a good initial guess and smooth `f`.
///   Poor guesses can diverge or cycle; seed from bracketing when possible.
pub fn newton<F, G>(
    func: F,
    dfunc: G,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Newton);
    let algo_name = algorithm.algorithm_name();
    let epsilon   = cfg.epsilon();
    let num_iter  = algorithm.resolve_max_iter(cfg.max_iter());

    let mut evals: usize = 0;
    let mut x  = x0;
    let mut fx = eval_fx_checked(&func, x, &mut evals)?;
    let mut best   = Best::new(x, fx);
    let mut prev_x = x;

    let mut iter = 0;
    while fx.abs() >= epsilon {
        if iter == num_iter {
            log::debug!("{algo_name}: no convergence from x0={x0} after {num_iter} iterations");
            return Ok(RootFindingReport {
                root                : best.x(),
                f_root              : best.fx(),
                iterations          : num_iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::IterationLimit,
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                stencil             : Stencil::singleton(prev_x),
                algorithm_name      : algo_name,
            });
        }
        iter += 1;

        let (x_next, _, _) = newton_step(&dfunc, x, fx, &mut evals)?;
        prev_x = x;
        x  = x_next;
        fx = eval_fx_checked(&func, x, &mut evals)?;
        best.update(x, fx);
        log::trace!("{algo_name}: iter={iter}, x={x}, f(x)={fx}");
    }

    Ok(RootFindingReport {
        root                : x,
        f_root              : fx,
        iterations          : iter,
        evaluations         : evals,
        termination_reason  : TerminationReason::ToleranceReached,
        tolerance_satisfied : ToleranceSatisfied::AbsFxReached,
        stencil             : Stencil::singleton(prev_x),
        algorithm_name      : algo_name,
    })
}


/// [`Solver`] refining every seed with [`newton`].
pub struct NewtonSolver<F, G> {
    func  : F,
    dfunc : G,
    cfg   : NewtonCfg,
    state : SolverState,
}
impl<F, G> NewtonSolver<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    pub fn new(func: F, dfunc: G, cfg: NewtonCfg) -> Self {
        Self { func, dfunc, cfg, state: SolverState::new() }
    }

    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Self {
        self.set_intervals(intervals);
        self
    }
}
impl<F, G> Solver for NewtonSolver<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    type Error = NewtonError;

    fn state(&self) -> &SolverState { &self.state }
    fn state_mut(&mut self) -> &mut SolverState { &mut self.state }
    fn eval(&self, x: f64) -> f64 { (self.func)(x) }
    fn algorithm(&self) -> Algorithm { Algorithm::Open(OpenFamily::Newton) }

    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, NewtonError> {
        seeds
            .iter()
            .map(|&x0| newton(&self.func, &self.dfunc, x0, self.cfg))
            .collect()
    }
}
