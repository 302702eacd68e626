//! Chebyshev's method: a Newton step plus a second derivative correction.

use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil, Best};
use super::errors::{RootFindingError, ToleranceError, SolverError};
use super::config::{CommonCfg, impl_common_cfg};
use super::eval::{eval_fx_checked, eval_dfx_checked};
use super::newton::{newton_step, NewtonError};
use super::bisection::BisectionError;
use super::solver::{Solver, SolverState};
use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum ChebyshevError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Solver(#[from] SolverError),

    #[error(transparent)]
    Bisection(#[from] BisectionError),

    #[error(transparent)]
    Newton(#[from] NewtonError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("second derivative non-finite at x={x}, f''(x)={d2fx}")]
    SecondDerivativeNotFinite { x: f64, d2fx: f64 },

    #[error("corrected step non-finite at x={x}")]
    StepNotFinite { x: f64 },
}


/// Chebyshev configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with `epsilon` and optional `max_iter`.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`chebyshev`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Chebyshev`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChebyshevCfg {
    common: CommonCfg,
}
impl ChebyshevCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common: CommonCfg::new(),
        }
    }
}
impl Default for ChebyshevCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(ChebyshevCfg);


/// Finds a root of `func` using Chebyshev's third order method.
///
/// # Arguments
/// - `func`   : function whose root is sought
/// - `dfunc`  : first derivative of `func`
/// - `d2func` : second derivative of `func`
/// - `x0`     : finite initial guess
/// - `cfg`    : [`ChebyshevCfg`] (`epsilon`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with `algorithm_name = "chebyshev"` and the
/// previous iterate as stencil.
///
/// # Errors
/// - [`ChebyshevError::InvalidGuess`]              : `x0` non-finite
/// - [`ChebyshevError::SecondDerivativeNotFinite`] : `f''(x)` NaN/inf
/// - [`ChebyshevError::StepNotFinite`]             : corrected iterate not finite
///
/// * Propagated via [`ChebyshevError::Newton`]:
/// - [`NewtonError::DerivativeTooSmall`] : `f(x)/f'(x)` not finite
///
/// # Behavior
/// - Update: x_{k+1} = x_k - f/f' - (1/2) f^2 f'' / f'^3, all at x_k
/// - If the raw Newton step |f/f'| is below epsilon, the corrected point is
///   accepted immediately without checking its residual
///   ([`ToleranceSatisfied::StepSizeReached`]).
/// - Otherwise continues while |f(x_k)| >= epsilon.
pub fn chebyshev<F, G, H>(
    func: F,
    dfunc: G,
    d2func: H,
    x0: f64,
    cfg: ChebyshevCfg,
) -> Result<RootFindingReport, ChebyshevError>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
    H: Fn(f64) -> f64
{
    if !x0.is_finite() {
        return Err(ChebyshevError::InvalidGuess { x0 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Chebyshev);
    let algo_name = algorithm.algorithm_name();
    let epsilon   = cfg.epsilon();
    let num_iter  = algorithm.resolve_max_iter(cfg.max_iter());

    let mut evals: usize = 0;
    let mut x  = x0;
    let mut fx = eval_fx_checked(&func, x, &mut evals)?;
    let mut best = Best::new(x, fx);
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

        let (x_newton, dfx, step) = newton_step(&dfunc, x, fx, &mut evals)?;
        let d2fx = eval_dfx_checked(&d2func, x, &mut evals, |x, d2fx| {
            ChebyshevError::SecondDerivativeNotFinite { x, d2fx }
        })?;
        let x_next = x_newton - 0.5 * fx * fx * d2fx / (dfx * dfx * dfx);
        if !x_next.is_finite() {
            return Err(ChebyshevError::StepNotFinite { x });
        }

        prev_x = x;
        x = x_next;

        // raw step already below tolerance: accept without a residual check
        if step.abs() < epsilon {
            fx = eval_fx_checked(&func, x, &mut evals)?;
            log::trace!("{algo_name}: iter={iter}, x={x}, f(x)={fx}, step below epsilon");
            return Ok(RootFindingReport {
                root                : x,
                f_root              : fx,
                iterations          : iter,
                evaluations         : evals,
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::StepSizeReached,
                stencil             : Stencil::singleton(prev_x),
                algorithm_name      : algo_name,
            });
        }

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


/// [`Solver`] refining every seed with [`chebyshev`].
pub struct ChebyshevSolver<F, G, H> {
    func   : F,
    dfunc  : G,
    d2func : H,
    cfg    : ChebyshevCfg,
    state  : SolverState,
}
impl<F, G, H> ChebyshevSolver<F, G, H>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
    H: Fn(f64) -> f64
{
    pub fn new(func: F, dfunc: G, d2func: H, cfg: ChebyshevCfg) -> Self {
        Self { func, dfunc, d2func, cfg, state: SolverState::new() }
    }

    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Self {
        self.set_intervals(intervals);
        self
    }
}
impl<F, G, H> Solver for ChebyshevSolver<F, G, H>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64,
    H: Fn(f64) -> f64
{
    type Error = ChebyshevError;

    fn state(&self) -> &SolverState { &self.state }
    fn state_mut(&mut self) -> &mut SolverState { &mut self.state }
    fn eval(&self, x: f64) -> f64 { (self.func)(x) }
    fn algorithm(&self) -> Algorithm { Algorithm::Open(OpenFamily::Chebyshev) }

    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, ChebyshevError> {
        seeds
            .iter()
            .map(|&x0| chebyshev(&self.func, &self.dfunc, &self.d2func, x0, self.cfg))
            .collect()
    }
}
