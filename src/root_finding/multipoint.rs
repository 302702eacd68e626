//! Multipoint iteration: third order convergence without a second
//! derivative, at the price of one extra evaluation per step.

use super::algorithms::{Algorithm, OpenFamily};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied, Stencil, Best};
use super::errors::{RootFindingError, ToleranceError, SolverError};
use super::config::{CommonCfg, impl_common_cfg};
use super::eval::{eval_fx_checked, eval_dfx_checked};
use super::bisection::BisectionError;
use super::solver::{Solver, SolverState};
use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum MultipointError {
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

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },

    #[error("step non-finite from vanishing derivative at x={x}, f'={dfx}")]
    DerivativeTooSmall { x: f64, dfx: f64 },
}


/// Which multipoint update rule to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipointMode {
    // derivative taken at the newton half-step x - f/(2 f'), then a full
    // newton step with it
    #[default]
    MidpointDerivative,

    // newton predictor x* = x - f/f', corrected by f(x*)/f'(x)
    PredictorCorrector,
}


/// Multipoint configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with `epsilon` and optional `max_iter`.
/// - `mode`   : [`MultipointMode`] update rule (default midpoint derivative).
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`multipoint`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Multipoint`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MultipointCfg {
    common : CommonCfg,
    mode   : MultipointMode,
}
impl MultipointCfg {
    #[must_use]
    pub fn new() -> Self {
        Self {
            common : CommonCfg::new(),
            mode   : MultipointMode::default(),
        }
    }
    pub fn set_mode(mut self, v: MultipointMode) -> Self {
        self.mode = v;
        self
    }
    #[inline] pub fn mode(&self) -> MultipointMode { self.mode }
}
impl Default for MultipointCfg {
    fn default() -> Self { Self::new() }
}
impl_common_cfg!(MultipointCfg);


#[inline]
fn checked_ratio(num: f64, x: f64, dfx: f64) -> Result<f64, MultipointError> {
    let ratio = num / dfx;
    if !ratio.is_finite() {
        return Err(MultipointError::DerivativeTooSmall { x, dfx });
    }
    Ok(ratio)
}


/// Next iterate from `(x, f(x))` under `mode`.
fn multipoint_step<F, G>(
    func: &F,
    dfunc: &G,
    x: f64,
    fx: f64,
    mode: MultipointMode,
    evals: &mut usize,
) -> Result<f64, MultipointError>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    let on_df = |x, dfx| MultipointError::DerivativeNotFinite { x, dfx };
    let dfx   = eval_dfx_checked(dfunc, x, evals, on_df)?;
    let step  = checked_ratio(fx, x, dfx)?;

    match mode {
        MultipointMode::MidpointDerivative => {
            let x_half  = x - 0.5 * step;
            let df_half = eval_dfx_checked(dfunc, x_half, evals, on_df)?;
            Ok(x - checked_ratio(fx, x_half, df_half)?)
        }
        MultipointMode::PredictorCorrector => {
            let x_pred  = x - step;
            let f_pred  = eval_fx_checked(func, x_pred, evals)?;
            Ok(x_pred - checked_ratio(f_pred, x, dfx)?)
        }
    }
}


/// Finds a root of `func` using a multipoint third order iteration.
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : first derivative of `func`
/// - `x0`    : finite initial guess
/// - `cfg`   : [`MultipointCfg`] (`epsilon`, optional `max_iter`, `mode`)
///
/// # Returns
/// [`RootFindingReport`] with `algorithm_name = "multipoint"` and the
/// previous iterate as stencil.
///
/// # Errors
/// - [`MultipointError::InvalidGuess`]        : `x0` non-finite
/// - [`MultipointError::DerivativeTooSmall`]  : a division by `f'` is not finite
/// - [`MultipointError::DerivativeNotFinite`] : `f'` NaN/inf
///
/// * Propagated via [`MultipointError::RootFinding`]
/// - [`RootFindingError::NonFiniteEvaluation`] : `f(x)` produced NaN/inf
///
/// # Behavior
/// - [`MultipointMode::MidpointDerivative`]:
///   x_{k+1} = x_k - f(x_k) / f'(x_k - f(x_k) / (2 f'(x_k)))
/// - [`MultipointMode::PredictorCorrector`]:
///   x* = x_k - f(x_k)/f'(x_k), x_{k+1} = x* - f(x*)/f'(x_k)
/// - Continues while |f(x_k)| >= epsilon.
pub fn multipoint<F, G>(
    func: F,
    dfunc: G,
    x0: f64,
    cfg: MultipointCfg,
) -> Result<RootFindingReport, MultipointError>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    if !x0.is_finite() {
        return Err(MultipointError::InvalidGuess { x0 });
    }

    let algorithm = Algorithm::Open(OpenFamily::Multipoint);
    let algo_name = algorithm.algorithm_name();
    let epsilon   = cfg.epsilon();
    let mode      = cfg.mode();
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

        let x_next = multipoint_step(&func, &dfunc, x, fx, mode, &mut evals)?;
        prev_x = x;
        x  = x_next;
        fx = eval_fx_checked(&func, x, &mut evals)?;
        best.update(x, fx);
        log::trace!("{algo_name}: iter={iter}, mode={mode:?}, x={x}, f(x)={fx}");
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


/// [`Solver`] refining every seed with [`multipoint`].
pub struct MultipointSolver<F, G> {
    func  : F,
    dfunc : G,
    cfg   : MultipointCfg,
    state : SolverState,
}
impl<F, G> MultipointSolver<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    pub fn new(func: F, dfunc: G, cfg: MultipointCfg) -> Self {
        Self { func, dfunc, cfg, state: SolverState::new() }
    }

    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Self {
        self.set_intervals(intervals);
        self
    }
}
impl<F, G> Solver for MultipointSolver<F, G>
where
    F: Fn(f64) -> f64,
    G: Fn(f64) -> f64
{
    type Error = MultipointError;

    fn state(&self) -> &SolverState { &self.state }
    fn state_mut(&mut self) -> &mut SolverState { &mut self.state }
    fn eval(&self, x: f64) -> f64 { (self.func)(x) }
    fn algorithm(&self) -> Algorithm { Algorithm::Open(OpenFamily::Multipoint) }

    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, MultipointError> {
        seeds
            .iter()
            .map(|&x0| multipoint(&self.func, &self.dfunc, x0, self.cfg))
            .collect()
    }
}
