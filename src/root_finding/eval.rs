//! Checked evaluation helpers shared by every refinement loop.
//! - `eval_fx_checked`  : evaluates `f(x)`, counts it, rejects NaN/inf
//! - `eval_dfx_checked` : same for a derivative, with a method-specific error

use super::errors::RootFindingError;


#[inline]
pub(crate) fn eval_fx_checked<F>(
    f: &F,
    x: f64,
    evals: &mut usize
) -> Result<f64, RootFindingError> where F: Fn(f64) -> f64 {
    let fx = { *evals += 1; f(x) };
    if !fx.is_finite() {
        return Err(RootFindingError::NonFiniteEvaluation { x, fx });
    }

    Ok(fx)
}


/// Evaluates a derivative; `on_non_finite` builds the caller's error.
#[inline]
pub(crate) fn eval_dfx_checked<G, E>(
    df: &G,
    x: f64,
    evals: &mut usize,
    on_non_finite: impl FnOnce(f64, f64) -> E,
) -> Result<f64, E> where G: Fn(f64) -> f64 {
    let dfx = { *evals += 1; df(x) };
    if !dfx.is_finite() {
        return Err(on_non_finite(x, dfx));
    }

    Ok(dfx)
}
