//! tests for multipoint
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::multipoint::{multipoint, MultipointCfg, MultipointError, MultipointMode};
use rootsolve::root_finding::report::TerminationReason;

type TestResult = Result<(), MultipointError>;

fn cubic(x: f64) -> f64 { x * x * x - x - 2.0 }
fn dcubic(x: f64) -> f64 { 3.0 * x * x - 1.0 }

#[test]
fn midpoint_derivative_converges() -> TestResult {
    let res = multipoint(cubic, dcubic, 1.5, MultipointCfg::new())?;

    assert_abs_diff_eq!(res.root, 1.521_379_706_804_567_6, epsilon = 1e-5);
    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_eq!(res.algorithm_name, "multipoint");
    Ok(())
}

#[test]
fn predictor_corrector_converges() -> TestResult {
    let cfg = MultipointCfg::new().set_mode(MultipointMode::PredictorCorrector);
    let res = multipoint(cubic, dcubic, 1.5, cfg)?;

    assert_abs_diff_eq!(res.root, 1.521_379_706_804_567_6, epsilon = 1e-5);
    assert!(res.converged());
    Ok(())
}

#[test]
fn both_modes_agree_on_sqrt2() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let df  = |x: f64| 2.0 * x;
    let base = MultipointCfg::new().set_epsilon(1e-12)?;

    let mid  = multipoint(f, df, 2.0, base)?;
    let pred = multipoint(f, df, 2.0, base.set_mode(MultipointMode::PredictorCorrector))?;

    assert_abs_diff_eq!(mid.root, std::f64::consts::SQRT_2, epsilon = 1e-12);
    assert_abs_diff_eq!(pred.root, std::f64::consts::SQRT_2, epsilon = 1e-12);
    assert!(mid.iterations <= 5 && pred.iterations <= 5);
    Ok(())
}

#[test]
fn default_mode_is_midpoint_derivative() {
    assert_eq!(MultipointCfg::new().mode(), MultipointMode::MidpointDerivative);
}

#[test]
fn zero_derivative_is_an_error() {
    let f   = |x: f64| x * x - 1.0;
    let err = multipoint(f, |x| 2.0 * x, 0.0, MultipointCfg::new()).unwrap_err();

    assert_eq!(err, MultipointError::DerivativeTooSmall { x: 0.0, dfx: 0.0 });
}

#[test]
fn non_finite_derivative_is_an_error() {
    let err = multipoint(cubic, |_| f64::INFINITY, 1.5, MultipointCfg::new()).unwrap_err();
    assert!(matches!(err, MultipointError::DerivativeNotFinite { x, .. } if x == 1.5));
}
