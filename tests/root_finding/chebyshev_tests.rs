//! tests for chebyshev
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::chebyshev::{chebyshev, ChebyshevCfg, ChebyshevError};
use rootsolve::root_finding::newton::{newton, NewtonCfg, NewtonError};
use rootsolve::root_finding::report::ToleranceSatisfied;

type TestResult = Result<(), ChebyshevError>;

fn cubic(x: f64) -> f64 { x * x * x - x - 2.0 }
fn dcubic(x: f64) -> f64 { 3.0 * x * x - 1.0 }
fn d2cubic(x: f64) -> f64 { 6.0 * x }

#[test]
fn converges_on_cubic() -> TestResult {
    let res = chebyshev(cubic, dcubic, d2cubic, 1.5, ChebyshevCfg::new())?;

    assert_abs_diff_eq!(res.root, 1.521_379_706_804_567_6, epsilon = 1e-5);
    assert!(res.converged());
    assert_eq!(res.algorithm_name, "chebyshev");
    Ok(())
}

#[test]
fn needs_no_more_steps_than_newton() -> TestResult {
    let cfg = ChebyshevCfg::new().set_epsilon(1e-12)?;
    let ch  = chebyshev(cubic, dcubic, d2cubic, 3.0, cfg)?;
    let nw  = newton(cubic, dcubic, 3.0, NewtonCfg::new().set_epsilon(1e-12).unwrap()).unwrap();

    assert!(ch.iterations <= nw.iterations);
    assert_abs_diff_eq!(ch.root, nw.root, epsilon = 1e-10);
    Ok(())
}

#[test]
fn small_step_is_accepted_immediately() -> TestResult {
    // steep line: residual above epsilon but the step is ~1e-7
    let f   = |x: f64| 1e3 * (x - 1.0);
    let res = chebyshev(f, |_| 1e3, |_| 0.0, 1.0 + 1e-7, ChebyshevCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::StepSizeReached);
    assert_abs_diff_eq!(res.root, 1.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn zero_derivative_is_an_error() {
    let f   = |x: f64| x * x - 1.0;
    let err = chebyshev(f, |x| 2.0 * x, |_| 2.0, 0.0, ChebyshevCfg::new()).unwrap_err();

    assert_eq!(err, ChebyshevError::Newton(NewtonError::DerivativeTooSmall { x: 0.0, dfx: 0.0 }));
}

#[test]
fn non_finite_second_derivative_is_an_error() {
    let err = chebyshev(cubic, dcubic, |_| f64::NAN, 1.5, ChebyshevCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        ChebyshevError::SecondDerivativeNotFinite { x, d2fx } if x == 1.5 && d2fx.is_nan()
    ));
}
