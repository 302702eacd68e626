//! tests for secant
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::secant::{secant, SecantCfg, SecantError};
use rootsolve::root_finding::offsets::SeedOffsets;
use rootsolve::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), SecantError>;

fn cubic(x: f64) -> f64 { x * x * x - x - 2.0 }

#[test]
fn converges_on_cubic() -> TestResult {
    let res = secant(cubic, 1.0, 2.0, SecantCfg::new())?;

    assert_abs_diff_eq!(res.root, 1.521_379_706_804_567_6, epsilon = 1e-5);
    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_eq!(res.algorithm_name, "secant");
    assert_eq!(res.stencil.stencil().len(), 2);
    Ok(())
}

#[test]
fn converges_on_transcendental() -> TestResult {
    let f   = |x: f64| x.cos() - x;
    let cfg = SecantCfg::new().set_epsilon(1e-10)?;
    let res = secant(f, 0.0, 1.0, cfg)?;

    assert_abs_diff_eq!(res.root, 0.739_085_133_215_160_7, epsilon = 1e-9);
    Ok(())
}

#[test]
fn close_guesses_stop_on_step_size() -> TestResult {
    // first step already below epsilon: stops without touching the residual
    let f   = |x: f64| x - 5.0;
    let res = secant(f, 0.0, 1e-6, SecantCfg::new())?;

    assert_eq!(res.iterations, 0);
    assert_eq!(res.root, 1e-6);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::StepSizeReached);
    Ok(())
}

#[test]
fn equal_guesses_are_rejected() {
    let err = secant(cubic, 1.0, 1.0, SecantCfg::new()).unwrap_err();
    assert_eq!(err, SecantError::InvalidGuess { x0: 1.0, x1: 1.0 });
}

#[test]
fn flat_function_is_degenerate() {
    let err = secant(|_| 1.0, 0.0, 1.0, SecantCfg::new()).unwrap_err();
    assert_eq!(err, SecantError::DegenerateSecantStep { x0: 0.0, x1: 1.0 });
}

#[test]
fn iteration_limit_reports_best_iterate() -> TestResult {
    let f   = |x: f64| x * x + 1.0;
    let cfg = SecantCfg::new().set_max_iter(3)?;
    let res = secant(f, 0.5, 1.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(res.iterations, 3);
    assert!(res.f_root <= f(1.0));
    assert_abs_diff_eq!(res.f_root, f(res.root), epsilon = 1e-12);
    Ok(())
}

#[test]
fn zero_offsets_rejected() {
    let err = SecantCfg::new().set_offsets(SeedOffsets::Fixed([0.1, 0.0])).unwrap_err();
    assert_eq!(err, SecantError::InvalidOffsets);
}
