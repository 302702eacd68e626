//! tests for regula falsi
use std::cell::RefCell;
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::regula_falsi::{regula_falsi, RegulaFalsiCfg, RegulaFalsiError};
use rootsolve::root_finding::secant::{secant, SecantCfg};
use rootsolve::root_finding::report::{Stencil, TerminationReason};

type TestResult = Result<(), RegulaFalsiError>;

fn cubic(x: f64) -> f64 { x * x * x - x - 2.0 }

#[test]
fn agrees_with_secant_on_cubic() -> TestResult {
    let rf = regula_falsi(cubic, 1.0, 2.0, RegulaFalsiCfg::new())?;
    let sc = secant(cubic, 1.0, 2.0, SecantCfg::new()).unwrap();

    assert_abs_diff_eq!(rf.root, 1.521_379_706_804_567_6, epsilon = 1e-5);
    assert_abs_diff_eq!(rf.root, sc.root, epsilon = 1e-5);
    assert_eq!(rf.termination_reason, TerminationReason::ToleranceReached);
    assert_eq!(rf.algorithm_name, "regula_falsi");
    Ok(())
}

#[test]
fn bracketing_start_stays_inside() -> TestResult {
    let seen = RefCell::new(Vec::new());
    let f = |x: f64| {
        seen.borrow_mut().push(x);
        cubic(x)
    };
    let res = regula_falsi(f, 1.0, 2.0, RegulaFalsiCfg::new())?;

    assert!(seen.borrow().iter().all(|&x| (1.0..=2.0).contains(&x)));
    assert_eq!(seen.borrow().len(), res.evaluations);

    let Stencil::Bracket { bounds: [a, b] } = res.stencil else {
        panic!("expected a bracket stencil, got {:?}", res.stencil);
    };
    assert!(cubic(a) * cubic(b) <= 0.0);
    Ok(())
}

#[test]
fn every_step_keeps_a_shrinking_bracket() -> TestResult {
    let mut prev_width = 1.0;
    for max_iter in 1..=60 {
        let cfg = RegulaFalsiCfg::new().set_max_iter(max_iter)?;
        let res = regula_falsi(cubic, 1.0, 2.0, cfg)?;

        let Stencil::Bracket { bounds: [a, b] } = res.stencil else {
            panic!("expected a bracket stencil, got {:?}", res.stencil);
        };
        let width = (b - a).abs();
        assert!(cubic(a) * cubic(b) <= 0.0, "lost the sign change after {max_iter} steps");
        assert!(width <= prev_width, "bracket grew after {max_iter} steps");
        prev_width = width;

        if res.converged() {
            return Ok(());
        }
    }
    panic!("no convergence within 60 steps");
}

#[test]
fn equal_guesses_are_rejected() {
    let err = regula_falsi(cubic, 2.0, 2.0, RegulaFalsiCfg::new()).unwrap_err();
    assert_eq!(err, RegulaFalsiError::InvalidGuess { x0: 2.0, x1: 2.0 });
}

#[test]
fn flat_function_is_degenerate() {
    let err = regula_falsi(|_| -3.0, 0.0, 1.0, RegulaFalsiCfg::new()).unwrap_err();
    assert!(matches!(err, RegulaFalsiError::DegenerateSecantStep { .. }));
}

#[test]
fn iteration_limit_is_reported() -> TestResult {
    let cfg = RegulaFalsiCfg::new().set_max_iter(2)?;
    let res = regula_falsi(cubic, 1.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(res.iterations, 2);
    Ok(())
}
