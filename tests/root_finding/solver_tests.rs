//! tests for the bracket-then-refine lifecycle shared by every solver
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::bisection::BisectionCfg;
use rootsolve::root_finding::chebyshev::{ChebyshevCfg, ChebyshevSolver};
use rootsolve::root_finding::errors::SolverError;
use rootsolve::root_finding::multipoint::{MultipointCfg, MultipointMode, MultipointSolver};
use rootsolve::root_finding::newton::{NewtonCfg, NewtonError, NewtonSolver};
use rootsolve::root_finding::offsets::SeedOffsets;
use rootsolve::root_finding::regula_falsi::{RegulaFalsiCfg, RegulaFalsiSolver};
use rootsolve::root_finding::secant::{SecantCfg, SecantSolver};
use rootsolve::root_finding::solver::{Seeds, Solver};

type TestResult = Result<(), NewtonError>;

fn quadratic(x: f64) -> f64 { x * x - 5.0 * x + 6.0 }
fn dquadratic(x: f64) -> f64 { 2.0 * x - 5.0 }

fn bracketing() -> BisectionCfg {
    BisectionCfg::new().set_iterations(10).unwrap()
}

fn assert_two_and_three(roots: &[f64]) {
    assert_eq!(roots.len(), 2);
    assert_abs_diff_eq!(roots[0], 2.0, epsilon = 1e-4);
    assert_abs_diff_eq!(roots[1], 3.0, epsilon = 1e-4);
}

#[test]
fn nothing_computed_yet() {
    let solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new());

    assert!(solver.intervals().is_none());
    assert_eq!(solver.approximations().unwrap_err(), SolverError::ApproximationsNotComputed);
    assert_eq!(solver.roots().unwrap_err(), SolverError::RootsNotComputed);
}

#[test]
fn bracketing_without_intervals_fails() {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new());
    let err = solver.compute_approximations(bracketing()).unwrap_err();

    assert_eq!(err, NewtonError::Solver(SolverError::IntervalsNotSet));
}

#[test]
fn refining_before_bracketing_fails() {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new())
        .with_intervals(vec![(1.0, 4.0)]);
    let err = solver.compute_roots(Seeds::Approximations).unwrap_err();

    assert_eq!(err, NewtonError::Solver(SolverError::ApproximationsNotComputed));
}

#[test]
fn bracket_then_refine() -> TestResult {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new())
        .with_intervals(vec![(1.0, 4.0)]);

    let approx = solver.compute_approximations(bracketing())?;
    assert_eq!(approx.len(), 2);

    let reports = solver.compute_roots(Seeds::Approximations)?;
    assert!(reports.iter().all(|r| r.converged()));

    assert_two_and_three(&solver.roots()?);
    Ok(())
}

#[test]
fn explicit_seeds_skip_bracketing() -> TestResult {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new());
    solver.compute_roots([1.9, 2.1])?;

    let roots = solver.roots()?;
    assert_eq!(roots.len(), 2);
    assert!(roots.iter().all(|&r| (r - 2.0).abs() < 1e-5));
    assert!(solver.approximations().is_err());
    Ok(())
}

#[test]
fn recompute_replaces_previous_roots() -> TestResult {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new());
    solver.compute_roots(1.5)?;
    assert_eq!(solver.roots()?.len(), 1);

    solver.compute_roots(vec![1.5, 3.5])?;
    let roots = solver.roots()?;
    assert_two_and_three(&roots);
    Ok(())
}

#[test]
fn failed_refinement_clears_roots() -> TestResult {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new());
    solver.compute_roots(1.5)?;

    // f'(2.5) = 0
    let err = solver.compute_roots([1.5, 2.5]).unwrap_err();
    assert!(matches!(err, NewtonError::DerivativeTooSmall { .. }));
    assert_eq!(solver.roots().unwrap_err(), SolverError::RootsNotComputed);
    Ok(())
}

#[test]
fn bracketing_errors_propagate() {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new())
        .with_intervals(vec![(4.0, 1.0)]);

    let err = solver.compute_approximations(bracketing()).unwrap_err();
    assert!(matches!(err, NewtonError::Bisection(_)));
}

#[test]
fn secant_solver_is_repeatable() {
    let mut solver = SecantSolver::new(quadratic, SecantCfg::new())
        .with_intervals(vec![(1.0, 4.0)]);
    solver.compute_approximations(bracketing()).unwrap();

    let first = solver.compute_roots(Seeds::Approximations).unwrap().to_vec();
    let again = solver.compute_roots(Seeds::Approximations).unwrap().to_vec();

    assert_eq!(first, again);
    assert_two_and_three(&solver.roots().unwrap());
}

#[test]
fn fixed_offsets_reproduce_across_solvers() {
    let offsets = SeedOffsets::Fixed([0.05, -0.05]);
    let cfg = RegulaFalsiCfg::new().set_offsets(offsets).unwrap();
    let mut solver = RegulaFalsiSolver::new(quadratic, cfg).with_intervals(vec![(1.0, 4.0)]);

    solver.compute_approximations(bracketing()).unwrap();
    solver.compute_roots(Seeds::Approximations).unwrap();
    assert_two_and_three(&solver.roots().unwrap());
}

#[test]
fn chebyshev_solver_pipeline() {
    let mut solver = ChebyshevSolver::new(quadratic, dquadratic, |_| 2.0, ChebyshevCfg::new())
        .with_intervals(vec![(1.0, 4.0)]);

    solver.compute_approximations(bracketing()).unwrap();
    solver.compute_roots(Seeds::Approximations).unwrap();
    assert_two_and_three(&solver.roots().unwrap());
}

#[test]
fn multipoint_solver_pipeline() {
    for mode in [MultipointMode::MidpointDerivative, MultipointMode::PredictorCorrector] {
        let cfg = MultipointCfg::new().set_mode(mode);
        let mut solver = MultipointSolver::new(quadratic, dquadratic, cfg)
            .with_intervals(vec![(1.0, 4.0)]);

        solver.compute_approximations(bracketing()).unwrap();
        solver.compute_roots(Seeds::Approximations).unwrap();
        assert_two_and_three(&solver.roots().unwrap());
    }
}

#[test]
fn several_intervals_keep_order() -> TestResult {
    let f  = |x: f64| (x - 1.0) * (x + 2.0) * (x - 4.0);
    let df = |x: f64| 3.0 * x * x - 6.0 * x - 6.0;
    let mut solver = NewtonSolver::new(f, df, NewtonCfg::new())
        .with_intervals(vec![(3.0, 5.5), (-3.0, -1.2), (0.3, 1.8)]);

    solver.compute_approximations(BisectionCfg::new().set_epsilon(1e-6)?)?;
    solver.compute_roots(Seeds::Approximations)?;

    let roots = solver.roots()?;
    assert_eq!(roots.len(), 3);
    assert_abs_diff_eq!(roots[0], 4.0, epsilon = 1e-5);
    assert_abs_diff_eq!(roots[1], -2.0, epsilon = 1e-5);
    assert_abs_diff_eq!(roots[2], 1.0, epsilon = 1e-5);
    Ok(())
}

#[test]
fn undefined_region_does_not_sink_the_batch() -> TestResult {
    let f  = |x: f64| 1.0 - x.sqrt();
    let df = |x: f64| -0.5 / x.sqrt();
    let mut solver = NewtonSolver::new(f, df, NewtonCfg::new())
        .with_intervals(vec![(-4.0, 4.0)]);

    solver.compute_approximations(BisectionCfg::new().set_iterations(20)?)?;
    solver.compute_roots(Seeds::Approximations)?;

    let roots = solver.roots()?;
    assert_eq!(roots.len(), 1);
    assert_abs_diff_eq!(roots[0], 1.0, epsilon = 1e-5);
    Ok(())
}

#[test]
fn failed_rebracket_discards_old_approximations() -> TestResult {
    let mut solver = NewtonSolver::new(quadratic, dquadratic, NewtonCfg::new())
        .with_intervals(vec![(1.0, 4.0)]);
    solver.compute_approximations(bracketing())?;
    assert_eq!(solver.approximations()?.len(), 2);

    solver.set_intervals(vec![(5.0, 4.0)]);
    let err = solver.compute_approximations(bracketing()).unwrap_err();
    assert!(matches!(err, NewtonError::Bisection(_)));
    assert_eq!(solver.approximations().unwrap_err(), SolverError::ApproximationsNotComputed);

    let err = solver.compute_roots(Seeds::Approximations).unwrap_err();
    assert_eq!(err, NewtonError::Solver(SolverError::ApproximationsNotComputed));
    Ok(())
}
