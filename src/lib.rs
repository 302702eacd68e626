//! Real roots of scalar functions.
//!
//! A bracketing pass ([`root_finding::bisection`]) localizes sign changes inside
//! user supplied intervals; an iterative method then polishes every
//! approximation into a root estimate.
//!
//! ```
//! use rootsolve::root_finding::bisection::BisectionCfg;
//! use rootsolve::root_finding::newton::{NewtonCfg, NewtonSolver};
//! use rootsolve::root_finding::solver::{Seeds, Solver};
//!
//! let f  = |x: f64| x * x - 5.0 * x + 6.0;
//! let df = |x: f64| 2.0 * x - 5.0;
//!
//! let mut solver = NewtonSolver::new(f, df, NewtonCfg::new());
//! solver.set_intervals(vec![(1.0, 4.0)]);
//! solver.compute_approximations(BisectionCfg::new().set_iterations(10).unwrap()).unwrap();
//! solver.compute_roots(Seeds::Approximations).unwrap();
//!
//! let roots = solver.roots().unwrap();
//! assert_eq!(roots.len(), 2);
//! assert!((roots[0] - 2.0).abs() < 1e-5);
//! assert!((roots[1] - 3.0).abs() < 1e-5);
//! ```

pub mod root_finding;
