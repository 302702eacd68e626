//! Solver abstraction shared by every iterative method.
//!
//! A solver owns its function handle(s) and configuration, plus a
//! [`SolverState`] holding the seed intervals, the approximations derived
//! from them and the reports of the last refinement.
//!
//! Lifecycle
//! ┌ [`Solver::set_intervals`]          : attach seed intervals
//! ├ [`Solver::compute_approximations`] : bracket the intervals (needs intervals)
//! ├ [`Solver::compute_roots`]          : refine approximations or explicit seeds
//! └ [`Solver::roots`] / [`Solver::reports`] / [`Solver::approximations`]
//!
//! Recomputing overwrites the previous approximations/roots, never merges.

use super::algorithms::Algorithm;
use super::bisection::{bisect_intervals, Approximation, BisectionCfg, BisectionError};
use super::errors::SolverError;
use super::report::RootFindingReport;


/// Seeds consumed by [`Solver::compute_roots`].
///
/// [`Seeds::Approximations`] is the unset tag: the locations of the computed
/// approximations are used, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Seeds {
    #[default]
    Approximations,
    Explicit(Vec<f64>),
}
impl From<f64> for Seeds {
    fn from(x: f64) -> Self { Seeds::Explicit(vec![x]) }
}
impl From<Vec<f64>> for Seeds {
    fn from(xs: Vec<f64>) -> Self { Seeds::Explicit(xs) }
}
impl From<&[f64]> for Seeds {
    fn from(xs: &[f64]) -> Self { Seeds::Explicit(xs.to_vec()) }
}
impl<const N: usize> From<[f64; N]> for Seeds {
    fn from(xs: [f64; N]) -> Self { Seeds::Explicit(xs.to_vec()) }
}


/// Mutable state every solver carries.
#[derive(Debug, Clone, Default)]
pub struct SolverState {
    intervals      : Option<Vec<(f64, f64)>>,
    approximations : Option<Vec<Approximation>>,
    reports        : Option<Vec<RootFindingReport>>,
}
impl SolverState {
    pub fn new() -> Self { Self::default() }
}


/// Common contract of the iterative methods.
///
/// Implementors supply access to their state, a plain evaluation of `f` and
/// the method-specific refinement of a batch of seeds; everything else is
/// provided.
pub trait Solver {
    type Error: From<SolverError> + From<BisectionError>;

    fn state(&self) -> &SolverState;
    fn state_mut(&mut self) -> &mut SolverState;

    /// Evaluates the target function.
    fn eval(&self, x: f64) -> f64;

    fn algorithm(&self) -> Algorithm;

    /// Refines each seed independently; one report per seed, in seed order.
    fn refine_seeds(&mut self, seeds: &[f64]) -> Result<Vec<RootFindingReport>, Self::Error>;

    fn set_intervals(&mut self, intervals: Vec<(f64, f64)>) {
        self.state_mut().intervals = Some(intervals);
    }

    fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.state().intervals.as_deref()
    }

    /// Brackets the attached intervals, replacing any previous approximations.
    /// Previous approximations are discarded even if bracketing fails.
    ///
    /// # Errors
    /// - [`SolverError::IntervalsNotSet`] : no intervals attached
    /// - any [`BisectionError`] from [`bisect_intervals`]
    fn compute_approximations(
        &mut self,
        cfg: BisectionCfg
    ) -> Result<&[Approximation], Self::Error> {
        self.state_mut().approximations = None;
        let intervals = self.state().intervals.as_deref().ok_or(SolverError::IntervalsNotSet)?;
        let approximations = bisect_intervals(|x| self.eval(x), intervals, cfg)?;

        Ok(&self.state_mut().approximations.insert(approximations)[..])
    }

    /// Refines `seeds` into root estimates, replacing any previous roots.
    ///
    /// # Errors
    /// - [`SolverError::ApproximationsNotComputed`] : [`Seeds::Approximations`]
    ///   requested before [`Solver::compute_approximations`]
    /// - method-specific errors from the first seed that fails; the stored
    ///   roots are cleared in that case
    fn compute_roots<S>(&mut self, seeds: S) -> Result<&[RootFindingReport], Self::Error>
    where S: Into<Seeds>, Self: Sized {
        let seeds: Vec<f64> = match seeds.into() {
            Seeds::Approximations => self
                .state()
                .approximations
                .as_ref()
                .ok_or(SolverError::ApproximationsNotComputed)?
                .iter()
                .map(|a| a.x)
                .collect(),
            Seeds::Explicit(xs) => xs,
        };

        self.state_mut().reports = None;
        let reports = self.refine_seeds(&seeds)?;
        let algorithm = self.algorithm();
        log::debug!(
            "{algorithm}: refined {} seeds (order {})",
            reports.len(),
            algorithm.convergence_order()
        );

        Ok(&self.state_mut().reports.insert(reports)[..])
    }

    fn approximations(&self) -> Result<&[Approximation], SolverError> {
        self.state().approximations.as_deref().ok_or(SolverError::ApproximationsNotComputed)
    }

    fn reports(&self) -> Result<&[RootFindingReport], SolverError> {
        self.state().reports.as_deref().ok_or(SolverError::RootsNotComputed)
    }

    /// Root estimates, one per seed consumed, in seed order. Not deduplicated.
    fn roots(&self) -> Result<Vec<f64>, SolverError> {
        Ok(self.reports()?.iter().map(|r| r.root).collect())
    }
}
