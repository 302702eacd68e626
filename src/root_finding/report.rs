//! Defines the [`RootFindingReport`] struct returned by all
//! iterative root-finding algorithms.

/// Reasons a root-finding algorithm may terminate.
/// - [`TerminationReason::IterationLimit`] is the "not converged" outcome;
///   the report then carries the best iterate seen.
/// - [`TerminationReason::SingularSystem`] is only produced by muller when
///   its three running points become collinear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    ToleranceReached,
    IterationLimit,
    SingularSystem,
}


/// Which tolerance condition was satisfied (or not).
/// - [`ToleranceSatisfied::AbsFxReached`]
///     - All methods
///     - |f(x)| < epsilon
/// - [`ToleranceSatisfied::StepSizeReached`]
///     - secant, regula falsi, chebyshev
///     - |x_n - x_{n - 1}| < epsilon
/// - [`ToleranceSatisfied::ToleranceNotReached`]
///     - All methods
///     - Tolerance not reached, with [`TerminationReason::IterationLimit`]
///       or [`TerminationReason::SingularSystem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceSatisfied {
    AbsFxReached,
    StepSizeReached,
    ToleranceNotReached
}


/// Method-specific data returned by a solver.
/// Contains the last set of points used in the update formula.
/// - [`Stencil::Bracket`] : bracket preserving methods
///     - `bounds` of the final enclosing pair, in iteration order
/// - [`Stencil::Open`]    : open methods
///     - `x` = last iterates used to compute the root
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Stencil {
    Bracket { bounds: [f64; 2] },
    Open    { x: [f64; 3], len: usize },
}
impl Stencil {
    pub fn stencil(&self) -> &[f64] {
        match self {
            Stencil::Bracket { bounds } => &bounds[..],
            Stencil::Open { x, len }    => &x[..*len],
        }
    }
    pub fn singleton(x: f64) -> Self {
        Stencil::Open { x: [x, 0.0, 0.0], len: 1 }
    }
    pub fn doubleton(x1: f64, x2: f64) -> Self {
        Stencil::Open { x: [x1, x2, 0.0], len: 2 }
    }
    pub fn tripleton(x1: f64, x2: f64, x3: f64) -> Self {
        Stencil::Open { x: [x1, x2, x3], len: 3 }
    }
    pub fn bracket(a: f64, b: f64) -> Self {
        Stencil::Bracket { bounds: [a, b] }
    }
}


/// Final report returned by all iterative root-finding algorithms.
///
/// [`RootFindingReport`]
/// - `root`                : best root estimate
/// - `f_root`              : function value at `root`
/// - `iterations`          : total iterations
/// - `evaluations`         : total function (and derivative) evaluations
/// - `termination_reason`  : why the solver stopped  ([`TerminationReason`])
/// - `tolerance_satisfied` : which tolerance was met ([`ToleranceSatisfied`])
/// - `stencil`             : last set of points used in update formula
/// - `algorithm_name`      : algorithm name (e.g. `"newton"`)
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RootFindingReport {
    pub root                : f64,
    pub f_root              : f64,
    pub iterations          : usize,
    pub evaluations         : usize,
    pub termination_reason  : TerminationReason,
    pub tolerance_satisfied : ToleranceSatisfied,
    pub stencil             : Stencil,
    pub algorithm_name      : &'static str,
}
impl RootFindingReport {
    /// `true` if a tolerance was reached.
    #[inline]
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::ToleranceReached
    }
}


/// Tracks the iterate with the smallest residual seen so far.
///
/// Used to report the best iterate on [`TerminationReason::IterationLimit`].
#[derive(Debug, Copy, Clone)]
pub(crate) struct Best {
    x  : f64,
    fx : f64,
}
impl Best {
    pub(crate) fn new(x: f64, fx: f64) -> Self {
        Self { x, fx }
    }

    /// Keeps `(x, fx)` if its residual magnitude improves.
    pub(crate) fn update(&mut self, x: f64, fx: f64) {
        if fx.abs() < self.fx.abs() {
            self.x  = x;
            self.fx = fx;
        }
    }

    pub(crate) fn x(&self)  -> f64 { self.x }
    pub(crate) fn fx(&self) -> f64 { self.fx }
}
