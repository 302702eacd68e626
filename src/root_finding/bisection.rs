//! Bracketing engine.
//!
//! Repeatedly bisects seed intervals, keeping every half that is not proven
//! free of a sign change, and turns the survivors into initial
//! approximations for the iterative methods.

use super::algorithms::{Algorithm, BracketFamily, GLOBAL_MAX_ITER_FALLBACK};
use super::errors::ToleranceError;
use super::signs::{sign_test, SignTest};
use thiserror::Error;


#[derive(Debug, Error, PartialEq)]
pub enum BisectionError {
    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: lower and upper must be finite with lower < upper. got [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },

    #[error("no seed intervals supplied")]
    NoIntervals,

    #[error("either the number of iterations or the target epsilon must be given")]
    MissingTermination,

    #[error("invalid iterations: must be >= 1. got iterations={got}")]
    InvalidIterations { got: usize },

    #[error("invalid digits: must be <= {max}. got digits={got}")]
    InvalidDigits { got: u32, max: u32 },
}


/// Closed interval `[lower, upper]` with `lower < upper`, both finite.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
}
impl Interval {
    pub fn new(lower: f64, upper: f64) -> Result<Self, BisectionError> {
        if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
            return Err(BisectionError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    #[inline] pub fn lower(&self) -> f64 { self.lower }
    #[inline] pub fn upper(&self) -> f64 { self.upper }
    #[inline] pub fn width(&self) -> f64 { self.upper - self.lower }
    #[inline] pub fn midpoint(&self) -> f64 { midpoint(self.lower, self.upper) }
}
impl TryFrom<(f64, f64)> for Interval {
    type Error = BisectionError;

    fn try_from((lower, upper): (f64, f64)) -> Result<Self, Self::Error> {
        Interval::new(lower, upper)
    }
}


/// One initial approximation: a rounded location and the function value at
/// the unrounded midpoint it came from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Approximation {
    pub x  : f64,
    pub fx : f64,
}


/// Bracketing configuration
///
/// # Fields
/// - `iterations` : fixed number of bisection rounds (optional)
/// - `epsilon`    : target interval width (optional)
/// - `digits`     : fractional digits kept in approximation locations
///
/// # Defaults
/// - `digits = 5`
/// - at least one of `iterations` / `epsilon` must be set before use;
///   when both are set the larger round count wins.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BisectionCfg {
    iterations : Option<usize>,
    epsilon    : Option<f64>,
    digits     : u32,
}
impl BisectionCfg {
    pub const DEFAULT_DIGITS: u32 = 5;
    /// Beyond this, `x * 10^digits` loses the fractional part of any f64.
    pub const MAX_DIGITS: u32 = 15;

    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_iterations(mut self, v: usize) -> Result<Self, BisectionError> {
        if v == 0 {
            return Err(BisectionError::InvalidIterations { got: v });
        }
        self.iterations = Some(v);
        Ok(self)
    }
    pub fn set_epsilon(mut self, v: f64) -> Result<Self, BisectionError> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ToleranceError::InvalidEpsilon { got: v }.into());
        }
        self.epsilon = Some(v);
        Ok(self)
    }
    pub fn set_digits(mut self, v: u32) -> Result<Self, BisectionError> {
        if v > Self::MAX_DIGITS {
            return Err(BisectionError::InvalidDigits { got: v, max: Self::MAX_DIGITS });
        }
        self.digits = v;
        Ok(self)
    }

    #[inline] #[must_use] pub fn iterations(&self) -> Option<usize> { self.iterations }
    #[inline] #[must_use] pub fn epsilon(&self) -> Option<f64> { self.epsilon }
    #[inline] #[must_use] pub fn digits(&self) -> u32 { self.digits }

    /// Number of bisection rounds for `intervals`.
    ///
    /// The epsilon-derived count is the largest [`theoretical_iter`] over all
    /// intervals, capped at [`GLOBAL_MAX_ITER_FALLBACK`].
    pub fn resolve_rounds(&self, intervals: &[Interval]) -> Result<usize, BisectionError> {
        match (self.iterations, self.epsilon) {
            (None, None)             => Err(BisectionError::MissingTermination),
            (Some(0), _)             => Err(BisectionError::InvalidIterations { got: 0 }),
            (Some(n), None)          => Ok(n),
            (iterations, Some(eps))  => {
                let by_eps = intervals
                    .iter()
                    .map(|i| theoretical_iter(i.width(), eps))
                    .max()
                    .unwrap_or(0)
                    .min(GLOBAL_MAX_ITER_FALLBACK);
                Ok(iterations.unwrap_or(0).max(by_eps))
            }
        }
    }
}
impl Default for BisectionCfg {
    fn default() -> Self {
        Self {
            iterations : None,
            epsilon    : None,
            digits     : Self::DEFAULT_DIGITS,
        }
    }
}


/// Calculates midpoint of [a, b]
#[inline]
pub(crate) fn midpoint(a: f64, b: f64) -> f64 {
    a + (b - a) * 0.5
}


/// Minimum number of halvings that shrink a width `width` below `epsilon`:
/// `ceil(log2(width) - log2(epsilon))`, or `0` if `width <= epsilon`.
pub fn theoretical_iter(width: f64, epsilon: f64) -> usize {
    let n = (width.log2() - epsilon.log2()).ceil();
    if n.is_nan() || n <= 0.0 {
        0
    } else {
        n as usize
    }
}


/// Rounds `x` to `digits` fractional digits.
#[inline]
pub(crate) fn round_to_digits(x: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let rounded = (x * scale).round() / scale;
    if rounded.is_finite() { rounded } else { x }
}


/// Localizes the roots of `func` inside `intervals` by repeated bisection.
///
/// # Arguments
/// - `func`      : function whose roots are sought
/// - `intervals` : seed intervals `(lower, upper)`, each with `lower < upper`
/// - `cfg`       : [`BisectionCfg`] (iterations and/or epsilon, digits)
///
/// # Returns
/// One [`Approximation`] per surviving sub-interval, in bisection order.
/// Locations are rounded to `cfg.digits()`; entries that round to the same
/// location are all kept.
///
/// # Errors
/// - [`BisectionError::InvalidBounds`]      : an interval has `lower >= upper` or non-finite ends
/// - [`BisectionError::NoIntervals`]        : `intervals` is empty
/// - [`BisectionError::MissingTermination`] : neither iterations nor epsilon set
///
/// # Behavior
/// - Every round splits each tracked interval at its midpoint.
/// - A half is kept unless [`sign_test`] proves it does not bracket,
///   so halves whose endpoint is an exact root survive as well.
/// - If the first half reports the midpoint itself as exact root, the second
///   half is not tested.
///
/// # Warning
/// - An even number of roots inside one half shows no sign change and the
///   half is dropped. Keep seed intervals small enough to isolate roots.
pub fn bisect_intervals<F>(
    func: F,
    intervals: &[(f64, f64)],
    cfg: BisectionCfg,
) -> Result<Vec<Approximation>, BisectionError>
where F: Fn(f64) -> f64 {

    if intervals.is_empty() {
        return Err(BisectionError::NoIntervals);
    }
    let seeds = intervals
        .iter()
        .map(|&pair| Interval::try_from(pair))
        .collect::<Result<Vec<_>, _>>()?;

    let rounds    = cfg.resolve_rounds(&seeds)?;
    let digits    = cfg.digits();
    let algo_name = Algorithm::Bracket(BracketFamily::Bisection).algorithm_name();

    let mut tracked: Vec<(f64, f64)> = seeds.iter().map(|i| (i.lower(), i.upper())).collect();
    for round in 1..=rounds {
        let mut next = Vec::with_capacity(tracked.len() * 2);
        for &(lower, upper) in &tracked {
            let mid  = midpoint(lower, upper);

            let left = sign_test(&func, (lower, mid));
            if left.may_contain_root() {
                next.push((lower, mid));
            }
            // root already captured at the split point
            if left == SignTest::ExactRoot(mid) {
                continue;
            }

            let right = sign_test(&func, (mid, upper));
            if right.may_contain_root() {
                next.push((mid, upper));
            }
        }
        log::trace!("{algo_name}: round {round}/{rounds}, {} candidate intervals", next.len());
        tracked = next;
    }

    let approximations: Vec<Approximation> = tracked
        .iter()
        .map(|&(lower, upper)| {
            let mid = midpoint(lower, upper);
            Approximation { x: round_to_digits(mid, digits), fx: func(mid) }
        })
        .collect();

    log::debug!(
        "{algo_name}: {} approximations from {} intervals after {rounds} rounds",
        approximations.len(),
        seeds.len()
    );
    Ok(approximations)
}
