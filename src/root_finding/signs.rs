//! Sign utilities for root-finding algorithms.
//! - `sign_test`     : intermediate value theorem verdict on an interval
//! - `opposite_sign` : `true` if two non-zero values have opposite sign


/// Verdict of [`sign_test`] on an interval `[lower, upper]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SignTest {
    /// `f(lower)` and `f(upper)` have opposite signs; a root lies inside.
    Brackets,
    /// `f(lower)` and `f(upper)` share a sign; no sign change on the interval.
    DoesNotBracket,
    /// An endpoint is an exact root. The bracket itself is inconclusive.
    ExactRoot(f64),
}
impl SignTest {
    /// `false` only when the interval is proven free of a sign change.
    #[inline]
    pub fn may_contain_root(&self) -> bool {
        !matches!(self, SignTest::DoesNotBracket)
    }
}


/// Applies the intermediate value theorem to `[lower, upper]`.
///
/// # Behavior
/// - `f(lower) == 0` reports [`SignTest::ExactRoot`] with `lower`, checked first
/// - `f(upper) == 0` reports [`SignTest::ExactRoot`] with `upper`
/// - otherwise [`SignTest::Brackets`] iff `f(lower) * f(upper) < 0`
///
/// Signs are compared directly so tiny endpoint values whose product
/// underflows to zero still give the right verdict. A NaN endpoint value
/// never brackets.
pub fn sign_test<F>(func: F, (lower, upper): (f64, f64)) -> SignTest
where F: Fn(f64) -> f64 {
    let f_lower = func(lower);
    if f_lower == 0.0 {
        return SignTest::ExactRoot(lower);
    }
    let f_upper = func(upper);
    if f_upper == 0.0 {
        return SignTest::ExactRoot(upper);
    }
    sign_test_values(f_lower, f_upper)
}


/// [`sign_test`] on already evaluated, non-zero endpoint values.
#[inline]
pub(crate) fn sign_test_values(f_lower: f64, f_upper: f64) -> SignTest {
    // NaN carries an arbitrary sign bit
    if f_lower.is_nan() || f_upper.is_nan() {
        return SignTest::DoesNotBracket;
    }
    if opposite_sign(f_lower, f_upper) {
        SignTest::Brackets
    } else {
        SignTest::DoesNotBracket
    }
}


/// Returns `true` if `x` and `y` have opposite signs.
#[inline]
pub(crate) fn opposite_sign(x: f64, y: f64) -> bool {
    x.is_sign_positive() != y.is_sign_positive()
}
