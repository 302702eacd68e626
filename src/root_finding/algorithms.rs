//! Root-finding algorithm definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! along with the shared [`GLOBAL_MAX_ITER_FALLBACK`] hard cap.


/// Most methods use heuristic defaults from [`Algorithm::default_max_iter`].
/// This cap is only applied when a method has no heuristic of its own, or when
/// the theoretical bisection bound would otherwise exceed it.
///
/// Serves as a practical safeguard against iteration counts that are
/// mathematically valid but computationally excessive.
pub const GLOBAL_MAX_ITER_FALLBACK: usize = 500;


/// Root-finding algorithm variants.
/// - [`Algorithm::Bracket`] contains bracket methods (sign-change preserving)
/// - [`Algorithm::Open`]    contains open methods (seed driven refinement)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketFamily {
    Bisection,
    RegulaFalsi,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenFamily {
    Newton,
    Secant,
    Muller,
    Chebyshev,
    Multipoint,
}

impl Algorithm {
    /// Default iteration count if `max_iter` is unset in config.
    ///
    /// # Notes
    /// - Applied only when `max_iter` is unset.
    /// - Values are heuristic and method-specific; higher order methods
    ///   get smaller budgets.
    /// - [`BracketFamily::Bisection`] returns `None`, meaning “compute
    ///   theoretical bound instead”.
    pub const fn default_max_iter(self) -> Option<usize> {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => None,
            Algorithm::Bracket(BracketFamily::RegulaFalsi) => Some(200),
            Algorithm::Open(OpenFamily::Secant)            => Some(100),
            Algorithm::Open(OpenFamily::Muller)            => Some(100),
            Algorithm::Open(OpenFamily::Newton)            => Some(50),
            Algorithm::Open(OpenFamily::Chebyshev)
            | Algorithm::Open(OpenFamily::Multipoint)      => Some(50),
        }
    }

    /// Asymptotic order of convergence near a simple root.
    pub const fn convergence_order(self) -> f64 {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => 1.0,
            Algorithm::Bracket(BracketFamily::RegulaFalsi) => 1.0,
            Algorithm::Open(OpenFamily::Secant)            => 1.618,
            Algorithm::Open(OpenFamily::Muller)            => 1.84,
            Algorithm::Open(OpenFamily::Newton)            => 2.0,
            Algorithm::Open(OpenFamily::Chebyshev)         => 3.0,
            Algorithm::Open(OpenFamily::Multipoint)        => 3.0,
        }
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => "bisection",
            Algorithm::Bracket(BracketFamily::RegulaFalsi) => "regula_falsi",
            Algorithm::Open(OpenFamily::Newton)            => "newton",
            Algorithm::Open(OpenFamily::Secant)            => "secant",
            Algorithm::Open(OpenFamily::Muller)            => "muller",
            Algorithm::Open(OpenFamily::Chebyshev)         => "chebyshev",
            Algorithm::Open(OpenFamily::Multipoint)        => "multipoint",
        }
    }

    /// Resolves the iteration budget for a refinement.
    /// Explicit `max_iter` wins, then the heuristic, then the global cap.
    pub(crate) fn resolve_max_iter(self, max_iter: Option<usize>) -> usize {
        match max_iter {
            Some(v) => v,
            None    => self.default_max_iter().unwrap_or(GLOBAL_MAX_ITER_FALLBACK),
        }
    }
}
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
