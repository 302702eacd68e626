//! Deterministic seed perturbation for multi-point methods.
//!
//! Secant, regula falsi and muller need two or three starting points but a
//! solver is seeded with a single location. The extra points are placed a
//! small positive offset away from the seed. Offsets come from a
//! [`SeedOffsets`] source so runs are reproducible.


/// Default magnitude of a seed perturbation.
pub const DEFAULT_OFFSET_SCALE: f64 = 0.1;

/// Default seed of [`SeedOffsets::Seeded`].
pub const DEFAULT_OFFSET_SEED: u64 = 0x5EED;


/// Source of the small offsets used to build extra starting points.
///
/// - [`SeedOffsets::Seeded`] : pseudo-random offsets in `(0, scale]`
/// - [`SeedOffsets::Fixed`]  : cycles through the two given offsets
///
/// Every call to [`SeedOffsets::stream`] starts from the beginning, so two
/// refinements with the same source see the same offsets.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SeedOffsets {
    Seeded { seed: u64, scale: f64 },
    Fixed([f64; 2]),
}
impl SeedOffsets {
    pub fn stream(&self) -> OffsetStream {
        match *self {
            SeedOffsets::Seeded { seed, scale } => OffsetStream::Seeded {
                rng: fastrand::Rng::with_seed(seed),
                scale,
            },
            SeedOffsets::Fixed(values) => OffsetStream::Fixed { values, next: 0 },
        }
    }

    /// Offsets must be finite and non-zero so extra points differ from the seed.
    pub(crate) fn is_valid(&self) -> bool {
        match *self {
            SeedOffsets::Seeded { scale, .. } => scale.is_finite() && scale > 0.0,
            SeedOffsets::Fixed(values)        => values.iter().all(|v| v.is_finite() && *v != 0.0),
        }
    }
}
impl Default for SeedOffsets {
    fn default() -> Self {
        SeedOffsets::Seeded { seed: DEFAULT_OFFSET_SEED, scale: DEFAULT_OFFSET_SCALE }
    }
}


/// Infinite iterator of offsets produced by [`SeedOffsets::stream`].
#[derive(Debug, Clone)]
pub enum OffsetStream {
    Seeded { rng: fastrand::Rng, scale: f64 },
    Fixed  { values: [f64; 2], next: usize },
}
impl Iterator for OffsetStream {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            // 1 - [0, 1) keeps the offset strictly positive
            OffsetStream::Seeded { rng, scale } => Some(*scale * (1.0 - rng.f64())),
            OffsetStream::Fixed { values, next } => {
                let v = values[*next % 2];
                *next += 1;
                Some(v)
            }
        }
    }
}
impl OffsetStream {
    /// Next offset; the stream never ends.
    #[inline]
    pub(crate) fn draw(&mut self) -> f64 {
        self.next().unwrap_or(DEFAULT_OFFSET_SCALE)
    }
}
