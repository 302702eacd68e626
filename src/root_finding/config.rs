//! Shared configuration for iterative root-finding algorithms.
//!
//! Provides [`CommonCfg`] with the default tolerance and iteration limit,
//! used by all refinement configs.
//!
//! [`CommonCfg`] universal fields
//! ├ `epsilon`  : tolerance on the residual |f(x)| and on the step size
//! └ `max_iter` : iteration cap per seed (optional)
//!
//! [`CommonCfg::new`] initializes configuration with default values.
//!
//! Some algorithms (e.g. muller, multipoint) have additional config
//! arguments, such as the restart budget or which update rule to use.


pub const DEFAULT_EPSILON : f64 = 1e-5;


#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CommonCfg {
    epsilon  : f64,
    max_iter : Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            epsilon  : DEFAULT_EPSILON,
            max_iter : None
        }
    }

    // getters
    pub fn epsilon(&self)  -> f64 { self.epsilon }
    pub fn max_iter(&self) -> Option<usize> { self.max_iter }

    // setters (internal)
    pub(crate) fn with_epsilon  (&mut self, v: f64)   { self.epsilon  = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize) { self.max_iter = Some(v); }
}
impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_epsilon(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::root_finding::errors::ToleranceError::InvalidEpsilon { got: v }
                    );
                }
                self.common.with_epsilon(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }

            #[inline] pub fn epsilon(&self)  -> f64 { self.common.epsilon() }
            #[inline] pub fn max_iter(&self) -> Option<usize> { self.common.max_iter() }
        }
    };
}
pub(crate) use impl_common_cfg;
