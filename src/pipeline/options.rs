//! Per-call pipeline configuration.
use crate::{
    methods::options::{CMethodOptions, KneedleOptions, MethodOptions},
    pipeline::errors::{KneeError, KneeResult},
};

/// Pipeline configuration.
///
/// Fields:
/// - `smoothing: f64` — cubic smoothing-spline factor λ; `0` disables
///   smoothing.
/// - `sort: bool` — stable-sort the input by x before anything else. When
///   `false`, x must already be strictly increasing.
/// - `methods: MethodOptions` — Kneedle and C-method tuning.
///
/// Default: `smoothing = 0.0`, `sort = true`, default method options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneeOptions {
    pub smoothing: f64,
    pub sort: bool,
    pub methods: MethodOptions,
}

impl KneeOptions {
    /// Validate and build pipeline options.
    ///
    /// # Errors
    /// - `KneeError::InvalidSmoothing` if `smoothing` is negative or
    ///   non-finite.
    pub fn new(smoothing: f64, sort: bool, methods: MethodOptions) -> KneeResult<Self> {
        verify_smoothing(smoothing)?;
        Ok(Self { smoothing, sort, methods })
    }

    /// Default options with the given smoothing factor and sort flag.
    pub fn with_smoothing(smoothing: f64, sort: bool) -> KneeResult<Self> {
        Self::new(smoothing, sort, MethodOptions::default())
    }

    /// Replace the Kneedle sensitivity, validating it.
    pub fn sensitivity(mut self, sensitivity: f64) -> KneeResult<Self> {
        self.methods.kneedle = KneedleOptions::new(sensitivity)?;
        Ok(self)
    }

    /// Replace the C-method options.
    pub fn c_method(mut self, c_method: CMethodOptions) -> Self {
        self.methods.c_method = c_method;
        self
    }
}

impl Default for KneeOptions {
    fn default() -> Self {
        Self { smoothing: 0.0, sort: true, methods: MethodOptions::default() }
    }
}

// ---- Helper Methods ----

pub(crate) fn verify_smoothing(smoothing: f64) -> KneeResult<()> {
    if smoothing.is_finite() && smoothing >= 0.0 {
        Ok(())
    } else {
        Err(KneeError::InvalidSmoothing { value: smoothing })
    }
}
