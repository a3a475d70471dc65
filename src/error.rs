use crate::dsp::filter::time_constant_micros;

/// Configuration errors. Rejected before any filter state is touched.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("cutoff frequency must be positive with a finite, non-zero time constant, got {0} Hz")]
    InvalidCutoff(f32),
    #[error("initial value must be finite, got {0}")]
    NonFiniteInitialValue(f32),
}

/// Checks a cutoff frequency before it is committed.
///
/// The derived τ must also be usable: finite, and non-zero even when
/// expressed in seconds, or the update would divide ∞/∞ or 0/0.
pub(crate) fn check_cutoff(cutoff_hz: f32) -> Result<f32, FilterError> {
    if !(cutoff_hz.is_finite() && cutoff_hz > 0.0) {
        return Err(FilterError::InvalidCutoff(cutoff_hz));
    }

    let tau_micros = time_constant_micros(cutoff_hz);
    if tau_micros.is_finite() && tau_micros * 1.0e-6 > 0.0 {
        Ok(cutoff_hz)
    } else {
        Err(FilterError::InvalidCutoff(cutoff_hz))
    }
}

pub(crate) fn check_initial_value(value: f32) -> Result<f32, FilterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FilterError::NonFiniteInitialValue(value))
    }
}
