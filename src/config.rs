#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{coefficient::Approximation, filter::FilterKind},
    error::{check_cutoff, check_initial_value, FilterError},
};

/// Everything needed to build a [`crate::dsp::filter::OnePole`] apart from its clock.
///
/// Defaults to a 1 Hz low-pass seeded at zero with the hybrid coefficient
/// policy. Pick the kind explicitly at the call site when that is not what
/// the channel needs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    pub kind: FilterKind,
    pub cutoff_hz: f32,
    pub initial_value: f32,
    pub approximation: Approximation,
    /// Start with the filter passing its input straight through.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bypass: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            kind: FilterKind::LowPass,
            cutoff_hz: 1.0,
            initial_value: 0.0,
            approximation: Approximation::Hybrid,
            bypass: false,
        }
    }
}

impl FilterConfig {
    pub fn kind(mut self, kind: FilterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn cutoff_hz(mut self, cutoff_hz: f32) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn initial_value(mut self, initial_value: f32) -> Self {
        self.initial_value = initial_value;
        self
    }

    pub fn approximation(mut self, approximation: Approximation) -> Self {
        self.approximation = approximation;
        self
    }

    pub fn bypass(mut self, bypass: bool) -> Self {
        self.bypass = bypass;
        self
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        check_cutoff(self.cutoff_hz)?;
        check_initial_value(self.initial_value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_one_hz_lowpass() {
        let config = FilterConfig::default();
        assert_eq!(config.kind, FilterKind::LowPass);
        assert_eq!(config.cutoff_hz, 1.0);
        assert_eq!(config.initial_value, 0.0);
        assert_eq!(config.approximation, Approximation::Hybrid);
        assert!(!config.bypass);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = FilterConfig::default()
            .kind(FilterKind::Differentiator)
            .cutoff_hz(20.0)
            .initial_value(-1.5)
            .approximation(Approximation::Exponential);

        assert_eq!(config.kind, FilterKind::Differentiator);
        assert_eq!(config.cutoff_hz, 20.0);
        assert_eq!(config.initial_value, -1.5);
        assert_eq!(config.approximation, Approximation::Exponential);
    }

    #[test]
    fn test_validate_rejects_cutoff_outside_float_range() {
        for cutoff in [1.0e-36, 1.0e38] {
            let config = FilterConfig::default().cutoff_hz(cutoff);
            assert_eq!(config.validate(), Err(FilterError::InvalidCutoff(cutoff)));
        }
    }

    #[test]
    fn test_validate_reports_first_problem() {
        let config = FilterConfig::default().cutoff_hz(0.0).initial_value(f32::NAN);
        assert_eq!(config.validate(), Err(FilterError::InvalidCutoff(0.0)));

        let config = FilterConfig::default().initial_value(f32::NEG_INFINITY);
        assert_eq!(
            config.validate(),
            Err(FilterError::NonFiniteInitialValue(f32::NEG_INFINITY))
        );
    }
}
