//! Validated progress request.

use super::Color;

pub const MIN_PROGRESS: f32 = 0.0;
pub const MAX_PROGRESS: f32 = 100.0;

/// Failure modes of the progress core.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ProgressError {
    #[error("progress must be between 0 and 100, got: {0}")]
    InvalidProgress(f64),
}

/// One requested target state: a magnitude in `[0, 100]` plus an optional
/// color that overrides the config's progress color while this value is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressValue {
    magnitude: f32,
    override_color: Option<Color>,
}

impl ProgressValue {
    pub fn new(magnitude: f32) -> Result<Self, ProgressError> {
        if !(MIN_PROGRESS..=MAX_PROGRESS).contains(&magnitude) {
            return Err(ProgressError::InvalidProgress(magnitude as f64));
        }
        Ok(Self {
            magnitude,
            override_color: None,
        })
    }

    pub fn with_color(magnitude: f32, color: Color) -> Result<Self, ProgressError> {
        Ok(Self::new(magnitude)?.color(color))
    }

    /// Replace the override color.
    pub fn color(mut self, color: Color) -> Self {
        self.override_color = Some(color);
        self
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn override_color(&self) -> Option<Color> {
        self.override_color
    }
}

impl TryFrom<f32> for ProgressValue {
    type Error = ProgressError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f64> for ProgressValue {
    type Error = ProgressError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // Range check before narrowing so 100.0000001 is not rounded into range.
        if !(MIN_PROGRESS as f64..=MAX_PROGRESS as f64).contains(&value) {
            return Err(ProgressError::InvalidProgress(value));
        }
        Self::new(value as f32)
    }
}

macro_rules! impl_try_from_int {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for ProgressValue {
                type Error = ProgressError;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    Self::try_from(value as f64)
                }
            }
        )*
    };
}

impl_try_from_int!(i8, u8, i16, u16, i32, u32, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(ProgressValue::new(0.0).unwrap().magnitude(), 0.0);
        assert_eq!(ProgressValue::new(100.0).unwrap().magnitude(), 100.0);
    }

    #[test]
    fn test_rejects_nan() {
        assert!(matches!(
            ProgressValue::new(f32::NAN),
            Err(ProgressError::InvalidProgress(_))
        ));
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(ProgressValue::try_from(72_i32).unwrap().magnitude(), 72.0);
        assert_eq!(ProgressValue::try_from(100_u8).unwrap().magnitude(), 100.0);
        assert_eq!(
            ProgressValue::try_from(-1_i64),
            Err(ProgressError::InvalidProgress(-1.0))
        );
        assert!(ProgressValue::try_from(101_u16).is_err());
    }

    #[test]
    fn test_f64_checked_before_narrowing() {
        assert!(ProgressValue::try_from(100.000_000_1_f64).is_err());
    }

    #[test]
    fn test_override_color() {
        let value = ProgressValue::with_color(40.0, Color::from_rgb(0x4C, 0xAF, 0x50)).unwrap();
        assert_eq!(value.override_color(), Some(Color::from_argb(0xFF4CAF50)));
        assert_eq!(ProgressValue::new(40.0).unwrap().override_color(), None);
    }

    #[test]
    fn test_error_message() {
        let err = ProgressValue::new(150.0).unwrap_err();
        assert_eq!(err.to_string(), "progress must be between 0 and 100, got: 150");
    }

    proptest! {
        #[test]
        fn prop_in_range_accepted(p in 0.0f32..=100.0) {
            prop_assert_eq!(ProgressValue::new(p).unwrap().magnitude(), p);
        }

        #[test]
        fn prop_out_of_range_rejected(p in prop_oneof![-1.0e6f32..-0.0001, 100.0001f32..1.0e6]) {
            prop_assert_eq!(ProgressValue::new(p), Err(ProgressError::InvalidProgress(p as f64)));
        }
    }
}
