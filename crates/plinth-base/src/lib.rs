use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Guid(Uuid);

impl Guid {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Tolerance {
    pub linear: f64,
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: 1.0e-6,
            angular: 1.0e-6,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rejects non-finite values and values that are not strictly positive.
pub fn ensure_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter(format!("{name} must be > 0")));
    }
    Ok(())
}

/// Rejects NaN and infinities.
pub fn ensure_finite(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidParameter(format!("{name} must be finite, got {value}")));
    }
    Ok(())
}

/// Rejects values outside the closed unit interval.
pub fn ensure_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidParameter(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_check_rejects_zero_and_nan() {
        assert!(ensure_positive("width", 1.0).is_ok());
        assert!(ensure_positive("width", 0.0).is_err());
        assert!(ensure_positive("width", -2.0).is_err());
        assert!(ensure_positive("width", f64::NAN).is_err());
        assert!(ensure_positive("width", f64::INFINITY).is_err());
    }

    #[test]
    fn finite_check_rejects_nan_and_infinity() {
        assert!(ensure_finite("origin.x", -3.0).is_ok());
        assert!(ensure_finite("origin.x", f64::NAN).is_err());
        assert!(ensure_finite("origin.y", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn unit_interval_is_closed() {
        assert!(ensure_unit_interval("alpha", 0.0).is_ok());
        assert!(ensure_unit_interval("alpha", 1.0).is_ok());
        assert!(ensure_unit_interval("alpha", 1.01).is_err());
        assert!(ensure_unit_interval("alpha", f64::NAN).is_err());
    }

    #[test]
    fn error_message_names_parameter() {
        let err = ensure_positive("height", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter: height must be > 0");
    }
}
