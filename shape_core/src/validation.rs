//! Input boundary checks for measurements.
//!
//! These run before a measurement reaches the classifier. They are stricter
//! than the classifier itself, which tolerates a zero hip.

use crate::{Error, Measurement, Result};
use serde::{Deserialize, Serialize};

/// Accepted ranges for each measurement field
///
/// Every length and weight must lie in `(0, max]`; age in `[min_age, max_age]`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ValidationLimits {
    #[serde(default = "default_min_age")]
    pub min_age: u32,

    #[serde(default = "default_max_age")]
    pub max_age: u32,

    #[serde(default = "default_max_weight_kg")]
    pub max_weight_kg: f64,

    #[serde(default = "default_max_height_cm")]
    pub max_height_cm: f64,

    #[serde(default = "default_max_girth_cm")]
    pub max_girth_cm: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
            max_weight_kg: default_max_weight_kg(),
            max_height_cm: default_max_height_cm(),
            max_girth_cm: default_max_girth_cm(),
        }
    }
}

fn default_min_age() -> u32 {
    1
}

fn default_max_age() -> u32 {
    120
}

fn default_max_weight_kg() -> f64 {
    500.0
}

fn default_max_height_cm() -> f64 {
    300.0
}

fn default_max_girth_cm() -> f64 {
    300.0
}

fn check_positive(field: &str, value: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(Error::InvalidInput(format!(
            "{} must be in (0, {}], got {}",
            field, max, value
        )));
    }
    Ok(())
}

impl Measurement {
    /// Reject measurements outside the configured ranges
    pub fn validate(&self, limits: &ValidationLimits) -> Result<()> {
        if self.age < limits.min_age || self.age > limits.max_age {
            return Err(Error::InvalidInput(format!(
                "age must be in [{}, {}], got {}",
                limits.min_age, limits.max_age, self.age
            )));
        }

        check_positive("weight", self.weight, limits.max_weight_kg)?;
        check_positive("height", self.height, limits.max_height_cm)?;
        check_positive("bust", self.bust, limits.max_girth_cm)?;
        check_positive("waist", self.waist, limits.max_girth_cm)?;
        check_positive("hip", self.hip, limits.max_girth_cm)?;
        Ok(())
    }
}
