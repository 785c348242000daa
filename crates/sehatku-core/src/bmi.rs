use serde::Serialize;
use std::fmt;

use crate::form::ValidatedInput;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MetricError {
    #[error("height must be a positive number of centimeters, got {0}")]
    InvalidHeight(f64),
    #[error("weight must be a positive number of kilograms, got {0}")]
    InvalidWeight(f64),
    #[error("{field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// Body Mass Index, rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthMetric {
    pub bmi: f64,
}

impl HealthMetric {
    pub fn from_input(input: &ValidatedInput) -> Result<Self, MetricError> {
        let height = parse_number("height", input.height())?;
        let weight = parse_number("weight", input.weight())?;
        compute_bmi(height, weight)
    }
}

impl fmt::Display for HealthMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.bmi)
    }
}

/// `weight / (height / 100)²`. Zero, negative and non-finite inputs are rejected
/// instead of producing infinities.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Result<HealthMetric, MetricError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(MetricError::InvalidHeight(height_cm));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(MetricError::InvalidWeight(weight_kg));
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Ok(HealthMetric {
        bmi: round_hundredths(bmi),
    })
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, MetricError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MetricError::NotANumber {
            field,
            value: raw.to_string(),
        })
}
