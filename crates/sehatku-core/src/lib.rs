pub mod bmi;
pub mod form;
pub mod prompt;

pub use bmi::{compute_bmi, HealthMetric, MetricError};
pub use form::{FieldErrors, FormInput, ValidatedInput, HEIGHT_REQUIRED, WEIGHT_REQUIRED};
pub use prompt::{AdvicePrompt, ADVICE_INSTRUCTION};

/// Shown in place of advice whenever the generation call fails, whatever the cause.
pub const ADVICE_FAILED_MESSAGE: &str = "Failed to generate advice. Please try again.";
