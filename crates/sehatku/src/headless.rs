use advice_client::AdviceClient;
use sehatku_core::HealthMetric;
use serde::Serialize;
use std::io::Write;

use crate::controller::{AdviceOutcome, Field, FormController};

/// Result of one form submission made without the TUI.
#[derive(Debug, Serialize)]
pub(crate) struct HeadlessReport {
    pub(crate) height: String,
    pub(crate) weight: String,
    #[serde(flatten)]
    pub(crate) metric: Option<HealthMetric>,
    pub(crate) ok: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) errors: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) advice: Option<String>,
}

impl HeadlessReport {
    /// Plain mode prints the advice (or fallback) to `out` and field errors to `err`.
    pub(crate) fn write(
        &self,
        json: bool,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> anyhow::Result<()> {
        if json {
            serde_json::to_writer_pretty(&mut *out, self)?;
            writeln!(out)?;
            return Ok(());
        }
        for message in &self.errors {
            writeln!(err, "{message}")?;
        }
        if let Some(metric) = self.metric {
            writeln!(out, "BMI: {metric}")?;
        }
        if let Some(advice) = &self.advice {
            writeln!(out, "{advice}")?;
        }
        Ok(())
    }
}

/// Pushes the values through the same form controller the TUI uses and waits
/// for the single advice request, if validation lets one start.
pub(crate) async fn run_headless(
    client: &dyn AdviceClient,
    height: &str,
    weight: &str,
) -> HeadlessReport {
    let mut form = FormController::default();
    form.set_field(Field::Height, height);
    form.set_field(Field::Weight, weight);

    let mut report = HeadlessReport {
        height: height.to_string(),
        weight: weight.to_string(),
        metric: None,
        ok: false,
        errors: Vec::new(),
        advice: None,
    };

    let Some(submission) = form.submit() else {
        report.errors = form.errors().messages().collect();
        return report;
    };
    report.metric = form.metric();

    let result = client.generate(&submission.prompt).await;
    form.settle(submission.request_id, result);
    report.ok = matches!(form.outcome(), Some(AdviceOutcome::Success(_)));
    report.advice = form.result_text().map(str::to_string);
    report
}
