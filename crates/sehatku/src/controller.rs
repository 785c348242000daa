use advice_client::AdviceError;
use sehatku_core::{
    AdvicePrompt, FieldErrors, FormInput, HealthMetric, ADVICE_FAILED_MESSAGE,
};

pub(crate) const SUBMIT_LABEL: &str = "Dapatkan Saran";
pub(crate) const SUBMITTING_LABEL: &str = "Sedang Memproses...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Height,
    Weight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AdviceOutcome {
    Success(String),
    Failure,
}

impl AdviceOutcome {
    pub(crate) fn display_text(&self) -> &str {
        match self {
            AdviceOutcome::Success(text) => text,
            AdviceOutcome::Failure => ADVICE_FAILED_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum FormPhase {
    #[default]
    Idle,
    Submitting {
        request_id: u64,
    },
    Settled(AdviceOutcome),
}

/// Everything the service layer needs to run one advice request.
#[derive(Debug, Clone)]
pub(crate) struct Submission {
    pub(crate) request_id: u64,
    pub(crate) prompt: AdvicePrompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Settle {
    Applied,
    Stale,
}

/// Owns the form's state and its Idle -> Submitting -> Settled cycle.
#[derive(Debug, Default)]
pub(crate) struct FormController {
    input: FormInput,
    errors: FieldErrors,
    phase: FormPhase,
    metric: Option<HealthMetric>,
    last_request_id: u64,
}

impl FormController {
    pub(crate) fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Height => &self.input.height,
            Field::Weight => &self.input.weight,
        }
    }

    pub(crate) fn field_error(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Height => self.errors.height,
            Field::Weight => self.errors.weight,
        }
    }

    pub(crate) fn errors(&self) -> FieldErrors {
        self.errors
    }

    pub(crate) fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub(crate) fn metric(&self) -> Option<HealthMetric> {
        self.metric
    }

    pub(crate) fn is_loading(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting { .. })
    }

    pub(crate) fn submit_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub(crate) fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub(crate) fn outcome(&self) -> Option<&AdviceOutcome> {
        match &self.phase {
            FormPhase::Settled(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub(crate) fn result_text(&self) -> Option<&str> {
        self.outcome().map(AdviceOutcome::display_text)
    }

    pub(crate) fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
        self.clear_error(field);
    }

    pub(crate) fn push_char(&mut self, field: Field, ch: char) {
        self.field_mut(field).push(ch);
        self.clear_error(field);
    }

    pub(crate) fn pop_char(&mut self, field: Field) {
        self.field_mut(field).pop();
        self.clear_error(field);
    }

    /// Validates the form and, if both fields are present, moves to Submitting.
    /// Returns `None` while a request is already in flight or when validation fails.
    pub(crate) fn submit(&mut self) -> Option<Submission> {
        if self.is_loading() {
            tracing::debug!("submit ignored while a request is in flight");
            return None;
        }

        let valid = match self.input.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                tracing::info!(
                    event = "validation_failed",
                    height_missing = errors.height.is_some(),
                    weight_missing = errors.weight.is_some(),
                );
                self.errors = errors;
                return None;
            }
        };
        self.errors = FieldErrors::default();

        self.metric = match HealthMetric::from_input(&valid) {
            Ok(metric) => Some(metric),
            Err(err) => {
                tracing::warn!(error = %err, "bmi unavailable for submission");
                None
            }
        };

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.phase = FormPhase::Submitting { request_id };
        tracing::info!(
            event = "submission_started",
            request_id,
            bmi = self.metric.map(|metric| metric.bmi),
        );
        Some(Submission {
            request_id,
            prompt: AdvicePrompt::for_input(&valid),
        })
    }

    /// Applies a finished request. Anything but the current in-flight id is stale
    /// and leaves the state untouched.
    pub(crate) fn settle(&mut self, request_id: u64, result: Result<String, AdviceError>) -> Settle {
        if self.phase != (FormPhase::Submitting { request_id }) {
            tracing::debug!(event = "stale_result_dropped", request_id);
            return Settle::Stale;
        }

        let outcome = match result {
            Ok(text) => {
                tracing::info!(event = "advice_received", request_id, len = text.len());
                AdviceOutcome::Success(text)
            }
            Err(err) => {
                tracing::error!(
                    event = "advice_failed",
                    request_id,
                    kind = %err.kind(),
                    error = %err,
                );
                AdviceOutcome::Failure
            }
        };
        self.phase = FormPhase::Settled(outcome);
        Settle::Applied
    }

    /// Abandons the in-flight request, if any, and returns its id. The metric
    /// of the abandoned submission goes with it.
    pub(crate) fn cancel(&mut self) -> Option<u64> {
        let FormPhase::Submitting { request_id } = self.phase else {
            return None;
        };
        tracing::info!(event = "submission_cancelled", request_id);
        self.phase = FormPhase::Idle;
        self.metric = None;
        Some(request_id)
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Height => &mut self.input.height,
            Field::Weight => &mut self.input.weight,
        }
    }

    fn clear_error(&mut self, field: Field) {
        match field {
            Field::Height => self.errors.height = None,
            Field::Weight => self.errors.weight = None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sehatku_core::{HEIGHT_REQUIRED, WEIGHT_REQUIRED};

    pub(crate) fn filled(height: &str, weight: &str) -> FormController {
        let mut form = FormController::default();
        form.set_field(Field::Height, height);
        form.set_field(Field::Weight, weight);
        form
    }

    #[test]
    fn starts_idle_and_enabled() {
        let form = FormController::default();
        assert_eq!(form.phase(), &FormPhase::Idle);
        assert!(!form.is_loading());
        assert!(form.submit_enabled());
        assert_eq!(form.submit_label(), SUBMIT_LABEL);
        assert_eq!(form.result_text(), None);
    }

    #[test]
    fn empty_height_blocks_submission() {
        let mut form = filled("", "70");
        assert!(form.submit().is_none());
        assert_eq!(form.field_error(Field::Height), Some(HEIGHT_REQUIRED));
        assert_eq!(form.field_error(Field::Weight), None);
        assert_eq!(form.phase(), &FormPhase::Idle);
        assert!(!form.is_loading());
    }

    #[test]
    fn empty_weight_blocks_submission() {
        let mut form = filled("170", "");
        assert!(form.submit().is_none());
        assert_eq!(form.field_error(Field::Weight), Some(WEIGHT_REQUIRED));
        assert_eq!(form.phase(), &FormPhase::Idle);
    }

    #[test]
    fn typing_clears_that_fields_error() {
        let mut form = filled("", "");
        form.submit();
        assert!(!form.errors().is_empty());
        form.push_char(Field::Height, '1');
        assert_eq!(form.field_error(Field::Height), None);
        assert_eq!(form.field_error(Field::Weight), Some(WEIGHT_REQUIRED));
    }

    #[test]
    fn submission_builds_prompt_and_metric() {
        let mut form = filled("170", "70");
        let submission = form.submit().expect("submission");
        assert_eq!(submission.request_id, 1);
        assert!(submission.prompt.as_str().contains("tinggi 170 cm"));
        assert!(submission.prompt.as_str().contains("berat 70 kg"));
        assert_eq!(form.metric().map(|m| m.bmi), Some(24.22));
        assert!(form.is_loading());
        assert!(!form.submit_enabled());
        assert_eq!(form.submit_label(), SUBMITTING_LABEL);
    }

    #[test]
    fn unparsable_numbers_still_submit_without_metric() {
        let mut form = filled("seratus", "70");
        assert!(form.submit().is_some());
        assert_eq!(form.metric(), None);
    }

    #[test]
    fn success_stores_text_verbatim() {
        let text = "Baris pertama.\n\n- poin satu\n- poin dua\n";
        let mut form = filled("170", "70");
        let submission = form.submit().expect("submission");
        assert_eq!(
            form.settle(submission.request_id, Ok(text.to_string())),
            Settle::Applied
        );
        assert_eq!(form.result_text(), Some(text));
        assert!(!form.is_loading());
        assert!(form.submit_enabled());
    }

    #[test]
    fn failure_shows_fallback_message() {
        let mut form = filled("170", "70");
        let submission = form.submit().expect("submission");
        form.settle(
            submission.request_id,
            Err(AdviceError::Network("connection reset".to_string())),
        );
        assert_eq!(form.outcome(), Some(&AdviceOutcome::Failure));
        assert_eq!(form.result_text(), Some(ADVICE_FAILED_MESSAGE));
        assert!(!form.is_loading());
    }

    #[test]
    fn every_error_kind_collapses_to_the_same_message() {
        let errors = [
            AdviceError::MissingApiKey,
            AdviceError::Timeout,
            AdviceError::Auth {
                status: 403,
                message: "denied".to_string(),
            },
            AdviceError::Parse("eof".to_string()),
            AdviceError::Empty { reason: None },
        ];
        for err in errors {
            let mut form = filled("170", "70");
            let submission = form.submit().expect("submission");
            form.settle(submission.request_id, Err(err));
            assert_eq!(form.result_text(), Some(ADVICE_FAILED_MESSAGE));
        }
    }

    #[test]
    fn submit_is_refused_while_loading() {
        let mut form = filled("170", "70");
        form.submit().expect("first");
        assert!(form.submit().is_none());
        assert_eq!(form.phase(), &FormPhase::Submitting { request_id: 1 });
    }

    #[test]
    fn resubmission_clears_previous_result() {
        let mut form = filled("170", "70");
        let first = form.submit().expect("first");
        form.settle(first.request_id, Ok("lama".to_string()));
        let second = form.submit().expect("second");
        assert_eq!(second.request_id, 2);
        assert_eq!(form.result_text(), None);
        assert!(form.is_loading());
    }

    #[test]
    fn validation_failure_keeps_previous_result() {
        let mut form = filled("170", "70");
        let first = form.submit().expect("first");
        form.settle(first.request_id, Ok("saran".to_string()));
        form.set_field(Field::Weight, "");
        assert!(form.submit().is_none());
        assert_eq!(form.result_text(), Some("saran"));
    }

    #[test]
    fn cancelled_request_result_is_stale() {
        let mut form = filled("170", "70");
        let first = form.submit().expect("first");
        assert_eq!(form.cancel(), Some(first.request_id));
        assert_eq!(form.phase(), &FormPhase::Idle);
        assert!(!form.is_loading());
        assert_eq!(form.metric(), None);

        let second = form.submit().expect("second");
        assert_eq!(
            form.settle(first.request_id, Ok("terlambat".to_string())),
            Settle::Stale
        );
        assert!(form.is_loading());
        assert_eq!(
            form.settle(second.request_id, Ok("terbaru".to_string())),
            Settle::Applied
        );
        assert_eq!(form.result_text(), Some("terbaru"));
    }

    #[test]
    fn settle_after_settled_is_stale() {
        let mut form = filled("170", "70");
        let submission = form.submit().expect("submission");
        form.settle(submission.request_id, Ok("pertama".to_string()));
        assert_eq!(
            form.settle(submission.request_id, Ok("kedua".to_string())),
            Settle::Stale
        );
        assert_eq!(form.result_text(), Some("pertama"));
    }

    #[test]
    fn cancel_when_idle_does_nothing() {
        let mut form = FormController::default();
        assert_eq!(form.cancel(), None);
    }

    #[test]
    fn backspace_edits_field() {
        let mut form = filled("170", "70");
        form.pop_char(Field::Height);
        assert_eq!(form.field_value(Field::Height), "17");
    }
}
