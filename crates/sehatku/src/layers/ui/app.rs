use crate::controller::{Field, FormController, Settle};
use crate::layers::service::events::ServiceEvent;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Focus {
    #[default]
    Height,
    Weight,
    Submit,
}

impl Focus {
    pub(crate) fn field(self) -> Option<Field> {
        match self {
            Focus::Height => Some(Field::Height),
            Focus::Weight => Some(Field::Weight),
            Focus::Submit => None,
        }
    }

    fn next(self) -> Self {
        match self {
            Focus::Height => Focus::Weight,
            Focus::Weight => Focus::Submit,
            Focus::Submit => Focus::Height,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Height => Focus::Submit,
            Focus::Weight => Focus::Height,
            Focus::Submit => Focus::Weight,
        }
    }
}

#[derive(Default)]
pub(crate) struct AppState {
    pub(crate) form: FormController,
    pub(crate) focus: Focus,
    pub(crate) model: String,
    pub(crate) has_api_key: bool,
    pub(crate) result_scroll: usize,
    pub(crate) result_max_scroll: usize,
    pub(crate) result_total_lines: usize,
    pub(crate) result_view_height: u16,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(model: impl Into<String>, has_api_key: bool) -> Self {
        Self {
            model: model.into(),
            has_api_key,
            ..Self::default()
        }
    }

    /// Returns the request id the event belonged to so the service can drop its handle.
    pub(crate) fn handle_event(&mut self, event: ServiceEvent) -> u64 {
        match event {
            ServiceEvent::AdviceReady {
                request_id,
                outcome,
            } => {
                if self.form.settle(request_id, outcome) == Settle::Applied {
                    self.result_scroll = 0;
                }
                request_id
            }
        }
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub(crate) fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub(crate) fn set_result_metrics(&mut self, total_lines: usize, view_height: u16) {
        let total_lines = total_lines.max(1);
        self.result_total_lines = total_lines;
        self.result_view_height = view_height;
        self.result_max_scroll = total_lines.saturating_sub(view_height as usize);
        if self.result_scroll > self.result_max_scroll {
            self.result_scroll = self.result_max_scroll;
        }
    }

    pub(crate) fn scroll_down(&mut self, lines: usize) {
        self.result_scroll = (self.result_scroll + lines).min(self.result_max_scroll);
    }

    pub(crate) fn scroll_up(&mut self, lines: usize) {
        self.result_scroll = self.result_scroll.saturating_sub(lines);
    }

    pub(crate) fn page_size(&self) -> usize {
        let height = self.result_view_height.max(1) as usize;
        height.saturating_sub(1).max(1)
    }
}
