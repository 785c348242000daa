use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::Field;
use crate::layers::service::AdviceService;

use super::app::{AppState, Focus};

/// Returns `true` when the app should quit.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    service: &mut AdviceService,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.confirm_quit {
        if key.code == KeyCode::Esc {
            return true;
        }
        app.confirm_quit = false;
    }

    match key.code {
        KeyCode::Esc => {
            if let Some(request_id) = app.form.cancel() {
                service.cancel(request_id);
            } else {
                app.confirm_quit = true;
            }
        }
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
        KeyCode::Enter => submit(app, service),
        KeyCode::PageDown => app.scroll_down(app.page_size()),
        KeyCode::PageUp => app.scroll_up(app.page_size()),
        KeyCode::Backspace => {
            if let Some(field) = app.focus.field() {
                app.form.pop_char(field);
            }
        }
        KeyCode::Char(' ') if app.focus == Focus::Submit => submit(app, service),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            if let Some(field) = app.focus.field() {
                app.form.push_char(field, ch);
            }
        }
        _ => {}
    }
    false
}

fn submit(app: &mut AppState, service: &mut AdviceService) {
    match app.form.submit() {
        Some(submission) => {
            app.result_scroll = 0;
            service.start(submission);
        }
        None => {
            if app.form.field_error(Field::Height).is_some() {
                app.focus = Focus::Height;
            } else if app.form.field_error(Field::Weight).is_some() {
                app.focus = Focus::Weight;
            }
        }
    }
}
