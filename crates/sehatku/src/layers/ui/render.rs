use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Paragraph};

use crate::controller::{AdviceOutcome, Field, FormPhase};

use super::app::{AppState, Focus};
use super::text::{sanitize_text_for_tui, wrap_text_lines};
use super::theme::Theme;

const RESULT_TITLE: &str = "Saran Kesehatan:";

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::dark();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_header(frame, app, &theme, chunks[0]);
    draw_field(
        frame,
        app,
        &theme,
        Field::Height,
        "Tinggi Badan (cm)",
        "Masukkan tinggi badan",
        chunks[1],
        chunks[2],
    );
    draw_field(
        frame,
        app,
        &theme,
        Field::Weight,
        "Berat Badan (kg)",
        "Masukkan berat badan",
        chunks[3],
        chunks[4],
    );
    draw_submit(frame, app, &theme, chunks[5]);
    draw_result(frame, app, &theme, chunks[6]);
    draw_footer(frame, app, &theme, chunks[7]);
}

fn draw_header(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut status = vec![
        Span::styled("Asisten Kesehatan Pintar Anda", theme.help_style()),
        Span::styled(format!("  model: {}", app.model), theme.help_style()),
    ];
    if !app.has_api_key {
        status.push(Span::styled("  API key belum diatur", theme.warn_style()));
    }
    let header = Paragraph::new(Text::from(vec![
        Line::styled("SehatKu AI", theme.brand_style()),
        Line::from(status),
    ]))
    .alignment(Alignment::Center)
    .block(theme.block(""));
    frame.render_widget(header, area);
}

#[allow(clippy::too_many_arguments)]
fn draw_field(
    frame: &mut ratatui::Frame,
    app: &AppState,
    theme: &Theme,
    field: Field,
    label: &str,
    placeholder: &str,
    area: Rect,
    error_area: Rect,
) {
    let focused = app.focus.field() == Some(field);
    let block = theme.field_block(label, focused);
    let inner = block.inner(area);
    let value = app.form.field_value(field);
    let line = if value.is_empty() {
        Line::styled(placeholder, theme.placeholder_style())
    } else {
        Line::styled(value, theme.text_style())
    };
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused && inner.width > 0 {
        let offset = (value.chars().count() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + offset, inner.y));
    }

    if let Some(message) = app.form.field_error(field) {
        let error = Paragraph::new(Line::styled(format!(" {message}"), theme.error_style()));
        frame.render_widget(error, error_area);
    }
}

fn draw_submit(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let focused = app.focus == Focus::Submit;
    let block = theme.field_block("", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let button = Paragraph::new(app.form.submit_label())
        .alignment(Alignment::Center)
        .style(theme.button_style(app.form.submit_enabled(), focused));
    frame.render_widget(button, inner);
}

fn draw_result(frame: &mut ratatui::Frame, app: &mut AppState, theme: &Theme, area: Rect) {
    let mut block = theme.block(RESULT_TITLE);
    if let Some(metric) = app.form.metric() {
        block = block.title_top(
            Line::styled(format!(" BMI {metric} "), theme.brand_style()).right_aligned(),
        );
    }
    let inner = block.inner(area);

    let (body, style) = match app.form.phase() {
        FormPhase::Idle => (
            "Isi tinggi dan berat badan, lalu tekan Enter.".to_string(),
            theme.placeholder_style(),
        ),
        FormPhase::Submitting { .. } => (
            format!("Menunggu saran dari {}... (Esc untuk membatalkan)", app.model),
            theme.placeholder_style(),
        ),
        FormPhase::Settled(AdviceOutcome::Success(text)) => {
            (sanitize_text_for_tui(text), theme.text_style())
        }
        FormPhase::Settled(outcome @ AdviceOutcome::Failure) => {
            (outcome.display_text().to_string(), theme.error_style())
        }
    };

    let wrapped = wrap_text_lines(&body, inner.width.max(1) as usize);
    app.set_result_metrics(wrapped.len(), inner.height);
    if app.result_max_scroll > 0 {
        let last = (app.result_scroll + inner.height as usize).min(app.result_total_lines);
        block = block.title_bottom(
            Line::styled(
                format!(" {}-{last}/{} ", app.result_scroll + 1, app.result_total_lines),
                theme.help_style(),
            )
            .right_aligned(),
        );
    }
    let panel = Paragraph::new(wrapped.join("\n"))
        .block(block)
        .style(style)
        .scroll((app.result_scroll as u16, 0));
    frame.render_widget(Clear, area);
    frame.render_widget(panel, area);
}

fn draw_footer(frame: &mut ratatui::Frame, app: &AppState, theme: &Theme, area: Rect) {
    let mut spans = vec![Span::styled(
        "Tab/↑↓=pindah  Enter=kirim  Esc=batal  PgUp/PgDn=gulir  Ctrl+C=keluar  ",
        theme.help_style(),
    )];
    if app.confirm_quit {
        spans.push(Span::styled("Tekan Esc lagi untuk keluar", theme.warn_style()));
    }
    let footer = Paragraph::new(Line::from(spans)).block(theme.block("Kontrol"));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::tests::filled;
    use crate::controller::{SUBMITTING_LABEL, SUBMIT_LABEL};
    use advice_client::AdviceError;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use sehatku_core::{ADVICE_FAILED_MESSAGE, HEIGHT_REQUIRED};

    fn render(app: &mut AppState) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(90, 32)).expect("terminal");
        terminal.draw(|frame| draw_ui(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    fn row_of(rows: &[String], needle: &str) -> usize {
        rows.iter()
            .position(|row| row.contains(needle))
            .unwrap_or_else(|| panic!("{needle:?} not rendered"))
    }

    #[test]
    fn idle_form_shows_labels_and_enabled_button() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        let rows = render(&mut app);
        assert!(contains(&rows, "SehatKu AI"));
        assert!(contains(&rows, "Tinggi Badan (cm)"));
        assert!(contains(&rows, "Masukkan tinggi badan"));
        assert!(contains(&rows, "Berat Badan (kg)"));
        assert!(contains(&rows, SUBMIT_LABEL));
        assert!(!contains(&rows, SUBMITTING_LABEL));
        assert!(!contains(&rows, "API key belum diatur"));
    }

    #[test]
    fn loading_relabels_button() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        app.form = filled("170", "70");
        app.form.submit().expect("submission");
        let rows = render(&mut app);
        assert!(contains(&rows, SUBMITTING_LABEL));
        assert!(!contains(&rows, SUBMIT_LABEL));
        assert!(contains(&rows, "BMI 24.22"));
    }

    #[test]
    fn cancelled_submission_drops_bmi_badge() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        app.form = filled("170", "70");
        app.form.submit().expect("submission");
        app.form.cancel().expect("in flight");
        let rows = render(&mut app);
        assert!(!contains(&rows, "BMI"));
        assert!(contains(&rows, SUBMIT_LABEL));
    }

    #[test]
    fn field_error_is_rendered_under_field() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        app.form = filled("", "70");
        app.form.submit();
        let rows = render(&mut app);
        let label = row_of(&rows, "Tinggi Badan (cm)");
        let error = row_of(&rows, HEIGHT_REQUIRED);
        assert_eq!(error, label + 3);
    }

    #[test]
    fn advice_keeps_its_line_breaks() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        app.form = filled("170", "70");
        let submission = app.form.submit().expect("submission");
        app.form.settle(
            submission.request_id,
            Ok("Baris pertama.\nBaris kedua.".to_string()),
        );
        let rows = render(&mut app);
        assert!(contains(&rows, "Saran Kesehatan:"));
        let first = row_of(&rows, "Baris pertama.");
        let second = row_of(&rows, "Baris kedua.");
        assert_eq!(second, first + 1);
        assert!(contains(&rows, SUBMIT_LABEL));
    }

    #[test]
    fn wide_characters_wrap_instead_of_clipping() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        app.form = filled("170", "70");
        let submission = app.form.submit().expect("submission");
        let advice = format!("{}END", "😊".repeat(44));
        app.form.settle(submission.request_id, Ok(advice));

        let rows = render(&mut app);
        let emoji: usize = rows.iter().map(|row| row.matches('😊').count()).sum();
        assert_eq!(emoji, 44);
        assert!(contains(&rows, "END"));
        assert_eq!(app.result_total_lines, 2);
    }

    #[test]
    fn failure_renders_fallback_message() {
        let mut app = AppState::new("gemini-1.5-flash", false);
        app.form = filled("170", "70");
        let submission = app.form.submit().expect("submission");
        app.form
            .settle(submission.request_id, Err(AdviceError::MissingApiKey));
        let rows = render(&mut app);
        assert!(contains(&rows, ADVICE_FAILED_MESSAGE));
        assert!(contains(&rows, "API key belum diatur"));
    }

    #[test]
    fn long_advice_is_scrollable() {
        let mut app = AppState::new("gemini-1.5-flash", true);
        app.form = filled("170", "70");
        let submission = app.form.submit().expect("submission");
        let text = (1..=40)
            .map(|n| format!("baris {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        app.form.settle(submission.request_id, Ok(text));
        render(&mut app);
        assert_eq!(app.result_total_lines, 40);
        assert!(app.result_max_scroll > 0);

        app.scroll_down(app.result_max_scroll);
        let rows = render(&mut app);
        assert!(contains(&rows, "baris 40"));
        assert!(!contains(&rows, "baris 1 "));
        assert!(contains(&rows, "/40 "));
    }
}
