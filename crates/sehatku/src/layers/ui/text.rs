use ratatui::text::Span;

const TAB_WIDTH: usize = 4;

/// Splits advice into display rows no wider than `width` terminal cells.
/// Existing line breaks are kept; long lines break at the last space that
/// fits, or mid-word when a single word is wider than the panel.
pub(super) fn wrap_text_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let mut row: Vec<char> = Vec::new();
        let mut row_width = 0usize;
        for ch in raw.chars() {
            let ch_width = cell_width(ch);
            if row_width + ch_width > width && !row.is_empty() {
                if ch == ' ' {
                    lines.push(row.drain(..).collect());
                    row_width = 0;
                    continue;
                }
                match row.iter().rposition(|c| *c == ' ').filter(|pos| *pos > 0) {
                    Some(pos) => {
                        let tail = row.split_off(pos + 1);
                        row.pop();
                        lines.push(row.drain(..).collect());
                        row = tail;
                        row_width = row.iter().copied().map(cell_width).sum();
                    }
                    None => {
                        lines.push(row.drain(..).collect());
                        row_width = 0;
                    }
                }
            }
            row.push(ch);
            row_width += ch_width;
        }
        lines.push(row.into_iter().collect());
    }
    lines
}

/// Columns a character occupies, measured the way ratatui lays out spans.
fn cell_width(ch: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*ch.encode_utf8(&mut buf)).width()
}

/// Makes model output safe to paint: CRLF and lone CR become newlines, tabs
/// expand to spaces and any other control character is blanked.
pub(super) fn sanitize_text_for_tui(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
                col = 0;
            }
            '\n' => {
                out.push('\n');
                col = 0;
            }
            '\t' => {
                let spaces = TAB_WIDTH - col % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(spaces));
                col += spaces;
            }
            _ if ch.is_control() => {
                out.push(' ');
                col += 1;
            }
            _ => {
                out.push(ch);
                col += 1;
            }
        }
    }
    out
}
