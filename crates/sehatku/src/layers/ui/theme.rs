use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

pub(crate) struct Theme {
    border: Color,
    focus: Color,
    title: Color,
    text: Color,
    dim: Color,
    accent: Color,
    button_bg: Color,
    disabled_bg: Color,
    warn: Color,
    error: Color,
}

impl Theme {
    pub(crate) fn dark() -> Self {
        Self {
            border: Color::DarkGray,
            focus: Color::LightBlue,
            title: Color::Blue,
            text: Color::White,
            dim: Color::Gray,
            accent: Color::Cyan,
            button_bg: Color::Blue,
            disabled_bg: Color::DarkGray,
            warn: Color::Yellow,
            error: Color::Red,
        }
    }

    pub(crate) fn block<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(self.title).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border))
    }

    pub(crate) fn field_block<'a>(&self, title: &'a str, focused: bool) -> Block<'a> {
        let block = self.block(title);
        if focused {
            block.border_style(Style::default().fg(self.focus).add_modifier(Modifier::BOLD))
        } else {
            block
        }
    }

    pub(crate) fn brand_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub(crate) fn placeholder_style(&self) -> Style {
        Style::default().fg(self.dim).add_modifier(Modifier::ITALIC)
    }

    pub(crate) fn help_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub(crate) fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub(crate) fn warn_style(&self) -> Style {
        Style::default().fg(self.warn).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn button_style(&self, enabled: bool, focused: bool) -> Style {
        if !enabled {
            return Style::default().fg(self.dim).bg(self.disabled_bg);
        }
        let style = Style::default()
            .fg(self.text)
            .bg(self.button_bg)
            .add_modifier(Modifier::BOLD);
        if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }
}
