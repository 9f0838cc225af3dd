use super::Palette;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::Input;

/// A bordered single-line text input with an error line underneath.
pub struct InputField<'a> {
    /// The input being edited.
    pub input: &'a Input,

    /// Title shown on the border.
    pub title: &'a str,

    /// Whether this field has focus (border highlight + cursor).
    pub active: bool,

    /// Whether to mask the value with `*`.
    pub masked: bool,

    /// Inline validation error, if any.
    pub error: Option<&'a str>,
}

impl InputField<'_> {
    /// Rows one field takes: three for the bordered input, one for the
    /// error line.
    pub const HEIGHT: u16 = 4;

    /// Draw the field into `area`, which must be `HEIGHT` rows tall.
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(area);

        let width = input_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor
        let scroll = self.input.visual_scroll(width as usize);

        let border = if self.error.is_some() {
            palette.error
        } else if self.active {
            palette.accent
        } else {
            palette.dim
        };

        let value = if self.masked {
            "*".repeat(self.input.value().chars().count())
        } else {
            self.input.value().to_owned()
        };

        let field = Paragraph::new(value)
            .scroll((0, scroll as u16))
            .style(Style::default().fg(palette.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.title)
                    .border_style(Style::default().fg(border)),
            );

        frame.render_widget(field, input_area);

        if let Some(error) = self.error {
            frame.render_widget(
                Paragraph::new(error).style(Style::default().fg(palette.error)),
                error_area,
            );
        }

        if self.active {
            frame.set_cursor_position((
                input_area.x
                    + (self.input.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                    + 1, // just past the end of the text
                input_area.y + 1, // +1 row for the border/title
            ));
        }
    }
}

/// A one-line checkbox toggled with space.
pub struct CheckboxField<'a> {
    /// Whether the box is checked.
    pub checked: bool,

    /// Label shown next to the box.
    pub label: &'a str,

    /// Whether this field has focus.
    pub active: bool,
}

impl CheckboxField<'_> {
    /// Rows one checkbox takes.
    pub const HEIGHT: u16 = 1;

    /// Draw the checkbox into `area`.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let marker = if self.checked { "[x]" } else { "[ ]" };

        let style = if self.active {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.text)
        };

        frame.render_widget(
            Paragraph::new(format!("{marker} {}", self.label)).style(style),
            area,
        );
    }
}
