use super::settings_form::SettingsForm;
use super::Palette;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Row, Table, Wrap},
    Frame,
};

/// States shown above the active form.
#[derive(Debug)]
pub enum Popover {
    /// Show a table of keyboard shortcuts
    Help,

    /// Show the terms and conditions
    Terms,

    /// Edit the endpoint URL and behavior flags
    Settings(SettingsForm),
}

impl Popover {
    /// Render the popover centered over the body.
    pub fn render(&mut self, frame: &mut Frame<'_>, body_area: Rect, palette: &Palette) {
        match self {
            Popover::Help => {
                let popup_area = centered(body_area, Constraint::Length(60), Constraint::Length(15));

                let popup = Table::new(
                    [
                        Row::new(vec!["Tab / Shift-Tab", "Move between fields"]),
                        Row::new(vec!["Enter", "Submit the active form"]),
                        Row::new(vec!["Space", "Toggle the focused checkbox"]),
                        Row::new(vec!["Ctrl-L", "Go to sign in"]),
                        Row::new(vec!["Ctrl-N", "Go to create account"]),
                        Row::new(vec!["Ctrl-F", "Go to password reset"]),
                        Row::new(vec!["Ctrl-R", "Show / hide passwords"]),
                        Row::new(vec!["Ctrl-O", "Open settings"]),
                        Row::new(vec!["Ctrl-T", "Toggle light / dark theme"]),
                        Row::new(vec!["F1", "This help"]),
                        Row::new(vec!["F2", "Terms and conditions"]),
                        Row::new(vec!["Esc", "Close a popup / Quit"]),
                    ],
                    [Constraint::Max(16), Constraint::Fill(1)],
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Keyboard Shortcuts")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(palette.accent)),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
            Popover::Terms => {
                let popup_area =
                    centered(body_area, Constraint::Percentage(60), Constraint::Length(12));

                let popup = Paragraph::new(
                    "This service stores the details you submit in a spreadsheet \
                     operated by whoever configured the endpoint. Accounts may be \
                     removed at any time, there is no uptime guarantee, and the \
                     password protection is best-effort obfuscation rather than \
                     real security — do not reuse a password you care about. By \
                     creating an account you accept all of the above.",
                )
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(palette.text))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Terms and Conditions")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::default().fg(palette.accent)),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
            Popover::Settings(form) => {
                let popup_area = centered(
                    body_area,
                    Constraint::Percentage(70),
                    Constraint::Length(SettingsForm::height() + 2),
                );

                let block = Block::default()
                    .borders(Borders::ALL)
                    .title("Settings")
                    .border_style(Style::default().fg(palette.accent));
                let inner = block.inner(popup_area);

                frame.render_widget(Clear, popup_area);
                frame.render_widget(block, popup_area);

                form.render(frame, inner, palette);
            }
        }
    }
}

/// Center a rect of the given size within `area`.
pub(super) fn centered(area: Rect, horiz: Constraint, vert: Constraint) -> Rect {
    let [area] = Layout::vertical([vert]).flex(Flex::Center).areas(area);
    let [area] = Layout::horizontal([horiz]).flex(Flex::Center).areas(area);

    area
}
