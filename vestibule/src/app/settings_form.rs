use super::field::{CheckboxField, InputField};
use super::Palette;
use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use vestibule_core::Settings;

form_fields!(Field, Url, Encryption, SaveCredentials);

/// The settings editor shown in a popover: the endpoint URL and the two
/// behavior flags. Edits apply only when saved, and an untrusted URL
/// blocks the whole save.
#[derive(Debug)]
pub struct SettingsForm {
    /// Which field has focus.
    active: Field,

    /// The endpoint URL being edited.
    url: Input,

    /// Edited value of the digest-before-send flag.
    enable_encryption: bool,

    /// Edited value of the remember-me-allowed flag.
    save_credentials: bool,

    /// Inline error for the URL field.
    url_error: Option<String>,
}

impl SettingsForm {
    /// An editor pre-loaded with the current settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            active: Field::default(),
            url: Input::new(settings.endpoint_url.clone()),
            enable_encryption: settings.enable_encryption,
            save_credentials: settings.save_credentials,
            url_error: None,
        }
    }

    /// Route a key press to the form.
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            KeyCode::Char(' ') if matches!(self.active, Field::Encryption) => {
                self.enable_encryption = !self.enable_encryption;
            }
            KeyCode::Char(' ') if matches!(self.active, Field::SaveCredentials) => {
                self.save_credentials = !self.save_credentials;
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Url => {
                        self.url.handle_event(&event);
                    }
                    Field::Encryption | Field::SaveCredentials => {}
                };
            }
        }
    }

    /// Try to apply the edits on top of `current`. Returns the settings
    /// to persist, or `None` (with an inline error, and nothing applied,
    /// flags included) when the URL fails the trust check.
    pub fn apply(&mut self, current: &Settings) -> Option<Settings> {
        let mut next = current.clone();

        match next.set_endpoint_url(self.url.value()) {
            Ok(()) => {
                self.url_error = None;

                next.enable_encryption = self.enable_encryption;
                next.save_credentials = self.save_credentials;

                Some(next)
            }
            Err(_) => {
                self.url_error = Some("Please enter a valid Google Apps Script URL".to_owned());

                None
            }
        }
    }

    /// Draw the editor into `area` (already cleared by the popover).
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let [url_area, encryption_area, save_area, _, hint_area] = Layout::vertical([
            Constraint::Length(InputField::HEIGHT),
            Constraint::Length(CheckboxField::HEIGHT),
            Constraint::Length(CheckboxField::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        InputField {
            input: &self.url,
            title: "Script URL",
            active: matches!(self.active, Field::Url),
            masked: false,
            error: self.url_error.as_deref(),
        }
        .render(frame, url_area, palette);

        CheckboxField {
            checked: self.enable_encryption,
            label: "Digest passwords before sending",
            active: matches!(self.active, Field::Encryption),
        }
        .render(frame, encryption_area, palette);

        CheckboxField {
            checked: self.save_credentials,
            label: "Allow \"remember me\" to store my email",
            active: matches!(self.active, Field::SaveCredentials),
        }
        .render(frame, save_area, palette);

        frame.render_widget(
            Paragraph::new("Enter save · Esc cancel").style(Style::default().fg(palette.dim)),
            hint_area,
        );
    }

    /// Rows the rendered editor needs, border excluded.
    pub fn height() -> u16 {
        InputField::HEIGHT + CheckboxField::HEIGHT * 2 + 1 + 1
    }
}
