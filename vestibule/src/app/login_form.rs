use super::field::{CheckboxField, InputField};
use super::Palette;
use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use vestibule_core::{digest, submit, validate, Settings};

form_fields!(Field, Email, Password, RememberMe);

/// The sign-in form: email, password, and a "remember me" opt-in.
#[derive(Debug, Default)]
pub struct LoginForm {
    /// Which field has focus.
    active: Field,

    /// The account email.
    email: Input,

    /// The account password. Masked unless revealed.
    password: Input,

    /// Whether to keep the email around for next time.
    remember_me: bool,

    /// Whether the password is shown in the clear.
    show_password: bool,

    /// Inline error for the email field.
    email_error: Option<String>,

    /// Inline error for the password field.
    password_error: Option<String>,

    /// Whether a submission is in flight. Blocks re-submission.
    submitting: bool,
}

impl LoginForm {
    /// A form pre-filled with a remembered email.
    pub fn prefilled(email: &str) -> Self {
        Self {
            email: Input::new(email.to_owned()),
            remember_me: true,
            ..Self::default()
        }
    }

    /// Clear everything back to an empty Idle form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The email as it would be submitted.
    pub fn email(&self) -> &str {
        self.email.value().trim()
    }

    /// Replace the email field, e.g. to pre-fill after registration.
    pub fn set_email(&mut self, email: &str) {
        self.email = Input::new(email.to_owned());
    }

    /// Whether "remember me" is checked.
    pub fn remember_me(&self) -> bool {
        self.remember_me
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Mark a submission as started.
    pub fn begin_submit(&mut self) {
        self.submitting = true;
    }

    /// Mark the in-flight submission as settled.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    /// Show or hide the password.
    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
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
            KeyCode::Char(' ') if matches!(self.active, Field::RememberMe) => {
                self.remember_me = !self.remember_me;
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Email => {
                        self.email.handle_event(&event);
                    }
                    Field::Password => {
                        self.password.handle_event(&event);
                    }
                    Field::RememberMe => {}
                };
            }
        }
    }

    /// Check every field in one pass, marking all invalid ones. Returns
    /// whether the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.email_error = None;
        self.password_error = None;

        if !validate::is_valid_email(self.email()) {
            self.email_error = Some("Please enter a valid email address".to_owned());
        }

        if self.password.value().chars().count() < 6 {
            self.password_error = Some("Password must be at least 6 characters".to_owned());
        }

        self.email_error.is_none() && self.password_error.is_none()
    }

    /// Build the submission payload. Digests the password when encryption
    /// is enabled; the plaintext never rides along with the digest.
    pub fn payload(&self, settings: &Settings) -> submit::Payload {
        let password = if settings.enable_encryption {
            digest::digest_password(self.password.value())
        } else {
            self.password.value().to_owned()
        };

        submit::Payload::Login(submit::login::Req {
            email: self.email().to_owned(),
            password,
        })
    }

    /// Draw the form centered in `area`.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let title = if self.submitting {
            "Sign In (submitting…)"
        } else {
            "Sign In"
        };

        let border = if self.submitting {
            palette.warning
        } else {
            palette.accent
        };

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border));
        let inner = outer.inner(area);

        frame.render_widget(outer, area);

        let [email_area, password_area, remember_area, _, links_area] = Layout::vertical([
            Constraint::Length(InputField::HEIGHT),
            Constraint::Length(InputField::HEIGHT),
            Constraint::Length(CheckboxField::HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        InputField {
            input: &self.email,
            title: "Email",
            active: matches!(self.active, Field::Email),
            masked: false,
            error: self.email_error.as_deref(),
        }
        .render(frame, email_area, palette);

        InputField {
            input: &self.password,
            title: "Password",
            active: matches!(self.active, Field::Password),
            masked: !self.show_password,
            error: self.password_error.as_deref(),
        }
        .render(frame, password_area, palette);

        CheckboxField {
            checked: self.remember_me,
            label: "Remember me",
            active: matches!(self.active, Field::RememberMe),
        }
        .render(frame, remember_area, palette);

        frame.render_widget(
            Paragraph::new("Ctrl-N create account · Ctrl-F forgot password")
                .style(Style::default().fg(palette.dim)),
            links_area,
        );
    }

    /// Rows the rendered form needs.
    pub fn height() -> u16 {
        // two inputs, the checkbox, a spacer, the links line, the border
        InputField::HEIGHT * 2 + CheckboxField::HEIGHT + 1 + 1 + 2
    }

    #[cfg(test)]
    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    #[cfg(test)]
    pub fn password_error(&self) -> Option<&str> {
        self.password_error.as_deref()
    }
}
