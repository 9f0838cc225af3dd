use super::field::InputField;
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
use vestibule_core::{submit, validate};

form_fields!(Field, Email);

/// The password-reset form: just an email.
#[derive(Debug, Default)]
pub struct ForgotForm {
    /// Which field has focus. There is only one, but the ring keeps the
    /// forms uniform.
    active: Field,

    /// Email of the account to reset.
    email: Input,

    /// Inline error for the email field.
    email_error: Option<String>,

    /// Whether a submission is in flight. Blocks re-submission.
    submitting: bool,
}

impl ForgotForm {
    /// Clear everything back to an empty Idle form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The email as it would be submitted.
    pub fn email(&self) -> &str {
        self.email.value().trim()
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

    /// Route a key press to the form.
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Email => {
                        self.email.handle_event(&event);
                    }
                };
            }
        }
    }

    /// Check the email, marking it when invalid. Returns whether the
    /// form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.email_error = None;

        if !validate::is_valid_email(self.email()) {
            self.email_error = Some("Please enter a valid email address".to_owned());
        }

        self.email_error.is_none()
    }

    /// Build the submission payload.
    pub fn payload(&self) -> submit::Payload {
        submit::Payload::ForgotPassword(submit::forgot_password::Req {
            email: self.email().to_owned(),
        })
    }

    /// Draw the form centered in `area`.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let title = if self.submitting {
            "Reset Password (submitting…)"
        } else {
            "Reset Password"
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

        let [text_area, email_area, links_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(InputField::HEIGHT),
            Constraint::Length(1),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new("Enter your account email and we'll send reset instructions.")
                .style(Style::default().fg(palette.text)),
            text_area,
        );

        InputField {
            input: &self.email,
            title: "Email",
            active: matches!(self.active, Field::Email),
            masked: false,
            error: self.email_error.as_deref(),
        }
        .render(frame, email_area, palette);

        frame.render_widget(
            Paragraph::new("Ctrl-L back to sign in").style(Style::default().fg(palette.dim)),
            links_area,
        );
    }

    /// Rows the rendered form needs.
    pub fn height() -> u16 {
        // the blurb, the input, the links line, the border
        2 + InputField::HEIGHT + 1 + 2
    }

    #[cfg(test)]
    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn type_str(form: &mut ForgotForm, text: &str) {
        for c in text.chars() {
            form.handle_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn valid_email_passes() {
        let mut form = ForgotForm::default();
        type_str(&mut form, "a@b.com");

        assert!(form.validate());
        assert_eq!(form.email_error(), None);
    }

    #[test]
    fn invalid_email_is_marked() {
        let mut form = ForgotForm::default();
        type_str(&mut form, "nope");

        assert!(!form.validate());
        assert!(form.email_error().is_some());
    }

    #[test]
    fn payload_carries_the_trimmed_email() {
        let mut form = ForgotForm::default();
        type_str(&mut form, " a@b.com ");

        let submit::Payload::ForgotPassword(req) = form.payload() else {
            panic!("expected a forgot-password payload");
        };

        assert_eq!(req.email, "a@b.com");
    }
}
