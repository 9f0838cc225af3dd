use super::field::{CheckboxField, InputField};
use super::Palette;
use crate::form_fields;
use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};
use vestibule_core::{digest, strength, submit, validate, Settings, Strength};

form_fields!(Field, Name, Email, Password, ConfirmPassword, AcceptTerms);

/// The create-account form: name, email, password plus confirmation, a
/// live strength meter, and a terms checkbox.
#[derive(Debug, Default)]
pub struct RegisterForm {
    /// Which field has focus.
    active: Field,

    /// Display name for the new account.
    name: Input,

    /// Email for the new account.
    email: Input,

    /// The password. Masked unless revealed.
    password: Input,

    /// Must match the password exactly.
    confirm_password: Input,

    /// Whether the terms checkbox is ticked.
    accept_terms: bool,

    /// Whether both password fields are shown in the clear.
    show_password: bool,

    /// Inline error for the name field.
    name_error: Option<String>,

    /// Inline error for the email field.
    email_error: Option<String>,

    /// Inline error for the password field.
    password_error: Option<String>,

    /// Inline error for the confirmation field.
    confirm_error: Option<String>,

    /// Whether a submission is in flight. Blocks re-submission.
    submitting: bool,
}

impl RegisterForm {
    /// Clear everything back to an empty Idle form. The strength meter
    /// follows the (now empty) password field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The email as it would be submitted.
    pub fn email(&self) -> &str {
        self.email.value().trim()
    }

    /// Whether the terms checkbox is ticked.
    pub fn accepts_terms(&self) -> bool {
        self.accept_terms
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

    /// Show or hide both password fields.
    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
    }

    /// The live strength of whatever is in the password field.
    pub fn strength(&self) -> Strength {
        Strength::measure(self.password.value())
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
            KeyCode::Char(' ') if matches!(self.active, Field::AcceptTerms) => {
                self.accept_terms = !self.accept_terms;
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Name => {
                        self.name.handle_event(&event);
                    }
                    Field::Email => {
                        self.email.handle_event(&event);
                    }
                    Field::Password => {
                        self.password.handle_event(&event);
                    }
                    Field::ConfirmPassword => {
                        self.confirm_password.handle_event(&event);
                    }
                    Field::AcceptTerms => {}
                };
            }
        }
    }

    /// Check every field in one pass, marking all invalid ones. The terms
    /// checkbox counts against submission but is surfaced by the caller
    /// as a warning toast, not an inline error. Returns whether the form
    /// may be submitted.
    pub fn validate(&mut self) -> bool {
        self.name_error = None;
        self.email_error = None;
        self.password_error = None;
        self.confirm_error = None;

        if self.name.value().trim().chars().count() < 2 {
            self.name_error = Some("Name must be at least 2 characters".to_owned());
        }

        if !validate::is_valid_email(self.email()) {
            self.email_error = Some("Please enter a valid email address".to_owned());
        }

        if !validate::is_strong_password(self.password.value()) {
            self.password_error = Some(
                "Password must be at least 8 characters with uppercase, lowercase, number, and special character"
                    .to_owned(),
            );
        }

        if self.password.value() != self.confirm_password.value() {
            self.confirm_error = Some("Passwords do not match".to_owned());
        }

        self.name_error.is_none()
            && self.email_error.is_none()
            && self.password_error.is_none()
            && self.confirm_error.is_none()
            && self.accept_terms
    }

    /// Build the submission payload, stamped with the client's clock.
    /// Digests the password when encryption is enabled.
    pub fn payload(&self, settings: &Settings) -> submit::Payload {
        let password = if settings.enable_encryption {
            digest::digest_password(self.password.value())
        } else {
            self.password.value().to_owned()
        };

        submit::Payload::Register(submit::register::Req {
            name: self.name.value().trim().to_owned(),
            email: self.email().to_owned(),
            password,
            timestamp: Utc::now(),
        })
    }

    /// Draw the form centered in `area`.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let title = if self.submitting {
            "Create Account (submitting…)"
        } else {
            "Create Account"
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

        let [name_area, email_area, password_area, meter_area, confirm_area, terms_area, _, links_area] =
            Layout::vertical([
                Constraint::Length(InputField::HEIGHT),
                Constraint::Length(InputField::HEIGHT),
                Constraint::Length(InputField::HEIGHT),
                Constraint::Length(1),
                Constraint::Length(InputField::HEIGHT),
                Constraint::Length(CheckboxField::HEIGHT),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        InputField {
            input: &self.name,
            title: "Name",
            active: matches!(self.active, Field::Name),
            masked: false,
            error: self.name_error.as_deref(),
        }
        .render(frame, name_area, palette);

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

        self.render_strength_meter(frame, meter_area, palette);

        InputField {
            input: &self.confirm_password,
            title: "Confirm Password",
            active: matches!(self.active, Field::ConfirmPassword),
            masked: !self.show_password,
            error: self.confirm_error.as_deref(),
        }
        .render(frame, confirm_area, palette);

        CheckboxField {
            checked: self.accept_terms,
            label: "I accept the terms and conditions (F2 to read)",
            active: matches!(self.active, Field::AcceptTerms),
        }
        .render(frame, terms_area, palette);

        frame.render_widget(
            Paragraph::new("Ctrl-L back to sign in")
                .style(Style::default().fg(palette.dim)),
            links_area,
        );
    }

    /// The meter line: four segments plus the label, recomputed from the
    /// live field value so it tracks every keystroke and resets with the
    /// form.
    fn render_strength_meter(&self, frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
        let measured = self.strength();
        let color = strength_color(measured.color(), palette);

        let mut spans = Vec::with_capacity(usize::from(strength::MAX_SEGMENTS) + 1);

        for segment in 0..strength::MAX_SEGMENTS {
            let style = if segment < measured.segments() {
                Style::default().fg(color)
            } else {
                Style::default().fg(palette.dim)
            };

            spans.push(Span::styled("▰▰▰ ", style));
        }

        spans.push(Span::styled(measured.label(), Style::default().fg(color)));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    /// Rows the rendered form needs.
    pub fn height() -> u16 {
        // four inputs, the meter, the checkbox, a spacer, the links line,
        // the border
        InputField::HEIGHT * 4 + 1 + CheckboxField::HEIGHT + 1 + 1 + 2
    }

    #[cfg(test)]
    pub fn confirm_error(&self) -> Option<&str> {
        self.confirm_error.as_deref()
    }

    #[cfg(test)]
    pub fn password_error(&self) -> Option<&str> {
        self.password_error.as_deref()
    }
}

/// Map the scorer's hex ramp onto terminal colors.
fn strength_color(hex: Option<&'static str>, palette: &Palette) -> Color {
    match hex {
        Some("#ef4444") => Color::Red,
        Some("#f59e0b") => Color::Yellow,
        Some("#10b981") => Color::Green,
        Some("#22c55e") => Color::LightGreen,
        _ => palette.dim,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(form: &mut RegisterForm, code: KeyCode) {
        form.handle_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(form: &mut RegisterForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    fn filled(name: &str, email: &str, password: &str, confirm: &str) -> RegisterForm {
        let mut form = RegisterForm::default();
        type_str(&mut form, name);
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, email);
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, password);
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, confirm);
        form
    }

    fn accept_terms(form: &mut RegisterForm) {
        press(form, KeyCode::Tab);
        press(form, KeyCode::Char(' '));
    }

    #[test]
    fn complete_form_passes() {
        let mut form = filled("Ada", "ada@example.com", "Abcdef1!", "Abcdef1!");
        accept_terms(&mut form);

        assert!(form.validate());
    }

    #[test]
    fn mismatch_is_marked_without_terms_error() {
        let mut form = filled("Ada", "ada@example.com", "Abcdef1!", "Abcdef2!");

        assert!(!form.validate());
        assert_eq!(form.confirm_error(), Some("Passwords do not match"));
        assert!(!form.accepts_terms());
    }

    #[test]
    fn unchecked_terms_block_an_otherwise_valid_form() {
        let mut form = filled("Ada", "ada@example.com", "Abcdef1!", "Abcdef1!");

        assert!(!form.validate());
        assert_eq!(form.confirm_error(), None);
    }

    #[test]
    fn weak_password_is_marked() {
        let mut form = filled("Ada", "ada@example.com", "abcdefgh", "abcdefgh");
        accept_terms(&mut form);

        assert!(!form.validate());
        assert!(form.password_error().is_some());
    }

    #[test]
    fn strength_tracks_and_resets_with_the_field() {
        let mut form = RegisterForm::default();
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "Abcdef1!");

        assert_eq!(form.strength().segments(), 4);

        form.reset();

        assert_eq!(form.strength().segments(), 0);
        assert_eq!(form.strength().label(), "Very Weak");
    }

    #[test]
    fn payload_digests_and_stamps() {
        let mut form = filled("Ada", "ada@example.com", "Abcdef1!", "Abcdef1!");
        accept_terms(&mut form);

        let submit::Payload::Register(req) = form.payload(&Settings::default()) else {
            panic!("expected a register payload");
        };

        assert_eq!(req.name, "Ada");
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.password, digest::digest_password("Abcdef1!"));
    }
}
