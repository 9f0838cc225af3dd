use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Clear, Paragraph},
    Frame,
};
use std::process::ExitCode;
use std::time::Duration;
use vestibule_core::settings::Theme;
use vestibule_core::submit::{self, Client, Kind, Resp};
use vestibule_core::Settings;

/// Things that can happen to this app
pub mod action;
pub use action::Action;

/// Things that can happen as a result of user input
pub mod effect;
pub use effect::{Effect, EffectContext};

/// Shared input and checkbox widgets
mod field;

/// The password-reset form
mod forgot_form;
use forgot_form::ForgotForm;

/// The sign-in form
mod login_form;
use login_form::LoginForm;

/// Help, terms, and settings popovers
mod popover;
use popover::Popover;

/// The create-account form
mod register_form;
use register_form::RegisterForm;

/// The settings editor
mod settings_form;
use settings_form::SettingsForm;

/// Transient notifications
mod toast;
use toast::Toast;

/// How long the configure-me warning stays up on first load.
const STARTUP_WARNING_DURATION: Duration = Duration::from_secs(10);

/// The "functional core" of the app.
pub struct App {
    /// Transient notifications, pruned as they expire.
    toasts: Vec<Toast>,

    /// Where the app is in its lifecycle
    state: AppState,
}

impl App {
    /// Create a new instance of the app
    #[must_use]
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            state: AppState::Unloaded,
        }
    }

    /// Produce any side effects as needed to initialize the app.
    #[expect(clippy::unused_self)]
    #[must_use]
    pub fn init(&self) -> Effect {
        Effect::LoadSettings
    }

    /// Handle an `Action`, updating the app's state and producing some
    /// side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::LoadedSettings(settings) => {
                let login = match (&settings.saved_email, settings.save_credentials) {
                    (Some(email), true) => LoginForm::prefilled(email),
                    _ => LoginForm::default(),
                };

                let needs_configuring = settings.endpoint().is_none();

                let mut loaded = Loaded {
                    settings,
                    active: ActiveForm::Login,
                    login,
                    register: RegisterForm::default(),
                    forgot: ForgotForm::default(),
                    popover: None,
                };

                if needs_configuring {
                    loaded.popover = Some(Popover::Settings(SettingsForm::from_settings(
                        &loaded.settings,
                    )));
                    self.toasts.push(
                        Toast::warning("Please configure the script URL to use the system")
                            .lasting(STARTUP_WARNING_DURATION),
                    );
                }

                self.state = AppState::Loaded(loaded);

                vec![]
            }

            Action::SubmitFinished(kind, result) => self.handle_submit_finished(kind, result),

            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                self.handle_key(key)
            }

            Action::Problem(problem) => {
                self.toasts.push(Toast::error(problem));

                vec![]
            }

            Action::TimePassed => {
                self.toasts.retain(|toast| !toast.expired());

                vec![]
            }
        }
    }

    /// Route one key press, either to a popover or to the active form.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        // Ctrl-C always quits, loaded or not.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state = AppState::Exiting(ExitCode::SUCCESS);
            return vec![];
        }

        let AppState::Loaded(loaded) = &mut self.state else {
            return vec![];
        };

        if loaded.popover.is_some() {
            return Self::handle_popover_key(loaded, &mut self.toasts, key);
        }

        match (key.modifiers.contains(KeyModifiers::CONTROL), key.code) {
            (true, KeyCode::Char('o')) => {
                loaded.popover = Some(Popover::Settings(SettingsForm::from_settings(
                    &loaded.settings,
                )));

                vec![]
            }
            (true, KeyCode::Char('t')) => {
                loaded.settings.theme = loaded.settings.theme.toggled();

                vec![Effect::SaveSettings(loaded.settings.clone())]
            }
            (true, KeyCode::Char('r')) => {
                match loaded.active {
                    ActiveForm::Login => loaded.login.toggle_show_password(),
                    ActiveForm::Register => loaded.register.toggle_show_password(),
                    ActiveForm::ForgotPassword => {}
                }

                vec![]
            }
            (true, KeyCode::Char('l')) => {
                loaded.switch_to(ActiveForm::Login);

                vec![]
            }
            (true, KeyCode::Char('n')) => {
                loaded.switch_to(ActiveForm::Register);

                vec![]
            }
            (true, KeyCode::Char('f')) => {
                loaded.switch_to(ActiveForm::ForgotPassword);

                vec![]
            }
            (false, KeyCode::F(1)) => {
                loaded.popover = Some(Popover::Help);

                vec![]
            }
            (false, KeyCode::F(2)) => {
                loaded.popover = Some(Popover::Terms);

                vec![]
            }
            (false, KeyCode::Enter) => Self::submit_active(loaded, &mut self.toasts),
            (false, KeyCode::Esc) => {
                self.state = AppState::Exiting(ExitCode::SUCCESS);

                vec![]
            }
            _ => {
                match loaded.active {
                    ActiveForm::Login => loaded.login.handle_event(key),
                    ActiveForm::Register => loaded.register.handle_event(key),
                    ActiveForm::ForgotPassword => loaded.forgot.handle_event(key),
                }

                vec![]
            }
        }
    }

    /// Route one key press to the open popover.
    fn handle_popover_key(
        loaded: &mut Loaded,
        toasts: &mut Vec<Toast>,
        key: KeyEvent,
    ) -> Vec<Effect> {
        match &mut loaded.popover {
            Some(Popover::Help | Popover::Terms) => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    loaded.popover = None;
                }

                vec![]
            }
            Some(Popover::Settings(form)) => match key.code {
                KeyCode::Esc => {
                    loaded.popover = None;

                    vec![]
                }
                KeyCode::Enter => {
                    if let Some(next) = form.apply(&loaded.settings) {
                        loaded.settings = next;
                        loaded.popover = None;
                        toasts.push(Toast::success("Configuration saved successfully!"));

                        return vec![Effect::SaveSettings(loaded.settings.clone())];
                    }

                    vec![]
                }
                _ => {
                    form.handle_event(key);

                    vec![]
                }
            },
            None => vec![],
        }
    }

    /// Run the active form's submission controller: validate everything
    /// in one pass, then either mark errors and stay Idle or lock the
    /// form and fire the request.
    fn submit_active(loaded: &mut Loaded, toasts: &mut Vec<Toast>) -> Vec<Effect> {
        match loaded.active {
            ActiveForm::Login => {
                if loaded.login.is_submitting() || !loaded.login.validate() {
                    return vec![];
                }

                loaded.login.begin_submit();

                vec![Effect::Submit(
                    Client::from_settings(&loaded.settings),
                    loaded.login.payload(&loaded.settings),
                )]
            }
            ActiveForm::Register => {
                if loaded.register.is_submitting() {
                    return vec![];
                }

                let valid = loaded.register.validate();

                if !loaded.register.accepts_terms() {
                    toasts.push(Toast::warning("Please accept the terms and conditions"));
                }

                if !valid {
                    return vec![];
                }

                loaded.register.begin_submit();

                vec![Effect::Submit(
                    Client::from_settings(&loaded.settings),
                    loaded.register.payload(&loaded.settings),
                )]
            }
            ActiveForm::ForgotPassword => {
                if loaded.forgot.is_submitting() || !loaded.forgot.validate() {
                    return vec![];
                }

                loaded.forgot.begin_submit();

                vec![Effect::Submit(
                    Client::from_settings(&loaded.settings),
                    loaded.forgot.payload(),
                )]
            }
        }
    }

    /// A submission settled: unlock the form, then branch on the
    /// outcome.
    fn handle_submit_finished(
        &mut self,
        kind: Kind,
        result: submit::error::Result<Resp>,
    ) -> Vec<Effect> {
        let AppState::Loaded(loaded) = &mut self.state else {
            return vec![];
        };

        match kind {
            Kind::Login => loaded.login.finish_submit(),
            Kind::Register => loaded.register.finish_submit(),
            Kind::ForgotPassword => loaded.forgot.finish_submit(),
        }

        match result {
            Ok(resp) if resp.success => Self::handle_success(loaded, &mut self.toasts, kind, &resp),
            Ok(resp) => {
                self.toasts.push(Toast::error(
                    resp.message
                        .unwrap_or_else(|| fallback_message(kind).to_owned()),
                ));

                vec![]
            }
            Err(error) => {
                self.toasts.push(Toast::error(error.user_message()));

                if matches!(error, submit::Error::ConfigurationMissing) {
                    loaded.popover = Some(Popover::Settings(SettingsForm::from_settings(
                        &loaded.settings,
                    )));
                }

                vec![]
            }
        }
    }

    /// The per-form terminal success actions.
    fn handle_success(
        loaded: &mut Loaded,
        toasts: &mut Vec<Toast>,
        kind: Kind,
        resp: &Resp,
    ) -> Vec<Effect> {
        match kind {
            Kind::Login => {
                toasts.push(Toast::success("Login successful!"));
                toasts.push(Toast::success(format!(
                    "Welcome back, {}!",
                    resp.name.as_deref().unwrap_or("User")
                )));

                let email = loaded.login.email().to_owned();
                let remember = loaded.login.remember_me();
                loaded.login.reset();

                if remember && loaded.settings.save_credentials {
                    loaded.settings.saved_email = Some(email);

                    return vec![Effect::SaveSettings(loaded.settings.clone())];
                }

                vec![]
            }
            Kind::Register => {
                toasts.push(Toast::success("Registration successful! Please login."));

                let email = loaded.register.email().to_owned();
                loaded.register.reset();
                loaded.active = ActiveForm::Login;
                loaded.login.set_email(&email);

                vec![]
            }
            Kind::ForgotPassword => {
                toasts.push(Toast::success(
                    "Password reset instructions sent to your email",
                ));

                loaded.forgot.reset();
                loaded.active = ActiveForm::Login;

                vec![]
            }
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        let palette = match &self.state {
            AppState::Loaded(loaded) => Palette::of(loaded.settings.theme),
            AppState::Unloaded | AppState::Exiting(_) => Palette::of(Theme::default()),
        };

        match &mut self.state {
            AppState::Unloaded => frame.render_widget(Paragraph::new("Loading…"), body_area),
            AppState::Loaded(loaded) => loaded.render(frame, body_area, &palette),
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        };

        let status = Paragraph::new(
            "Tab fields · Enter submit · Ctrl-O settings · F1 help · Ctrl-C quit",
        )
        .style(Style::default().fg(palette.dim));

        frame.render_widget(status, status_area);

        toast::render(&self.toasts, frame, body_area, &palette);
    }

    /// Let the TUI manager know whether we're all wrapped up and can
    /// exit.
    #[must_use]
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// App lifecycle
enum AppState {
    /// We haven't loaded settings yet
    Unloaded,

    /// We have loaded settings and are showing the forms
    Loaded(Loaded),

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}

/// State when we have successfully loaded and are running
struct Loaded {
    /// The settings we're working with
    settings: Settings,

    /// Which form is showing
    active: ActiveForm,

    /// The sign-in form
    login: LoginForm,

    /// The create-account form
    register: RegisterForm,

    /// The password-reset form
    forgot: ForgotForm,

    /// Whatever is currently floating above the form
    popover: Option<Popover>,
}

impl Loaded {
    /// Switch the visible form, resetting the target the way the switch
    /// links do. A form with a submission in flight keeps its state so
    /// the lock can't be bypassed.
    fn switch_to(&mut self, target: ActiveForm) {
        match target {
            ActiveForm::Login if !self.login.is_submitting() => self.login.reset(),
            ActiveForm::Register if !self.register.is_submitting() => self.register.reset(),
            ActiveForm::ForgotPassword if !self.forgot.is_submitting() => self.forgot.reset(),
            _ => {}
        }

        self.active = target;
    }

    /// Draw the active form centered in the body, then any popover over
    /// it.
    fn render(&mut self, frame: &mut Frame<'_>, body_area: Rect, palette: &Palette) {
        let height = match self.active {
            ActiveForm::Login => LoginForm::height(),
            ActiveForm::Register => RegisterForm::height(),
            ActiveForm::ForgotPassword => ForgotForm::height(),
        };

        let form_area = popover::centered(
            body_area,
            Constraint::Percentage(50),
            Constraint::Length(height),
        );

        frame.render_widget(Clear, form_area);

        match self.active {
            ActiveForm::Login => self.login.render(frame, form_area, palette),
            ActiveForm::Register => self.register.render(frame, form_area, palette),
            ActiveForm::ForgotPassword => self.forgot.render(frame, form_area, palette),
        }

        if let Some(popover) = &mut self.popover {
            popover.render(frame, body_area, palette);
        }
    }
}

/// Which form is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveForm {
    /// The sign-in form
    Login,

    /// The create-account form
    Register,

    /// The password-reset form
    ForgotPassword,
}

/// Terminal colors for the current theme.
pub struct Palette {
    /// Body text.
    pub text: Color,

    /// De-emphasized text and inactive borders.
    pub dim: Color,

    /// Focus highlights and info accents.
    pub accent: Color,

    /// Errors.
    pub error: Color,

    /// Warnings and in-flight indicators.
    pub warning: Color,

    /// Successes.
    pub success: Color,
}

impl Palette {
    /// The palette for a theme.
    fn of(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                dim: Color::DarkGray,
                accent: Color::Blue,
                error: Color::Red,
                warning: Color::Yellow,
                success: Color::Green,
            },
            Theme::Light => Self {
                text: Color::Black,
                dim: Color::Gray,
                accent: Color::Blue,
                error: Color::Red,
                warning: Color::Yellow,
                success: Color::Green,
            },
        }
    }
}

/// The fixed per-form message used when the server doesn't send one.
fn fallback_message(kind: Kind) -> &'static str {
    match kind {
        Kind::Login => "Login failed. Please check your credentials.",
        Kind::Register => "Registration failed. Please try again.",
        Kind::ForgotPassword => "Failed to send reset instructions. Please try again.",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use vestibule_core::digest;

    fn key(code: KeyCode) -> Action {
        Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Action {
        Action::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(key(KeyCode::Char(c)));
        }
    }

    fn configured_settings() -> Settings {
        let mut settings = Settings::default();
        settings
            .set_endpoint_url("https://script.google.com/macros/s/ABC123/exec")
            .unwrap();
        settings
    }

    fn loaded_app(settings: Settings) -> App {
        let mut app = App::new();
        let effects = app.handle(Action::LoadedSettings(settings));
        assert!(effects.is_empty());
        app
    }

    fn loaded(app: &App) -> &Loaded {
        match &app.state {
            AppState::Loaded(loaded) => loaded,
            _ => panic!("app is not loaded"),
        }
    }

    /// Fill the login form and press enter.
    fn submit_login(app: &mut App, email: &str, password: &str) -> Vec<Effect> {
        type_str(app, email);
        app.handle(key(KeyCode::Tab));
        type_str(app, password);
        app.handle(key(KeyCode::Enter))
    }

    /// Fill the register form (from the login form) and press enter.
    fn submit_register(app: &mut App, password: &str, confirm: &str, terms: bool) -> Vec<Effect> {
        app.handle(ctrl('n'));
        type_str(app, "Ada");
        app.handle(key(KeyCode::Tab));
        type_str(app, "ada@example.com");
        app.handle(key(KeyCode::Tab));
        type_str(app, password);
        app.handle(key(KeyCode::Tab));
        type_str(app, confirm);
        app.handle(key(KeyCode::Tab));
        if terms {
            app.handle(key(KeyCode::Char(' ')));
        }
        app.handle(key(KeyCode::Enter))
    }

    #[test]
    fn loading_without_endpoint_opens_settings_and_warns() {
        let app = loaded_app(Settings::default());

        assert!(matches!(
            loaded(&app).popover,
            Some(Popover::Settings(_))
        ));
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind() == toast::Kind::Warning));
    }

    #[test]
    fn loading_with_endpoint_goes_straight_to_login() {
        let app = loaded_app(configured_settings());

        assert!(loaded(&app).popover.is_none());
        assert_eq!(loaded(&app).active, ActiveForm::Login);
    }

    #[test]
    fn loading_prefills_a_remembered_email() {
        let mut settings = configured_settings();
        settings.saved_email = Some("a@b.com".to_owned());

        let app = loaded_app(settings);

        assert_eq!(loaded(&app).login.email(), "a@b.com");
        assert!(loaded(&app).login.remember_me());
    }

    #[test]
    fn remembered_email_is_ignored_when_saving_is_disabled() {
        let mut settings = configured_settings();
        settings.saved_email = Some("a@b.com".to_owned());
        settings.save_credentials = false;

        let app = loaded_app(settings);

        assert_eq!(loaded(&app).login.email(), "");
    }

    #[test]
    fn login_submits_a_digested_payload() {
        let mut app = loaded_app(configured_settings());

        let effects = submit_login(&mut app, "a@b.com", "Abcdef1!");

        assert_eq!(effects.len(), 1);
        let Effect::Submit(_, submit::Payload::Login(req)) = &effects[0] else {
            panic!("expected a login submit effect");
        };
        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.password, digest::digest_password("Abcdef1!"));
        assert!(loaded(&app).login.is_submitting());
    }

    #[test]
    fn resubmitting_while_in_flight_is_ignored() {
        let mut app = loaded_app(configured_settings());
        submit_login(&mut app, "a@b.com", "Abcdef1!");

        let effects = app.handle(key(KeyCode::Enter));

        assert!(effects.is_empty());
    }

    #[test]
    fn invalid_login_stays_idle_with_both_fields_marked() {
        let mut app = loaded_app(configured_settings());

        let effects = submit_login(&mut app, "not-an-email", "short");

        assert!(effects.is_empty());
        assert!(!loaded(&app).login.is_submitting());
        assert!(loaded(&app).login.email_error().is_some());
        assert!(loaded(&app).login.password_error().is_some());
    }

    #[test]
    fn register_mismatch_and_unchecked_terms_block_submission() {
        let mut app = loaded_app(configured_settings());

        let effects = submit_register(&mut app, "Abcdef1!", "Abcdef2!", false);

        assert!(effects.is_empty());
        assert!(!loaded(&app).register.is_submitting());
        assert_eq!(
            loaded(&app).register.confirm_error(),
            Some("Passwords do not match")
        );
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind() == toast::Kind::Warning
                && toast.message().contains("terms")));
    }

    #[test]
    fn failed_login_keeps_fields_and_returns_to_idle() {
        let mut app = loaded_app(configured_settings());
        submit_login(&mut app, "a@b.com", "Abcdef1!");

        let effects = app.handle(Action::SubmitFinished(
            Kind::Login,
            Ok(Resp {
                success: false,
                message: Some("No such user".to_owned()),
                name: None,
            }),
        ));

        assert!(effects.is_empty());
        assert!(!loaded(&app).login.is_submitting());
        assert_eq!(loaded(&app).login.email(), "a@b.com");
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.message() == "No such user"));
    }

    #[test]
    fn failed_login_without_message_uses_the_fallback() {
        let mut app = loaded_app(configured_settings());
        submit_login(&mut app, "a@b.com", "Abcdef1!");

        app.handle(Action::SubmitFinished(
            Kind::Login,
            Ok(Resp {
                success: false,
                message: None,
                name: None,
            }),
        ));

        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.message() == "Login failed. Please check your credentials."));
    }

    #[test]
    fn successful_login_remembers_the_email_when_asked() {
        let mut app = loaded_app(configured_settings());
        type_str(&mut app, "a@b.com");
        app.handle(key(KeyCode::Tab));
        type_str(&mut app, "Abcdef1!");
        app.handle(key(KeyCode::Tab));
        app.handle(key(KeyCode::Char(' '))); // remember me
        app.handle(key(KeyCode::Enter));

        let effects = app.handle(Action::SubmitFinished(
            Kind::Login,
            Ok(Resp {
                success: true,
                message: None,
                name: Some("Ada".to_owned()),
            }),
        ));

        assert!(matches!(effects.as_slice(), [Effect::SaveSettings(_)]));
        assert_eq!(
            loaded(&app).settings.saved_email.as_deref(),
            Some("a@b.com")
        );
        assert_eq!(loaded(&app).login.email(), "");
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.message() == "Welcome back, Ada!"));
    }

    #[test]
    fn successful_login_without_remember_me_saves_nothing() {
        let mut app = loaded_app(configured_settings());
        submit_login(&mut app, "a@b.com", "Abcdef1!");

        let effects = app.handle(Action::SubmitFinished(
            Kind::Login,
            Ok(Resp {
                success: true,
                message: None,
                name: None,
            }),
        ));

        assert!(effects.is_empty());
        assert_eq!(loaded(&app).settings.saved_email, None);
    }

    #[test]
    fn successful_registration_switches_to_login_prefilled() {
        let mut app = loaded_app(configured_settings());
        let effects = submit_register(&mut app, "Abcdef1!", "Abcdef1!", true);
        assert_eq!(effects.len(), 1);

        app.handle(Action::SubmitFinished(
            Kind::Register,
            Ok(Resp {
                success: true,
                message: None,
                name: None,
            }),
        ));

        assert_eq!(loaded(&app).active, ActiveForm::Login);
        assert_eq!(loaded(&app).login.email(), "ada@example.com");
        assert_eq!(loaded(&app).register.strength().segments(), 0);
    }

    #[test]
    fn successful_reset_request_switches_back_to_login() {
        let mut app = loaded_app(configured_settings());
        app.handle(ctrl('f'));
        type_str(&mut app, "a@b.com");
        let effects = app.handle(key(KeyCode::Enter));
        assert_eq!(effects.len(), 1);

        app.handle(Action::SubmitFinished(
            Kind::ForgotPassword,
            Ok(Resp {
                success: true,
                message: None,
                name: None,
            }),
        ));

        assert_eq!(loaded(&app).active, ActiveForm::Login);
        assert_eq!(loaded(&app).forgot.email(), "");
    }

    #[test]
    fn configuration_missing_reopens_the_settings_popover() {
        let mut app = loaded_app(configured_settings());
        submit_login(&mut app, "a@b.com", "Abcdef1!");

        app.handle(Action::SubmitFinished(
            Kind::Login,
            Err(submit::Error::ConfigurationMissing),
        ));

        assert!(matches!(
            loaded(&app).popover,
            Some(Popover::Settings(_))
        ));
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind() == toast::Kind::Error));
    }

    #[test]
    fn saving_settings_from_the_popover_emits_a_save() {
        let mut app = loaded_app(Settings::default());
        type_str(
            &mut app,
            "https://script.google.com/macros/s/ABC123/exec",
        );

        let effects = app.handle(key(KeyCode::Enter));

        assert!(matches!(effects.as_slice(), [Effect::SaveSettings(_)]));
        assert!(loaded(&app).popover.is_none());
        assert_eq!(
            loaded(&app).settings.endpoint(),
            Some("https://script.google.com/macros/s/ABC123/exec")
        );
    }

    #[test]
    fn untrusted_settings_url_keeps_the_popover_and_settings() {
        let mut app = loaded_app(Settings::default());
        type_str(&mut app, "https://evil.example.com/exec");

        let effects = app.handle(key(KeyCode::Enter));

        assert!(effects.is_empty());
        assert!(matches!(
            loaded(&app).popover,
            Some(Popover::Settings(_))
        ));
        assert_eq!(loaded(&app).settings.endpoint(), None);
    }

    #[test]
    fn theme_toggle_persists() {
        let mut app = loaded_app(configured_settings());

        let effects = app.handle(ctrl('t'));

        assert!(matches!(effects.as_slice(), [Effect::SaveSettings(_)]));
        assert_eq!(loaded(&app).settings.theme, Theme::Dark);
    }

    #[test]
    fn switching_forms_resets_the_target() {
        let mut app = loaded_app(configured_settings());
        type_str(&mut app, "leftover");
        app.handle(ctrl('n'));
        app.handle(ctrl('l'));

        assert_eq!(loaded(&app).login.email(), "");
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = loaded_app(configured_settings());

        app.handle(ctrl('c'));

        assert!(app.should_exit().is_some());
    }

    #[test]
    fn problems_surface_as_error_toasts() {
        let mut app = loaded_app(configured_settings());

        app.handle(Action::Problem("the disk fell over".to_owned()));

        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind() == toast::Kind::Error
                && toast.message() == "the disk fell over"));
    }
}
