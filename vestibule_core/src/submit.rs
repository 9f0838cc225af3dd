use serde::{Deserialize, Serialize};

/// The client that sends submissions.
pub mod client;
pub use client::Client;

/// Things that can go wrong while submitting.
pub mod error;
pub use error::Error;

/// Ask for a password reset.
pub mod forgot_password;

/// Log into an existing account.
pub mod login;

/// Register a new account.
pub mod register;

/// A complete request body. The endpoint dispatches on the `action` tag,
/// so every submission carries it alongside its fields.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Payload {
    /// Log into an existing account.
    Login(login::Req),

    /// Register a new account.
    Register(register::Req),

    /// Ask for a password reset.
    ForgotPassword(forgot_password::Req),
}

impl Payload {
    /// Which kind of submission this is. Used for routing responses back
    /// to the form that sent them, and for logging.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Login(_) => Kind::Login,
            Self::Register(_) => Kind::Register,
            Self::ForgotPassword(_) => Kind::ForgotPassword,
        }
    }
}

/// The three kinds of submission, minus their fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A login attempt.
    Login,

    /// A registration attempt.
    Register,

    /// A password-reset request.
    ForgotPassword,
}

/// What the endpoint sends back. The script returns a bare JSON object;
/// anything without `success: true` counts as failure.
#[derive(Debug, Clone, Deserialize)]
pub struct Resp {
    /// Whether the submission was accepted.
    #[serde(default)]
    pub success: bool,

    /// A human-readable message, shown to the user on failure.
    #[serde(default)]
    pub message: Option<String>,

    /// The account's display name, returned on successful login.
    #[serde(default)]
    pub name: Option<String>,
}
