use serde::Serialize;

/// Fields sent when asking for a password reset.
#[derive(Debug, Clone, Serialize)]
pub struct Req {
    /// Email of the account to reset.
    pub email: String,
}
