use serde::Serialize;

/// Fields sent when logging in.
#[derive(Debug, Clone, Serialize)]
pub struct Req {
    /// Email identifying the account.
    pub email: String,

    /// The password, or its digest when encryption is enabled. Never
    /// both.
    pub password: String,
}
