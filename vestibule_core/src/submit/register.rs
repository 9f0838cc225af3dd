use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fields sent when registering a new account.
#[derive(Debug, Clone, Serialize)]
pub struct Req {
    /// Display name for the new account.
    pub name: String,

    /// Email to use for contact and login.
    pub email: String,

    /// The password, or its digest when encryption is enabled.
    pub password: String,

    /// When the account was created, from the client's clock. The sheet
    /// records it alongside the row.
    pub timestamp: DateTime<Utc>,
}
