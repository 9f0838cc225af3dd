use crossterm::event::KeyEvent;
use vestibule_core::submit;
use vestibule_core::Settings;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// We loaded settings from disk (or fell back to defaults)
    LoadedSettings(Settings),

    /// A submission finished, one way or the other
    SubmitFinished(submit::Kind, submit::error::Result<submit::Resp>),

    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),

    /// Some amount of time passed and we should do clock things
    TimePassed,
}
