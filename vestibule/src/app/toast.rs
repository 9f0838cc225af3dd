use super::Palette;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

/// How long a toast stays up unless asked otherwise.
const DEFAULT_DURATION: Duration = Duration::from_secs(5);

/// A transient notification, stacked in the top-right corner until it
/// expires.
#[derive(Debug)]
pub struct Toast {
    /// What to tell the user.
    message: String,

    /// Severity, which picks the border color and marker.
    kind: Kind,

    /// When the toast was created.
    shown_at: Instant,

    /// How long to keep it on screen.
    duration: Duration,
}

/// Severities a toast can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Something worked.
    Success,

    /// Something failed.
    Error,

    /// Something needs attention but nothing failed yet.
    Warning,

    /// Neutral information.
    Info,
}

impl Toast {
    /// A toast with an explicit kind and the default duration.
    pub fn new(kind: Kind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
            duration: DEFAULT_DURATION,
        }
    }

    /// A success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Kind::Success, message)
    }

    /// An error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Kind::Error, message)
    }

    /// A warning toast.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Kind::Warning, message)
    }

    /// Keep this toast up longer than the default.
    #[must_use]
    pub fn lasting(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether the toast should be pruned.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() >= self.duration
    }

    #[cfg(test)]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[cfg(test)]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Border color for this toast's severity.
    fn color(&self, palette: &Palette) -> Color {
        match self.kind {
            Kind::Success => palette.success,
            Kind::Error => palette.error,
            Kind::Warning => palette.warning,
            Kind::Info => palette.accent,
        }
    }

    /// Marker shown before the message.
    fn marker(&self) -> &'static str {
        match self.kind {
            Kind::Success => "✓",
            Kind::Error => "✗",
            Kind::Warning => "!",
            Kind::Info => "·",
        }
    }
}

/// Draw the toasts stacked from the top-right corner, newest at the top.
pub fn render(toasts: &[Toast], frame: &mut Frame<'_>, area: Rect, palette: &Palette) {
    let width = area.width.saturating_sub(2).min(44);
    if width < 10 {
        return;
    }

    let x = area.right() - width - 1;

    let mut y = area.y + 1;

    for toast in toasts.iter().rev() {
        if y + 3 > area.bottom() {
            break;
        }

        let toast_area = Rect::new(x, y, width, 3);

        let popup = Paragraph::new(format!("{} {}", toast.marker(), toast.message))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(palette.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(toast.color(palette))),
            );

        frame.render_widget(Clear, toast_area);
        frame.render_widget(popup, toast_area);

        y += 3;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fresh_toast_is_not_expired() {
        assert!(!Toast::new(Kind::Info, "hello").expired());
    }

    #[test]
    fn zero_duration_expires_immediately() {
        let toast = Toast::new(Kind::Info, "gone").lasting(Duration::ZERO);

        assert!(toast.expired());
    }

    #[test]
    fn constructors_set_kinds() {
        assert_eq!(Toast::success("s").kind(), Kind::Success);
        assert_eq!(Toast::error("e").kind(), Kind::Error);
        assert_eq!(Toast::warning("w").kind(), Kind::Warning);
        assert_eq!(Toast::new(Kind::Info, "i").kind(), Kind::Info);
    }
}
