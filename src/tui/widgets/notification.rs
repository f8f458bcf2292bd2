//! Toast notifications
//!
//! Dashboard commands report their outcome here instead of opening a
//! blocking dialog.

use std::time::{Duration, Instant};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::error::HubResult;

const DEFAULT_DURATION: Duration = Duration::from_secs(4);
/// How long failure toasts stay up
const ERROR_DURATION: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Info => " Info ",
            Self::Success => " Done ",
            Self::Error => " Error ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    created_at: Instant,
    duration: Duration,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    /// Success with the command's message, or error with the failure text
    pub fn from_result(result: HubResult<String>) -> Self {
        match result {
            Ok(message) => Self::success(message),
            Err(e) => Self::error(e.to_string()).with_duration(ERROR_DURATION),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

pub struct NotificationWidget<'a> {
    notification: &'a Notification,
}

impl<'a> NotificationWidget<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }
}

impl Widget for NotificationWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.notification.kind.color();
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(self.notification.kind.title())
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD));

        Paragraph::new(self.notification.message.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}

/// Notifications in arrival order; the oldest live one is shown
#[derive(Debug, Default)]
pub struct NotificationQueue {
    notifications: Vec<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn remove_expired(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    pub fn current(&self) -> Option<&Notification> {
        self.notifications.first()
    }

    /// Drop the visible notification early
    pub fn dismiss(&mut self) {
        if !self.notifications.is_empty() {
            self.notifications.remove(0);
        }
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HubError;

    #[test]
    fn test_from_result() {
        let ok = Notification::from_result(Ok("Accepted bkg-1".into()));
        assert_eq!(ok.kind, NotificationKind::Success);
        assert_eq!(ok.message, "Accepted bkg-1");

        let err = Notification::from_result(Err(HubError::Validation("nope".into())));
        assert_eq!(err.kind, NotificationKind::Error);
        assert!(err.message.contains("nope"));
        assert_eq!(err.duration, ERROR_DURATION);
        assert_eq!(ok.duration, DEFAULT_DURATION);
    }

    #[test]
    fn test_queue_order_and_expiry() {
        let mut queue = NotificationQueue::new();
        queue.push(Notification::info("first").with_duration(Duration::ZERO));
        queue.push(Notification::success("second"));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.current().unwrap().message, "first");

        queue.remove_expired();
        assert_eq!(queue.current().unwrap().message, "second");

        queue.dismiss();
        assert!(queue.is_empty());
    }
}
