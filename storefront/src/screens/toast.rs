//! The transient "File Upload" notification.

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

pub const TOAST_TITLE: &str = "File Upload";

/// A notification that hides itself `delay` after being shown.
#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    delay: Duration,
    shown_at: Option<Instant>,
}

/// What a page needs to draw a visible toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub title: &'static str,
    pub message: String,
    /// Milliseconds left before it hides itself
    pub remaining_ms: u64,
}

impl Toast {
    pub fn new(delay: Duration) -> Self {
        Self {
            message: String::new(),
            delay,
            shown_at: None,
        }
    }

    pub fn title(&self) -> &'static str {
        TOAST_TITLE
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.shown_at = Some(Instant::now());
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.remaining_at(now).is_some()
    }

    /// Time left before autohide, or `None` if hidden.
    pub fn remaining_at(&self, now: Instant) -> Option<Duration> {
        let shown_at = self.shown_at?;
        let remaining = self.delay.checked_sub(now.saturating_duration_since(shown_at))?;
        (!remaining.is_zero()).then_some(remaining)
    }

    pub fn view_at(&self, now: Instant) -> Option<ToastView> {
        self.remaining_at(now).map(|remaining| ToastView {
            title: TOAST_TITLE,
            message: self.message.clone(),
            remaining_ms: remaining.as_millis() as u64,
        })
    }
}
