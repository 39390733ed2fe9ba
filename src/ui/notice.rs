use crate::{core::constants::NOTICE_DURATION_MS, traits::Notifier};
use instant::Instant;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    /// Needs acknowledging before anything else happens
    Blocking,
}

/// A message shown on screen for a short while
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            shown_at: Instant::now(),
            duration: Duration::from_millis(NOTICE_DURATION_MS),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn blocking(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Blocking, message)
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Blocking notices stay until dismissed
    pub fn is_expired(&self) -> bool {
        self.kind != NoticeKind::Blocking && self.shown_at.elapsed() > self.duration
    }
}

/// Keeps the notices that are still on screen
#[derive(Debug, Default)]
pub struct NoticeBoard {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices still visible, oldest first; expired ones are dropped
    pub fn visible(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => {
                notices.retain(|n| !n.is_expired());
                notices.clone()
            }
            Err(_) => Vec::new(),
        }
    }

    /// Most recently posted notice, expired or not
    pub fn latest(&self) -> Option<Notice> {
        self.notices.lock().ok()?.last().cloned()
    }

    pub fn dismiss_all(&self) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.clear();
        }
    }
}

impl Notifier for NoticeBoard {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => log::warn!("notice: {}", notice.message),
            _ => log::info!("notice: {}", notice.message),
        }
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }
}
