//! # Notification Center
//!
//! Transient, user-facing messages ("toasts"). At most one notification is
//! live at a time: a new one replaces the current one along with its pending
//! expiry. Each notification expires [`NOTIFICATION_LIFETIME`] after it was
//! created unless dismissed earlier.
//!
//! Time is passed in by the caller, so the center itself never sleeps or
//! spawns timers. The host calls [`NotificationCenter::tick`] from its event
//! loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    /// Parse a kind name. Unknown names fall back to [`NotificationKind::Info`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenterState {
    Idle,
    Showing,
}

#[derive(Debug, Clone)]
struct Live {
    notification: Notification,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    current: Option<Live>,
    lifetime: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            current: None,
            lifetime: NOTIFICATION_LIFETIME,
        }
    }

    /// Show `message`, replacing whatever is currently showing.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) -> &Notification {
        let notification = Notification {
            message: message.into(),
            kind,
            created_at: Utc::now(),
        };
        if let Some(previous) = self.current.take() {
            log::debug!(
                "Notification superseded: {}",
                previous.notification.message
            );
        }
        log::debug!(
            "Notification [{}]: {}",
            notification.kind.as_str(),
            notification.message
        );

        &self
            .current
            .insert(Live {
                notification,
                expires_at: now + self.lifetime,
            })
            .notification
    }

    /// Remove the current notification. No-op when idle.
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Expire the current notification if its time is up. Returns `true`
    /// when a notification was removed by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(expires_at) if now >= expires_at => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// The notification visible at `now`, without mutating state.
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|live| now < live.expires_at)
            .map(|live| &live.notification)
    }

    /// The current notification, ignoring expiry not yet applied by `tick`.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|live| &live.notification)
    }

    pub fn state(&self) -> CenterState {
        if self.current.is_some() {
            CenterState::Showing
        } else {
            CenterState::Idle
        }
    }

    /// When the current notification will expire, if one is showing.
    pub fn deadline(&self) -> Option<Instant> {
        self.current.as_ref().map(|live| live.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_known_and_unknown() {
        assert_eq!(NotificationKind::parse("success"), NotificationKind::Success);
        assert_eq!(NotificationKind::parse("WARNING"), NotificationKind::Warning);
        assert_eq!(NotificationKind::parse("error"), NotificationKind::Error);
        assert_eq!(NotificationKind::parse("info"), NotificationKind::Info);
        assert_eq!(NotificationKind::parse("shout"), NotificationKind::Info);
        assert_eq!(NotificationKind::from(""), NotificationKind::Info);
    }

    #[test]
    fn test_notify_shows_message() {
        let mut center = NotificationCenter::new();
        let now = Instant::now();
        assert_eq!(center.state(), CenterState::Idle);

        center.notify("Copied to clipboard!", NotificationKind::Success, now);

        assert_eq!(center.state(), CenterState::Showing);
        let shown = center.visible(now).unwrap();
        assert_eq!(shown.message, "Copied to clipboard!");
        assert_eq!(shown.kind, NotificationKind::Success);
    }

    #[test]
    fn test_last_notification_wins() {
        let mut center = NotificationCenter::new();
        let start = Instant::now();

        center.notify("a", NotificationKind::Info, start);
        let b_time = start + Duration::from_millis(1000);
        center.notify("b", NotificationKind::Info, b_time);

        // "a" would have expired at 3000ms; "b" is still live there.
        let at = start + Duration::from_millis(3500);
        assert!(!center.tick(at));
        assert_eq!(center.visible(at).unwrap().message, "b");

        let expiry = b_time + NOTIFICATION_LIFETIME;
        assert!(center.visible(expiry).is_none());
        assert!(center.tick(expiry));
        assert_eq!(center.state(), CenterState::Idle);
    }

    #[test]
    fn test_auto_dismiss_after_lifetime() {
        let mut center = NotificationCenter::new();
        let now = Instant::now();
        center.notify("hello", NotificationKind::Info, now);

        assert!(!center.tick(now + Duration::from_millis(2999)));
        assert!(center.visible(now + Duration::from_millis(2999)).is_some());
        assert!(center.tick(now + Duration::from_millis(3000)));
        assert!(center.current().is_none());
    }

    #[test]
    fn test_dismiss_is_idempotent() {
        let mut center = NotificationCenter::new();
        center.dismiss();
        assert_eq!(center.state(), CenterState::Idle);

        let now = Instant::now();
        center.notify("x", NotificationKind::Error, now);
        center.dismiss();
        center.dismiss();
        assert_eq!(center.state(), CenterState::Idle);
        assert!(!center.tick(now + NOTIFICATION_LIFETIME));
    }

    #[test]
    fn test_deadline_tracks_current() {
        let mut center = NotificationCenter::new();
        assert!(center.deadline().is_none());

        let now = Instant::now();
        center.notify("x", NotificationKind::Info, now);
        assert_eq!(center.deadline(), Some(now + NOTIFICATION_LIFETIME));
    }
}
