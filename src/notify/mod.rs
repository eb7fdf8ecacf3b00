use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn warning(message: impl Into<String>) -> Self {
        Notification {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            level: Level::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Keeps the banners raised during one poll tick.
#[derive(Debug, Default)]
pub struct BannerNotifier {
    banners: Vec<Notification>,
}

impl BannerNotifier {
    pub fn banners(&self) -> &[Notification] {
        &self.banners
    }
}

#[cfg(test)]
impl BannerNotifier {
    pub fn into_banners(self) -> Vec<Notification> {
        self.banners
    }
}

impl Notifier for BannerNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.level {
            Level::Warning => warn!(message = %notification.message, "Notification"),
            Level::Error => error!(message = %notification.message, "Notification"),
        }
        self.banners.push(notification);
    }
}
