//! User-visible, non-blocking notices.
//!
//! Every failure in a scan or mutation ends up here instead of aborting the
//! process. Desktop notifications are only implemented on macOS.

use std::cell::RefCell;

#[cfg(target_os = "macos")]
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for notices, injected wherever user actions are performed
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Prints notices to stderr, optionally mirroring them as desktop notifications
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier {
    pub desktop: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => {
                tracing::info!(message = %notice.message, "notice");
                eprintln!("{}", notice.message);
            }
            NoticeLevel::Warning => {
                tracing::warn!(message = %notice.message, "notice");
                eprintln!("Warning: {}", notice.message);
            }
            NoticeLevel::Error => {
                tracing::error!(message = %notice.message, "notice");
                eprintln!("Error: {}", notice.message);
            }
        }

        if self.desktop {
            send_desktop_notification(&notice);
        }
    }
}

/// Keeps notices in memory, newest last (status line of the terminal UI)
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: RefCell<Vec<Notice>>,
    pub desktop: bool,
}

impl NoticeLog {
    pub fn new(desktop: bool) -> Self {
        Self {
            notices: RefCell::new(Vec::new()),
            desktop,
        }
    }

    pub fn latest(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    pub fn drain(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain(..).collect()
    }
}

impl Notifier for NoticeLog {
    fn notify(&self, notice: Notice) {
        tracing::debug!(level = ?notice.level, message = %notice.message, "notice");
        if self.desktop {
            send_desktop_notification(&notice);
        }
        self.notices.borrow_mut().push(notice);
    }
}

fn send_desktop_notification(notice: &Notice) {
    #[cfg(target_os = "macos")]
    {
        let title = match notice.level {
            NoticeLevel::Info => "Quadrant",
            NoticeLevel::Warning => "Quadrant - Warning",
            NoticeLevel::Error => "Quadrant - Error",
        };
        let script = format!(
            r#"display notification "{}" with title "{}""#,
            notice.message.replace('"', "\\\""),
            title
        );

        let _ = Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = notice;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_log_keeps_order() {
        let log = NoticeLog::default();
        log.notify(Notice::info("first"));
        log.notify(Notice::warning("second"));

        assert_eq!(log.latest(), Some(Notice::warning("second")));
        let drained = log.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Info);
        assert!(log.latest().is_none());
    }
}
