//! Transient user-facing notices

use std::time::Duration;

/// How long a notice stays visible
pub const AUTO_CLOSE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A short message shown on top of the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
    pub auto_close: Duration,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            message: message.into(),
            auto_close: AUTO_CLOSE,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
            auto_close: AUTO_CLOSE,
        }
    }

    /// A listing could not be loaded (`resource` is plural, e.g. "ships")
    pub fn listing_failed(resource: &str) -> Self {
        Self::error(
            format!("Error while loading {}", resource),
            format!(
                "Unable to load the {} listing. Please try again later.",
                resource
            ),
        )
    }

    /// A detail record could not be loaded (`kind` is singular, e.g. "rocket")
    pub fn details_failed(kind: &str) -> Self {
        Self::error(
            format!("Error while loading {} details", kind),
            format!("Unable to load {} details. Please try again later.", kind),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_failed() {
        let notice = Notice::listing_failed("ships");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.title, "Error while loading ships");
        assert_eq!(notice.auto_close, Duration::from_secs(5));
    }
}
