//! Render-time options supplied by the caller.

use chrono::NaiveDateTime;

/// Options for rendering a report.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Title used when the template has no `_TITLE`.
    pub default_title: String,
    /// Shown in the report footer when set.
    pub timestamp: Option<NaiveDateTime>,
    /// Leave `_OTHER` properties out of the properties section.
    pub exclude_other: bool,
    /// Include `_HIDE` properties in the properties section.
    pub include_hidden: bool,
}

impl RenderOptions {
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            default_title: default_title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Option<NaiveDateTime>) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_exclude_other(mut self, enable: bool) -> Self {
        self.exclude_other = enable;
        self
    }

    #[must_use]
    pub fn with_include_hidden(mut self, enable: bool) -> Self {
        self.include_hidden = enable;
        self
    }
}
