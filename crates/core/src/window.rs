//! Analysis date windows.
//!
//! The caller supplies the post-fire window directly. The pre-fire window
//! is derived from its start: a 45-day span ending 15 days before the
//! post-fire window, which avoids contamination from the fire event itself
//! while keeping enough scenes for a usable cloud-free composite.

use chrono::Duration;

use crate::types::Date;

/// Days before the post-fire start at which the pre-fire window opens.
pub const PRE_FIRE_LOOKBACK_DAYS: i64 = 60;
/// Days of buffer between the pre-fire window close and the post-fire start.
pub const PRE_FIRE_BUFFER_DAYS: i64 = 15;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Date,
    pub end: Date,
}

impl DateWindow {
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Day after `end`, for filters that take an exclusive upper bound.
    pub fn exclusive_end(&self) -> Date {
        self.end + Duration::days(1)
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// The pre/post-fire window pair for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisWindows {
    pub pre_fire: DateWindow,
    pub post_fire: DateWindow,
}

impl AnalysisWindows {
    /// Derive both windows from the user-supplied post-fire range.
    ///
    /// Pre-fire = `[start - 60d, start - 15d]`, post-fire = `[start, end]`.
    pub fn from_post_fire(start: Date, end: Date) -> Self {
        Self {
            pre_fire: DateWindow::new(
                start - Duration::days(PRE_FIRE_LOOKBACK_DAYS),
                start - Duration::days(PRE_FIRE_BUFFER_DAYS),
            ),
            post_fire: DateWindow::new(start, end),
        }
    }

    /// Calendar year of the post-fire start, used to pick the land-cover
    /// classification year.
    pub fn analysis_year(&self) -> i32 {
        use chrono::Datelike;
        self.post_fire.start.year()
    }
}
