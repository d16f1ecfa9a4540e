//! Announcement model.
//!
//! Announcements are notices posted by managers. Active ones are shown to
//! staff in a banner, most urgent first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Lowest priority ("normal").
pub const MIN_PRIORITY: u8 = 1;

/// Highest priority ("urgent").
pub const MAX_PRIORITY: u8 = 3;

/// Number of announcements the banner shows.
pub const BANNER_LIMIT: usize = 5;

fn default_priority() -> u8 {
    MIN_PRIORITY
}

fn default_active() -> bool {
    true
}

/// A notice shown to staff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Unique identifier.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// The manager who posted it, if known.
    #[serde(default)]
    pub author_id: Option<String>,
    /// Only active announcements appear in the banner.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// 1 (normal), 2 (important) or 3 (urgent).
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// When the announcement was posted.
    pub created_at: DateTime<Utc>,
    /// When the announcement was last edited or toggled.
    pub updated_at: DateTime<Utc>,
}

/// Validates the editable parts of an announcement.
///
/// Title and content must not be blank and the priority must be within
/// [`MIN_PRIORITY`]..=[`MAX_PRIORITY`].
pub fn validate_announcement(title: &str, content: &str, priority: u8) -> PayrollResult<()> {
    if title.trim().is_empty() {
        return Err(PayrollError::InvalidAnnouncement {
            field: "title".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if content.trim().is_empty() {
        return Err(PayrollError::InvalidAnnouncement {
            field: "content".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(PayrollError::InvalidAnnouncement {
            field: "priority".to_string(),
            message: format!(
                "{} must be between {} and {}",
                priority, MIN_PRIORITY, MAX_PRIORITY
            ),
        });
    }

    Ok(())
}

/// Sorts announcements by priority, highest first, then newest first.
///
/// The sort is stable, so announcements with equal priority and timestamp
/// keep their input order.
pub fn sort_announcements(announcements: &mut [Announcement]) {
    announcements.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

/// Picks the announcements shown in the banner.
///
/// Keeps active ones only, sorted with [`sort_announcements`], at most
/// [`BANNER_LIMIT`] of them.
pub fn select_banner(announcements: &[Announcement]) -> Vec<Announcement> {
    let mut active: Vec<Announcement> = announcements
        .iter()
        .filter(|a| a.is_active)
        .cloned()
        .collect();
    sort_announcements(&mut active);
    active.truncate(BANNER_LIMIT);
    active
}
