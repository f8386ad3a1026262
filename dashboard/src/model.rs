//! Shapes handed back by the fetchers.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Lifetime counts for the signed-in user's channel.
///
/// Counts are kept as the decimal strings YouTube returns, since they are not guaranteed to fit
/// in 32 bits and the platform may round or hide them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub view_count: String,
    pub subscriber_count: String,
    pub video_count: String,
}

impl Default for ChannelStats {
    fn default() -> Self {
        Self {
            view_count: "0".to_string(),
            subscriber_count: "0".to_string(),
            video_count: "0".to_string(),
        }
    }
}

impl ChannelStats {
    pub fn views(&self) -> u64 {
        parse_count(&self.view_count)
    }

    pub fn subscribers(&self) -> u64 {
        parse_count(&self.subscriber_count)
    }

    pub fn videos(&self) -> u64 {
        parse_count(&self.video_count)
    }
}

/// One uploaded video with its engagement counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub published_at: Timestamp,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// ISO 8601 duration, e.g. `PT4M13S`.
    pub duration: String,
}

/// Channel activity over the selected window, compared with the window before it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    /// Total views in the current window.
    pub views: i64,
    /// Percentage change in views versus the previous window.
    pub views_change: f64,
    /// Net subscribers (gained minus lost) in the current window.
    pub subscribers: i64,
    /// Percentage change in net subscribers versus the previous window.
    pub subscribers_change: f64,
}

/// Parses a YouTube count string, treating anything unparseable as zero.
pub(crate) fn parse_count(s: &str) -> u64 {
    s.trim().parse().unwrap_or(0)
}
