//! YouTube Channels API types.

use crate::model::ChannelStats;
use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// Contains a list of [`Channel`] resources that match the request criteria. YouTube omits
/// `items` entirely when the account has no channel, so it defaults to empty.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#channelListResponse`.
    #[serde(default)]
    pub kind: String,
    /// A list of channels that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Channel>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// A `channel` resource contains information about a YouTube channel.
///
/// Only the parts this crate requests are modelled, and each is optional since a part is only
/// present when it was asked for.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    #[serde(default)]
    pub id: String,
    /// Present when `part=statistics` was requested.
    #[serde(default)]
    pub statistics: Option<ChannelStatistics>,
    /// Present when `part=contentDetails` was requested.
    #[serde(rename = "contentDetails", default)]
    pub content_details: Option<ChannelContentDetails>,
}

/// Statistics about the channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChannelStatistics {
    /// The number of times the channel has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of subscribers that the channel has.
    ///
    /// Rounded down to three significant figures by YouTube.
    #[serde(rename = "subscriberCount")]
    pub subscriber_count: Option<String>,
    /// Whether the channel's subscriber count is publicly visible.
    #[serde(rename = "hiddenSubscriberCount")]
    pub hidden_subscriber_count: Option<bool>,
    /// The number of public videos uploaded to the channel.
    #[serde(rename = "videoCount")]
    pub video_count: Option<String>,
}

impl From<ChannelStatistics> for ChannelStats {
    fn from(stats: ChannelStatistics) -> Self {
        Self {
            view_count: count_or_zero(stats.view_count),
            subscriber_count: count_or_zero(stats.subscriber_count),
            video_count: count_or_zero(stats.video_count),
        }
    }
}

fn count_or_zero(count: Option<String>) -> String {
    match count {
        Some(count) if !count.is_empty() => count,
        _ => "0".to_string(),
    }
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#contentDetails>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists", default)]
    pub related_playlists: RelatedPlaylists,
}

/// Playlists YouTube maintains on the channel's behalf.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The ID of the playlist that contains the channel's uploaded videos.
    pub uploads: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_statistics_default_to_zero() {
        let resp: ChannelListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#channelListResponse",
                "items": [{"id": "UC1", "statistics": {"viewCount": "1200", "videoCount": ""}}]
            }"#,
        )
        .unwrap();
        let channel = resp.items.into_iter().next().unwrap();
        let stats = ChannelStats::from(channel.statistics.unwrap());
        assert_eq!(stats.view_count, "1200");
        assert_eq!(stats.subscriber_count, "0");
        assert_eq!(stats.video_count, "0");
    }

    #[test]
    fn absent_items_means_no_channel() {
        let resp: ChannelListResponse = serde_json::from_str(
            r#"{"kind": "youtube#channelListResponse", "pageInfo": {"totalResults": 0, "resultsPerPage": 5}}"#,
        )
        .unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.page_info.total_results, 0);
    }

    #[test]
    fn uploads_playlist_is_read_from_content_details() {
        let resp: ChannelListResponse = serde_json::from_str(
            r#"{"items": [{"id": "UC1", "contentDetails": {"relatedPlaylists": {"likes": "LL", "uploads": "UU1"}}}]}"#,
        )
        .unwrap();
        let details = resp.items[0].content_details.as_ref().unwrap();
        assert_eq!(details.related_playlists.uploads.as_deref(), Some("UU1"));
    }
}
