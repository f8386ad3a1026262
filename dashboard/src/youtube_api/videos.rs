//! YouTube Videos API types and functionality.

use crate::model::{Video, parse_count};
use crate::youtube_api::playlist_items::PlaylistItem;
use crate::youtube_api::types::PageInfo;
use serde::{Deserialize, Serialize};

/// ISO 8601 duration reported when YouTube gives us none.
pub const ZERO_DURATION: &str = "PT0S";

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// Identifies the API resource's type.
    ///
    /// The value will be `youtube#videoListResponse`.
    #[serde(default)]
    pub kind: String,
    /// A list of videos that match the request criteria.
    #[serde(default)]
    pub items: Vec<VideoResource>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
}

/// A `video` resource represents a YouTube video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResource {
    /// The ID that YouTube uses to uniquely identify the video.
    #[serde(default)]
    pub id: String,
    /// Contains statistics about the video.
    #[serde(default)]
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails", default)]
    pub content_details: Option<VideoContentDetails>,
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount")]
    pub like_count: Option<String>,
    /// The number of comments for the video.
    #[serde(rename = "commentCount")]
    pub comment_count: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// The length of the video as an ISO 8601 duration.
    pub duration: Option<String>,
}

/// Combines the playlist listing with the `videos.list` results.
///
/// The two lists are paired by position, not by video id: the `i`-th statistics entry is
/// attributed to the `i`-th listed item. Items without a counterpart get zero counts and
/// [`ZERO_DURATION`].
pub fn assemble_by_position(items: Vec<PlaylistItem>, details: Vec<VideoResource>) -> Vec<Video> {
    let mut details = details.into_iter();
    items
        .into_iter()
        .map(|item| assemble(item, details.next()))
        .collect()
}

fn assemble(item: PlaylistItem, details: Option<VideoResource>) -> Video {
    let (statistics, content_details) = match details {
        Some(d) => (
            d.statistics.unwrap_or_default(),
            d.content_details.unwrap_or_default(),
        ),
        None => Default::default(),
    };
    let count = |c: &Option<String>| c.as_deref().map(parse_count).unwrap_or(0);

    let snippet = item.snippet;
    Video {
        thumbnail_url: snippet
            .thumbnails
            .preferred_url()
            .unwrap_or_default()
            .to_string(),
        id: snippet.resource_id.video_id,
        title: snippet.title,
        published_at: snippet.published_at,
        views: count(&statistics.view_count),
        likes: count(&statistics.like_count),
        comments: count(&statistics.comment_count),
        duration: content_details
            .duration
            .unwrap_or_else(|| ZERO_DURATION.to_string()),
    }
}
