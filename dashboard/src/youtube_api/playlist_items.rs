//! YouTube PlaylistItems API types.

use crate::youtube_api::types::PageInfo;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response structure for the `playlistItems.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub kind: String,
    /// Items in the playlist, most recent upload first for an uploads playlist.
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Token for the next page. Never followed; the dashboard shows a single page.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A `playlistItem` resource identifies a video that is included in a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

impl PlaylistItem {
    pub fn video_id(&self) -> &str {
        &self.snippet.resource_id.video_id
    }
}

/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#snippet>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    /// The item's title.
    #[serde(default)]
    pub title: String,
    /// The date and time that the item was added to the playlist.
    ///
    /// For an uploads playlist, this is when the video was published.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

/// Thumbnail renditions. Private or deleted videos come back without any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
}

impl Thumbnails {
    /// URL of the medium rendition, falling back to the default one.
    pub fn preferred_url(&self) -> Option<&str> {
        self.medium
            .as_ref()
            .or(self.default.as_ref())
            .map(|t| t.url.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Identifies the resource a playlist item points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceId {
    /// The value will be `youtube#video` for video items.
    #[serde(default)]
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uploads_listing() {
        let resp: PlaylistItemListResponse = serde_json::from_str(
            r#"{
                "kind": "youtube#playlistItemListResponse",
                "nextPageToken": "EAAaBlBUOkNBVQ",
                "items": [
                    {"snippet": {
                        "title": "First",
                        "publishedAt": "2024-09-15T16:00:00Z",
                        "thumbnails": {
                            "default": {"url": "https://i.ytimg.com/vi/a/default.jpg"},
                            "medium": {"url": "https://i.ytimg.com/vi/a/mqdefault.jpg", "width": 320, "height": 180}
                        },
                        "resourceId": {"kind": "youtube#video", "videoId": "a"}
                    }},
                    {"snippet": {
                        "title": "Private video",
                        "publishedAt": "2024-09-01T08:30:00Z",
                        "resourceId": {"kind": "youtube#video", "videoId": "b"}
                    }}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[0].video_id(), "a");
        assert_eq!(
            resp.items[0].snippet.thumbnails.preferred_url(),
            Some("https://i.ytimg.com/vi/a/mqdefault.jpg")
        );
        assert_eq!(resp.items[1].snippet.thumbnails.preferred_url(), None);
        assert_eq!(resp.next_page_token.as_deref(), Some("EAAaBlBUOkNBVQ"));
    }

    #[test]
    fn default_thumbnail_is_used_without_medium() {
        let thumbs = Thumbnails {
            default: Some(Thumbnail {
                url: "d".to_string(),
                width: None,
                height: None,
            }),
            medium: None,
        };
        assert_eq!(thumbs.preferred_url(), Some("d"));
    }
}
