//! Core YouTube API client functionality.

use crate::error::{Error, Result};
use crate::model::{AnalyticsData, ChannelStats, Video};
use crate::period::{DateRange, Period, ReportWindows};
use crate::session::{Session, access_token};
use crate::youtube_api::{
    analytics::{REPORT_METRICS, ReportResponse, WindowTotals},
    channels::ChannelListResponse,
    playlist_items::{PlaylistItem, PlaylistItemListResponse},
    videos::{VideoListResponse, VideoResource, assemble_by_position},
};
use http::Method;
use jiff::civil::Date;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Default base URL of the YouTube Data API v3.
pub const DATA_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Default base URL of the YouTube Analytics API v2.
pub const ANALYTICS_API_BASE: &str = "https://youtubeanalytics.googleapis.com/v2";

/// Base URLs of the two upstream APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub data_api: String,
    pub analytics_api: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            data_api: DATA_API_BASE.to_string(),
            analytics_api: ANALYTICS_API_BASE.to_string(),
        }
    }
}

impl ApiEndpoints {
    fn data(&self, resource: &str) -> String {
        format!("{}/{resource}", self.data_api.trim_end_matches('/'))
    }

    fn analytics(&self, resource: &str) -> String {
        format!("{}/{resource}", self.analytics_api.trim_end_matches('/'))
    }
}

/// Whether a rejected call should carry the upstream response body in its error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorBody {
    Discard,
    Report,
}

/// The ID of a channel's uploads playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadsPlaylist(pub String);

/// Client for the read-only parts of the YouTube Data and Analytics APIs that the dashboard uses.
///
/// The client holds no credentials. Every fetcher takes the caller's [`Session`] and extracts the
/// bearer token from it before sending anything, so a missing token fails without any network
/// traffic. Fetchers are independent of one another and keep no state between calls.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    /// HTTP client for API requests
    client: reqwest::Client,
    endpoints: ApiEndpoints,
}

impl YouTubeClient {
    /// Creates a client talking to the production YouTube endpoints.
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_endpoints(client, ApiEndpoints::default())
    }

    /// Creates a client talking to the given endpoints.
    pub fn with_endpoints(client: reqwest::Client, endpoints: ApiEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Makes an authenticated GET request to a YouTube API and decodes the JSON response.
    ///
    /// # Arguments
    ///
    /// * `access_token` - Bearer token for the `Authorization` header
    /// * `url` - The API endpoint URL
    /// * `query_params` - Query parameters
    /// * `reason` - Message for the [`Error::RemoteFetch`] raised if the call fails
    /// * `error_body` - Whether a rejected call reports the upstream response body
    #[instrument(skip(self, access_token), level = tracing::Level::TRACE)]
    async fn get_json<T: DeserializeOwned>(
        &self,
        access_token: &str,
        url: &str,
        query_params: &[(&str, &str)],
        reason: &'static str,
        error_body: ErrorBody,
    ) -> Result<T> {
        let response = self
            .client
            .request(Method::GET, url)
            .bearer_auth(access_token)
            .query(query_params)
            .send()
            .await
            .map_err(|e| Error::transport(reason, e))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::warn!(%status_code, url, error = %error_text, "YouTube API request rejected");
            let body = match error_body {
                ErrorBody::Report => Some(error_text),
                ErrorBody::Discard => None,
            };
            return Err(Error::rejected(reason, status_code, body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::transport(reason, e))
    }

    /// Fetches lifetime statistics for the authenticated user's channel.
    ///
    /// Uses the `channels.list` API with `part=statistics&mine=true`. Counts missing from the
    /// response are reported as `"0"`.
    ///
    /// # Errors
    ///
    /// * [`Error::Authentication`] if `session` has no provider token
    /// * [`Error::RemoteFetch`] if the call fails
    /// * [`Error::NotFound`] if the account has no channel
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self, session), ret, err)]
    pub async fn fetch_channel_stats(&self, session: Option<&Session>) -> Result<ChannelStats> {
        let access_token = access_token(session)?;

        let channels: ChannelListResponse = self
            .get_json(
                access_token,
                &self.endpoints.data("channels"),
                &[("part", "statistics"), ("mine", "true")],
                "Failed to fetch channel statistics",
                ErrorBody::Discard,
            )
            .await?;

        tracing::debug!(
            total_results = channels.page_info.total_results,
            returned_items = channels.items.len(),
            "fetched channel statistics"
        );

        let channel = channels
            .items
            .into_iter()
            .next()
            .ok_or(Error::NotFound("No YouTube channel found for this account"))?;

        Ok(channel.statistics.unwrap_or_default().into())
    }

    /// Lists the most recent uploads of the authenticated user's channel, with their statistics.
    ///
    /// This runs three dependent calls in sequence:
    ///
    /// 1. `channels.list` to find the channel's uploads playlist
    /// 2. `playlistItems.list` for up to `max_results` of its most recent items
    /// 3. one `videos.list` call for the statistics and duration of exactly those items
    ///
    /// The result is in listing order. Statistics are attributed by position (see
    /// [`assemble_by_position`]).
    ///
    /// # Errors
    ///
    /// * [`Error::Authentication`] if `session` has no provider token
    /// * [`Error::RemoteFetch`] if any of the calls fails
    /// * [`Error::NotFound`] if the account has no channel or the channel has no uploads playlist
    #[instrument(skip(self, session), err)]
    pub async fn fetch_videos(
        &self,
        session: Option<&Session>,
        max_results: u32,
    ) -> Result<Vec<Video>> {
        let access_token = access_token(session)?;

        let uploads = self.uploads_playlist(access_token).await?;
        let items = self
            .list_playlist_items(access_token, &uploads, max_results)
            .await?;
        if items.is_empty() {
            tracing::debug!(playlist_id = %uploads.0, "uploads playlist is empty");
            return Ok(Vec::new());
        }
        let details = self.video_details(access_token, &items).await?;

        Ok(assemble_by_position(items, details))
    }

    /// Reports views and net subscribers for the window ending today, compared with the equally
    /// long window before it.
    ///
    /// "Today" is the local calendar date.
    #[instrument(skip(self, session), err)]
    pub async fn fetch_analytics(
        &self,
        session: Option<&Session>,
        period: Period,
    ) -> Result<AnalyticsData> {
        self.fetch_analytics_as_of(session, period, jiff::Zoned::now().date())
            .await
    }

    /// Like [`Self::fetch_analytics`], with the current window ending on `today`.
    ///
    /// The two windows are queried concurrently. Either failing fails the whole fetch, with the
    /// upstream error body in the [`Error::RemoteFetch`].
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/analytics/reference/reports/query>
    #[instrument(skip(self, session), err)]
    pub async fn fetch_analytics_as_of(
        &self,
        session: Option<&Session>,
        period: Period,
        today: Date,
    ) -> Result<AnalyticsData> {
        let access_token = access_token(session)?;
        let windows = ReportWindows::ending_on(today, period);

        tracing::debug!(
            current = %windows.current,
            previous = %windows.previous,
            "querying analytics windows"
        );

        let (current, previous) = tokio::try_join!(
            self.window_totals(
                access_token,
                windows.current,
                "Failed to fetch current analytics"
            ),
            self.window_totals(
                access_token,
                windows.previous,
                "Failed to fetch previous analytics"
            ),
        )?;

        Ok(AnalyticsData::compare(current, previous))
    }

    /// Step one of [`Self::fetch_videos`]: find the channel's uploads playlist.
    async fn uploads_playlist(&self, access_token: &str) -> Result<UploadsPlaylist> {
        let channels: ChannelListResponse = self
            .get_json(
                access_token,
                &self.endpoints.data("channels"),
                &[("part", "contentDetails"), ("mine", "true")],
                "Failed to fetch channel details",
                ErrorBody::Discard,
            )
            .await?;

        let playlist_id = channels
            .items
            .into_iter()
            .next()
            .and_then(|channel| channel.content_details)
            .and_then(|details| details.related_playlists.uploads)
            .ok_or(Error::NotFound("No YouTube channel found"))?;

        tracing::debug!(%playlist_id, "resolved uploads playlist");
        Ok(UploadsPlaylist(playlist_id))
    }

    /// Step two of [`Self::fetch_videos`]: list the most recent uploads.
    async fn list_playlist_items(
        &self,
        access_token: &str,
        uploads: &UploadsPlaylist,
        max_results: u32,
    ) -> Result<Vec<PlaylistItem>> {
        let max_results_string = max_results.to_string();
        let playlist: PlaylistItemListResponse = self
            .get_json(
                access_token,
                &self.endpoints.data("playlistItems"),
                &[
                    ("part", "snippet"),
                    ("playlistId", uploads.0.as_str()),
                    ("maxResults", max_results_string.as_str()),
                ],
                "Failed to fetch videos",
                ErrorBody::Discard,
            )
            .await?;

        tracing::debug!(
            total_results = playlist.page_info.total_results,
            returned_items = playlist.items.len(),
            "fetched uploads"
        );

        Ok(playlist.items)
    }

    /// Step three of [`Self::fetch_videos`]: statistics for exactly the listed videos.
    async fn video_details(
        &self,
        access_token: &str,
        items: &[PlaylistItem],
    ) -> Result<Vec<VideoResource>> {
        let ids = items
            .iter()
            .map(PlaylistItem::video_id)
            .collect::<Vec<_>>()
            .join(",");

        let videos: VideoListResponse = self
            .get_json(
                access_token,
                &self.endpoints.data("videos"),
                &[("part", "statistics,contentDetails"), ("id", ids.as_str())],
                "Failed to fetch video statistics",
                ErrorBody::Discard,
            )
            .await?;

        if videos.items.len() != items.len() {
            tracing::warn!(
                requested = items.len(),
                returned_items = videos.items.len(),
                "video statistics do not line up with the listing"
            );
        } else {
            tracing::debug!(returned_items = videos.items.len(), "fetched video statistics");
        }

        Ok(videos.items)
    }

    /// Queries channel totals for a single report window.
    async fn window_totals(
        &self,
        access_token: &str,
        window: DateRange,
        reason: &'static str,
    ) -> Result<WindowTotals> {
        let start_date = window.start.to_string();
        let end_date = window.end.to_string();

        let report: ReportResponse = self
            .get_json(
                access_token,
                &self.endpoints.analytics("reports"),
                &[
                    ("ids", "channel==MINE"),
                    ("startDate", start_date.as_str()),
                    ("endDate", end_date.as_str()),
                    ("metrics", REPORT_METRICS),
                ],
                reason,
                ErrorBody::Report,
            )
            .await?;

        let totals = WindowTotals::from(&report);
        tracing::debug!(%window, ?totals, "fetched analytics window");
        Ok(totals)
    }
}
