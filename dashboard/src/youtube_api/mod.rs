//! YouTube Data API v3 and Analytics API v2 client library.
//!
//! This module provides a read-only client for the handful of endpoints a channel dashboard
//! needs: lifetime channel statistics, the channel's recent uploads with their engagement counts,
//! and time-windowed channel reports.
//!
//! # Credentials
//!
//! The [`YouTubeClient`] does not own a token. Each fetcher takes the caller's
//! [`Session`](crate::session::Session) and pulls the provider's bearer token out of it before
//! anything goes on the wire, so a signed-out caller fails with
//! [`Error::Authentication`](crate::Error::Authentication) and no request is made.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use youtube_dashboard::{Period, Session, YouTubeClient};
//!
//! # async fn example() -> Result<(), youtube_dashboard::Error> {
//! let session = Session::with_provider_token("ya29.a0...");
//! let client = YouTubeClient::new(reqwest::Client::new());
//!
//! let (stats, analytics, videos) = tokio::try_join!(
//!     client.fetch_channel_stats(Some(&session)),
//!     client.fetch_analytics(Some(&session), Period::SevenDays),
//!     client.fetch_videos(Some(&session), 10),
//! )?;
//! println!(
//!     "{} subscribers, {} views this week ({:+.1}%), {} recent videos",
//!     stats.subscriber_count,
//!     analytics.views,
//!     analytics.views_change,
//!     videos.len()
//! );
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod channels;
pub mod client;
pub mod playlist_items;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::{ApiEndpoints, UploadsPlaylist, YouTubeClient};
pub use types::PageInfo;

pub use analytics::{ReportResponse, WindowTotals, subscribers_change, views_change};
pub use channels::{Channel, ChannelStatistics};
pub use playlist_items::{PlaylistItem, PlaylistItemSnippet, Thumbnails};
pub use videos::{VideoResource, VideoStatistics, ZERO_DURATION};
