//! Channel dashboard for YouTube creators.
//!
//! Given a signed-in [`Session`], the dashboard fetches three things concurrently (lifetime
//! channel statistics, the channel's recent uploads, and views and subscribers over a reporting
//! period compared with the period before it) and turns them into summary cards and a sortable
//! table.

pub mod dashboard;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod period;
pub mod session;
pub mod youtube_api;

pub use dashboard::{
    DashboardView, SortDirection, SortField, SortState, StatsCard, VideosTable,
};
pub use error::{Error, Result};
pub use model::{AnalyticsData, ChannelStats, Video};
pub use period::{DateRange, Period, ReportWindows};
pub use session::{Session, access_token};
pub use youtube_api::{ApiEndpoints, YouTubeClient};
