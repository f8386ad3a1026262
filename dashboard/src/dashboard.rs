//! The dashboard page: summary cards and the sortable videos table.

use crate::error::Result;
use crate::model::{AnalyticsData, ChannelStats, Video};
use crate::period::Period;
use crate::session::{Session, access_token};
use crate::youtube_api::YouTubeClient;
use jiff::civil::Date;
use jiff::tz::TimeZone;
use std::cmp::Ordering;
use std::fmt;
use tracing::instrument;

/// Number of recent uploads shown in the table.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// A percentage change shown under a card's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Change {
    pub value: f64,
    pub period: Period,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.value >= 0.0 { "+" } else { "" };
        write!(f, "{sign}{:.1}% from {}", self.value, self.period)
    }
}

/// One summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsCard {
    pub title: &'static str,
    pub value: i64,
    pub change: Option<Change>,
}

impl fmt::Display for StatsCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12} {:>14}", self.title, group_thousands(self.value))?;
        if let Some(change) = &self.change {
            write!(f, "   {change}")?;
        }
        Ok(())
    }
}

/// A row of the videos table.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoRow {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub views: u64,
    /// Per-video change is not fetched, so this is always zero.
    pub views_change: f64,
    pub upload_date: Date,
}

impl From<Video> for VideoRow {
    fn from(video: Video) -> Self {
        Self {
            upload_date: video.published_at.to_zoned(TimeZone::UTC).date(),
            id: video.id,
            title: video.title,
            thumbnail_url: video.thumbnail_url,
            views: video.views,
            views_change: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    #[default]
    Views,
    ViewsChange,
    UploadDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction. Starts as views, descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    /// Applies a click on a column header.
    ///
    /// Clicking the active column flips the direction. Clicking another column sorts by it,
    /// descending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Descending;
        }
    }

    fn compare(&self, a: &VideoRow, b: &VideoRow) -> Ordering {
        let ord = match self.field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Views => a.views.cmp(&b.views),
            SortField::ViewsChange => a.views_change.total_cmp(&b.views_change),
            SortField::UploadDate => a.upload_date.cmp(&b.upload_date),
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// The videos table. Rows keep upstream order; sorting only affects [`Self::sorted`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideosTable {
    rows: Vec<VideoRow>,
    pub sort: SortState,
}

impl VideosTable {
    pub fn new(rows: Vec<VideoRow>) -> Self {
        Self {
            rows,
            sort: SortState::default(),
        }
    }

    /// Rows in upstream order.
    pub fn rows(&self) -> &[VideoRow] {
        &self.rows
    }

    /// Rows in the current sort order. Ties keep upstream order.
    pub fn sorted(&self) -> Vec<&VideoRow> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        rows
    }
}

impl fmt::Display for VideosTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<48} {:>12} {:>8} {:>12}",
            "Video", "Views", "Change", "Upload Date"
        )?;
        for row in self.sorted() {
            let sign = if row.views_change >= 0.0 { "+" } else { "" };
            let change = format!("{sign}{:.1}%", row.views_change);
            writeln!(
                f,
                "{:<48} {:>12} {:>8} {:>12}",
                truncate(&row.title, 48),
                group_thousands(saturating_i64(row.views)),
                change,
                row.upload_date.to_string()
            )?;
        }
        Ok(())
    }
}

/// Everything the dashboard page shows for one period.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub period: Period,
    pub cards: Vec<StatsCard>,
    pub videos: VideosTable,
}

impl DashboardView {
    /// Fetches channel statistics, period analytics and recent uploads concurrently, and
    /// assembles the page from them.
    ///
    /// The first failing fetch fails the whole load; no partial view is produced.
    #[instrument(skip(client, session), err)]
    pub async fn load(
        client: &YouTubeClient,
        session: Option<&Session>,
        period: Period,
        max_results: u32,
    ) -> Result<Self> {
        // A signed-out load must not issue any request.
        access_token(session)?;

        let (stats, analytics, videos) = tokio::try_join!(
            client.fetch_channel_stats(session),
            client.fetch_analytics(session, period),
            client.fetch_videos(session, max_results),
        )?;

        tracing::info!(
            videos = videos.len(),
            views = analytics.views,
            "loaded dashboard"
        );
        Ok(Self::assemble(period, &stats, &analytics, videos))
    }

    /// Maps fetched data onto cards and table rows.
    pub fn assemble(
        period: Period,
        stats: &ChannelStats,
        analytics: &AnalyticsData,
        videos: Vec<Video>,
    ) -> Self {
        let cards = vec![
            StatsCard {
                title: "Total Views",
                value: analytics.views,
                change: Some(Change {
                    value: analytics.views_change,
                    period,
                }),
            },
            StatsCard {
                title: "Subscribers",
                value: saturating_i64(stats.subscribers()),
                change: Some(Change {
                    value: analytics.subscribers_change,
                    period,
                }),
            },
            StatsCard {
                title: "Videos",
                value: saturating_i64(stats.videos()),
                change: None,
            },
        ];

        Self {
            period,
            cards,
            videos: VideosTable::new(videos.into_iter().map(VideoRow::from).collect()),
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.period.label())?;
        writeln!(f)?;
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.videos)
    }
}

fn saturating_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Formats an integer with `,` between groups of three digits.
pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}
