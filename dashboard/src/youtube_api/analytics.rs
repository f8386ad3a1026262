//! YouTube Analytics API reports and period-over-period comparison.

use crate::model::AnalyticsData;
use serde::{Deserialize, Serialize};

/// Metrics requested for every report window, in column order.
pub const REPORT_METRICS: &str = "views,subscribersGained,subscribersLost";

const VIEWS: usize = 0;
const SUBSCRIBERS_GAINED: usize = 1;
const SUBSCRIBERS_LOST: usize = 2;

/// Response structure for the `reports.query` API call.
///
/// Without a `dimensions` parameter the report holds a single row of totals, with one cell per
/// requested metric. YouTube leaves `rows` out when there is no data for the window.
///
/// See: <https://developers.google.com/youtube/analytics/reference/reports/query>
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub kind: String,
    #[serde(rename = "columnHeaders", default)]
    pub column_headers: Vec<ColumnHeader>,
    #[serde(default)]
    pub rows: Option<Vec<Vec<serde_json::Value>>>,
}

/// Describes one column of a report. Cells are read by position, so headers are informational.
#[derive(Debug, Serialize, Deserialize)]
pub struct ColumnHeader {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "columnType", default)]
    pub column_type: String,
    #[serde(rename = "dataType", default)]
    pub data_type: String,
}

impl ReportResponse {
    /// Integer value of a cell in the first row. Absent or non-numeric cells count as zero.
    fn total(&self, column: usize) -> i64 {
        self.rows
            .as_ref()
            .and_then(|rows| rows.first())
            .and_then(|row| row.get(column))
            .and_then(|cell| cell.as_i64().or_else(|| cell.as_f64().map(|f| f as i64)))
            .unwrap_or(0)
    }
}

/// Channel totals for one report window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowTotals {
    pub views: i64,
    pub subscribers_gained: i64,
    pub subscribers_lost: i64,
}

impl WindowTotals {
    pub fn net_subscribers(&self) -> i64 {
        self.subscribers_gained.saturating_sub(self.subscribers_lost)
    }
}

impl From<&ReportResponse> for WindowTotals {
    fn from(report: &ReportResponse) -> Self {
        Self {
            views: report.total(VIEWS),
            subscribers_gained: report.total(SUBSCRIBERS_GAINED),
            subscribers_lost: report.total(SUBSCRIBERS_LOST),
        }
    }
}

impl AnalyticsData {
    /// Compares the current window against the previous one.
    pub fn compare(current: WindowTotals, previous: WindowTotals) -> Self {
        let current_net = current.net_subscribers();
        Self {
            views: current.views,
            views_change: views_change(current.views, previous.views),
            subscribers: current_net,
            subscribers_change: subscribers_change(current_net, previous.net_subscribers()),
        }
    }
}

/// Percentage change in views.
///
/// Growth from zero is reported as a flat 100, and no views in either window as 0.
pub fn views_change(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        current.saturating_sub(previous) as f64 / previous as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

/// Percentage change in net subscribers.
///
/// Net counts can be negative, so the change is taken relative to the magnitude of the previous
/// value. A previous net of zero yields 100 if the current net is positive and 0 otherwise.
pub fn subscribers_change(current_net: i64, previous_net: i64) -> f64 {
    if previous_net != 0 {
        let delta = current_net.saturating_sub(previous_net);
        delta as f64 / previous_net.unsigned_abs() as f64 * 100.0
    } else if current_net > 0 {
        100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(json: &str) -> ReportResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn views_change_table() {
        assert_eq!(views_change(500, 0), 100.0);
        assert_eq!(views_change(150, 200), -25.0);
        assert_eq!(views_change(0, 0), 0.0);
        assert_eq!(views_change(300, 200), 50.0);
        assert_eq!(views_change(0, 200), -100.0);
    }

    #[test]
    fn subscribers_change_table() {
        assert_eq!(subscribers_change(10, 0), 100.0);
        assert_eq!(subscribers_change(0, 0), 0.0);
        // shrinking from zero is not reported as a decline
        assert_eq!(subscribers_change(-5, 0), 0.0);
        assert_eq!(subscribers_change(15, 10), 50.0);
        // relative to |previous|, so improving on a net loss is positive
        assert_eq!(subscribers_change(-5, -10), 50.0);
        assert_eq!(subscribers_change(-20, -10), -100.0);
        assert_eq!(subscribers_change(10, -10), 200.0);
    }

    #[test]
    fn totals_come_from_first_row() {
        let r = report(
            r#"{
                "kind": "youtubeAnalytics#resultTable",
                "columnHeaders": [
                    {"name": "views", "columnType": "METRIC", "dataType": "INTEGER"},
                    {"name": "subscribersGained", "columnType": "METRIC", "dataType": "INTEGER"},
                    {"name": "subscribersLost", "columnType": "METRIC", "dataType": "INTEGER"}
                ],
                "rows": [[1234, 40, 15]]
            }"#,
        );
        let totals = WindowTotals::from(&r);
        assert_eq!(
            totals,
            WindowTotals {
                views: 1234,
                subscribers_gained: 40,
                subscribers_lost: 15,
            }
        );
        assert_eq!(totals.net_subscribers(), 25);
    }

    #[test]
    fn missing_rows_and_cells_are_zero() {
        assert_eq!(
            WindowTotals::from(&report(r#"{"kind": "youtubeAnalytics#resultTable"}"#)),
            WindowTotals::default()
        );
        assert_eq!(
            WindowTotals::from(&report(r#"{"rows": []}"#)),
            WindowTotals::default()
        );
        let partial = WindowTotals::from(&report(r#"{"rows": [[77, null]]}"#));
        assert_eq!(partial.views, 77);
        assert_eq!(partial.subscribers_gained, 0);
        assert_eq!(partial.subscribers_lost, 0);
    }

    #[test]
    fn headers_with_missing_fields_still_parse() {
        let r = report(
            r#"{
                "columnHeaders": [{"name": "views", "columnType": "METRIC"}, {}],
                "rows": [[42, 3]]
            }"#,
        );
        assert_eq!(r.column_headers[0].data_type, "");
        let totals = WindowTotals::from(&r);
        assert_eq!(totals.views, 42);
        assert_eq!(totals.subscribers_gained, 3);
        assert_eq!(totals.subscribers_lost, 0);
    }

    #[test]
    fn huge_cells_saturate_instead_of_overflowing() {
        // float cells beyond i64 are clamped on the way in
        let current = WindowTotals::from(&report(r#"{"rows": [[1e300, 1e300, -1e300]]}"#));
        assert_eq!(current.views, i64::MAX);
        assert_eq!(current.net_subscribers(), i64::MAX);

        let previous = WindowTotals {
            views: -1,
            subscribers_gained: i64::MIN,
            subscribers_lost: i64::MAX,
        };
        assert_eq!(previous.net_subscribers(), i64::MIN);

        let data = AnalyticsData::compare(current, previous);
        assert_eq!(data.views, i64::MAX);
        assert_eq!(data.views_change, 100.0);
        assert!(data.subscribers_change.is_finite());
        assert!(data.subscribers_change > 0.0);
        assert_eq!(views_change(i64::MIN, 1), i64::MIN as f64 * 100.0);
    }

    #[test]
    fn compare_windows() {
        let current = WindowTotals {
            views: 150,
            subscribers_gained: 12,
            subscribers_lost: 2,
        };
        let previous = WindowTotals {
            views: 200,
            subscribers_gained: 8,
            subscribers_lost: 3,
        };
        let data = AnalyticsData::compare(current, previous);
        assert_eq!(data.views, 150);
        assert_eq!(data.views_change, -25.0);
        assert_eq!(data.subscribers, 10);
        assert_eq!(data.subscribers_change, 100.0);
    }
}
