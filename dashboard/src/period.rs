//! Reporting periods and the calendar windows they cover.

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The time window a dashboard is looking at.
///
/// Parsed from the short codes `7d`, `30d`, `90d` and `all`. Anything else is treated as `30d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Period {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
    #[serde(rename = "90d")]
    NinetyDays,
    #[serde(rename = "all")]
    AllTime,
}

impl Period {
    pub const ALL: [Period; 4] = [
        Period::SevenDays,
        Period::ThirtyDays,
        Period::NinetyDays,
        Period::AllTime,
    ];

    /// Parses a duration code, falling back to [`Period::ThirtyDays`] for unknown codes.
    pub fn from_code(code: &str) -> Self {
        match code {
            "7d" => Self::SevenDays,
            "30d" => Self::ThirtyDays,
            "90d" => Self::NinetyDays,
            "all" => Self::AllTime,
            other => {
                tracing::debug!(code = other, "unknown duration code, using 30d");
                Self::ThirtyDays
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::ThirtyDays => "30d",
            Self::NinetyDays => "90d",
            Self::AllTime => "all",
        }
    }

    /// Label shown on the duration selector.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SevenDays => "Last 7 days",
            Self::ThirtyDays => "Last 30 days",
            Self::NinetyDays => "Last 90 days",
            Self::AllTime => "All time",
        }
    }

    /// Number of calendar days in a report window for this period.
    ///
    /// "All time" is reported over the same span as 30 days.
    pub fn span_days(&self) -> i64 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays | Self::AllTime => 30,
            Self::NinetyDays => 90,
        }
    }
}

impl FromStr for Period {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_code(s))
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Self::from_code(&code))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A contiguous, end-inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(rename = "startDate")]
    pub start: Date,
    #[serde(rename = "endDate")]
    pub end: Date,
}

impl DateRange {
    /// Inclusive number of calendar days covered.
    pub fn days(&self) -> i64 {
        i64::from((self.end - self.start).get_days()) + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// The current report window and the equally long window right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    pub current: DateRange,
    pub previous: DateRange,
}

impl ReportWindows {
    /// Computes the windows for `period`, with the current window ending on `today`.
    ///
    /// The previous window has exactly as many days as the current one and ends the day before
    /// the current window starts.
    pub fn ending_on(today: Date, period: Period) -> Self {
        let current = DateRange {
            start: today.saturating_sub((period.span_days() - 1).days()),
            end: today,
        };

        let previous_end = current.start.saturating_sub(1.day());
        let previous = DateRange {
            start: previous_end.saturating_sub((current.days() - 1).days()),
            end: previous_end,
        };

        Self { current, previous }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn seven_day_windows() {
        let windows = ReportWindows::ending_on(date(2024, 10, 15), Period::SevenDays);
        assert_eq!(
            windows.current,
            DateRange {
                start: date(2024, 10, 9),
                end: date(2024, 10, 15),
            }
        );
        assert_eq!(
            windows.previous,
            DateRange {
                start: date(2024, 10, 2),
                end: date(2024, 10, 8),
            }
        );
        assert_eq!(windows.current.days(), 7);
        assert_eq!(windows.previous.days(), 7);
    }

    #[test]
    fn windows_are_contiguous_and_equally_long() {
        let days = [
            date(2024, 1, 1),
            date(2024, 3, 1),
            date(2024, 2, 29),
            date(2023, 12, 31),
            date(2025, 7, 15),
        ];
        for today in days {
            for period in Period::ALL {
                let w = ReportWindows::ending_on(today, period);
                assert_eq!(w.current.end, today);
                assert_eq!(w.current.days(), period.span_days(), "{period} on {today}");
                assert_eq!(w.previous.days(), w.current.days(), "{period} on {today}");
                assert_eq!(
                    w.previous.end.tomorrow().unwrap(),
                    w.current.start,
                    "{period} on {today}"
                );
            }
        }
    }

    #[test]
    fn windows_cross_month_and_leap_day() {
        let w = ReportWindows::ending_on(date(2024, 3, 5), Period::SevenDays);
        assert_eq!(w.current.start, date(2024, 2, 28));
        assert_eq!(w.previous.end, date(2024, 2, 27));
        assert_eq!(w.previous.start, date(2024, 2, 21));
    }

    #[test]
    fn unknown_codes_fall_back_to_thirty_days() {
        assert_eq!(Period::from_code("7d"), Period::SevenDays);
        assert_eq!(Period::from_code("90d"), Period::NinetyDays);
        assert_eq!(Period::from_code("all"), Period::AllTime);
        assert_eq!(Period::from_code("1y"), Period::ThirtyDays);
        assert_eq!(Period::from_code(""), Period::ThirtyDays);
        assert_eq!("bogus".parse::<Period>().unwrap(), Period::ThirtyDays);

        let today = date(2024, 10, 15);
        assert_eq!(
            ReportWindows::ending_on(today, Period::from_code("bogus")),
            ReportWindows::ending_on(today, Period::ThirtyDays)
        );
        assert_eq!(
            ReportWindows::ending_on(today, Period::AllTime),
            ReportWindows::ending_on(today, Period::ThirtyDays)
        );
    }

    #[test]
    fn period_codes_round_trip_through_serde() {
        for period in Period::ALL {
            let json = serde_json::to_string(&period).unwrap();
            assert_eq!(json, format!("\"{}\"", period.code()));
            assert_eq!(serde_json::from_str::<Period>(&json).unwrap(), period);
        }
        assert_eq!(
            serde_json::from_str::<Period>(r#""1y""#).unwrap(),
            Period::ThirtyDays
        );
        assert!(serde_json::from_str::<Period>("7").is_err());
    }

    #[test]
    fn date_range_serializes_as_plain_dates() {
        let range = DateRange {
            start: date(2024, 10, 9),
            end: date(2024, 10, 15),
        };
        assert_eq!(
            serde_json::to_string(&range).unwrap(),
            r#"{"startDate":"2024-10-09","endDate":"2024-10-15"}"#
        );
        assert_eq!(range.to_string(), "[2024-10-09, 2024-10-15]");
    }
}
