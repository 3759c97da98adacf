//! Watch statistics
//!
//! Pure aggregation over the watched list: totals, a per-day calendar
//! heatmap for a selected month, top-rated favorites and the most recent
//! watches. No I/O happens here; the stats command feeds in store rows.

use chrono::{Datelike, Local, NaiveDate, TimeZone};

use crate::store::Movie;

/// A calendar month, the unit of heatmap navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl Month {
    /// The current month in local time
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Option<Self> {
        let (year, month) = s.split_once('-')?;
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        // Probe the first day to reject month 0 / 13
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }

    /// Number of days in this month, leap years included
    pub fn day_count(self) -> u32 {
        let first = self.first_day();
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        // Both dates are valid by construction
        next.unwrap()
            .signed_duration_since(first)
            .num_days() as u32
    }

    /// First day of the month
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// True if the date falls inside this month
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human label, e.g. "March 2026"
    pub fn label(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Aggregated statistics over the watch history
#[derive(Debug, Clone, Default)]
pub struct WatchStats {
    /// Total watched movies (all time)
    pub watched_count: usize,
    /// Total minutes watched (all time; unknown runtimes count as 0)
    pub total_minutes: u64,
    /// Label of the selected month
    pub month_label: String,
    /// Watched-movie count per day of the selected month (index 0 = day 1)
    pub heatmap: Vec<u32>,
    /// Highest-rated watched movies, best first, at most 10
    pub favorites: Vec<Movie>,
    /// Most recently watched movies, newest first, at most 10
    pub recent: Vec<Movie>,
    /// Watched movies whose date falls in the selected month
    pub watched_in_month: Vec<Movie>,
}

const TOP_N: usize = 10;

/// Convert a unix timestamp to a local calendar day
fn local_day(ts: i64) -> Option<NaiveDate> {
    Local.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive())
}

impl WatchStats {
    /// Compute stats for the given month from the watched list,
    /// grouping days in local time
    pub fn compute(watched: &[Movie], month: Month) -> Self {
        Self::compute_with(watched, month, local_day)
    }

    fn compute_with(
        watched: &[Movie],
        month: Month,
        to_day: impl Fn(i64) -> Option<NaiveDate>,
    ) -> Self {
        // Defensive: callers pass the watched list, but only rows with a
        // timestamp count toward date-based views
        let all: Vec<&Movie> = watched
            .iter()
            .filter(|m| m.is_watched && m.watched_at.is_some())
            .collect();

        let watched_count = all.len();
        let total_minutes = all
            .iter()
            .map(|m| m.runtime_minutes.unwrap_or(0) as u64)
            .sum();

        let mut heatmap = vec![0u32; month.day_count() as usize];
        let mut watched_in_month = Vec::new();
        for movie in &all {
            let Some(date) = movie.watched_at.and_then(&to_day) else {
                continue;
            };
            if month.contains(date) {
                heatmap[date.day() as usize - 1] += 1;
                watched_in_month.push((*movie).clone());
            }
        }

        let mut favorites: Vec<Movie> = all
            .iter()
            .filter(|m| m.user_rating.unwrap_or(0.0) > 0.0)
            .map(|m| (*m).clone())
            .collect();
        favorites.sort_by(|a, b| {
            b.user_rating
                .unwrap_or(0.0)
                .total_cmp(&a.user_rating.unwrap_or(0.0))
        });
        favorites.truncate(TOP_N);

        let mut recent: Vec<Movie> = all.iter().map(|m| (*m).clone()).collect();
        recent.sort_by(|a, b| b.watched_at.unwrap_or(0).cmp(&a.watched_at.unwrap_or(0)));
        recent.truncate(TOP_N);

        Self {
            watched_count,
            total_minutes,
            month_label: month.label(),
            heatmap,
            favorites,
            recent,
            watched_in_month,
        }
    }
}
