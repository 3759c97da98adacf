//! Shared utilities for commands

use anyhow::{anyhow, Result};
use chrono::{Local, TimeZone};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use std::io::{self, Write};

use crate::store::Movie;
use crate::tmdb::{MovieDetails, TmdbError};

/// Build a table in the house style
pub fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(Cell::new).collect::<Vec<_>>());
    table
}

/// Truncate a string to `max` characters, appending an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Format a minute total as "83h 20m" (or "45m" under an hour)
pub fn format_minutes(total: u64) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a unix timestamp as a local calendar date
pub fn format_watch_date(ts: i64) -> String {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a user rating as "8/10" ("7.5/10" for half points)
pub fn format_rating(rating: Option<f32>) -> String {
    match rating {
        Some(r) if r.fract() == 0.0 => format!("{}/10", r as i64),
        Some(r) => format!("{r:.1}/10"),
        None => "-".to_string(),
    }
}

/// Local tracking status for the browse/search status column
pub fn status_label(movie: Option<&Movie>) -> String {
    match movie {
        Some(m) if m.is_watched => format!("watched {}", format_rating(m.user_rating)),
        Some(m) if m.in_watchlist => "watchlist".to_string(),
        _ => "-".to_string(),
    }
}

/// Ask the user for a y/N confirmation
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} (y/N) ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Turn a client error into a message fit for a terminal. Network failures
/// get the short offline message; everything else keeps the API detail.
pub fn friendly(err: TmdbError) -> anyhow::Error {
    match err {
        TmdbError::Network(detail) => {
            tracing::debug!(%detail, "network failure");
            anyhow!("No internet connection. Please check your network.")
        }
        other => anyhow::Error::new(other),
    }
}

/// Convert full catalog details into a storable movie row
pub fn details_to_movie(details: &MovieDetails) -> Movie {
    Movie {
        id: details.id,
        title: details.title.clone(),
        overview: details.overview.clone(),
        poster_path: details.poster_path.clone(),
        release_date: details.release_date.clone(),
        in_watchlist: false,
        is_watched: false,
        user_rating: None,
        watched_at: None,
        runtime_minutes: details.runtime,
        vote_average: details.vote_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("a longer title here", 10), "a longer …");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(139), "2h 19m");
        assert_eq!(format_minutes(5000), "83h 20m");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(None), "-");
        assert_eq!(format_rating(Some(8.0)), "8/10");
        assert_eq!(format_rating(Some(7.5)), "7.5/10");
    }

    #[test]
    fn test_status_label() {
        assert_eq!(status_label(None), "-");

        let mut movie = Movie {
            id: 1,
            title: "T".to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            in_watchlist: true,
            is_watched: false,
            user_rating: None,
            watched_at: None,
            runtime_minutes: None,
            vote_average: None,
        };
        assert_eq!(status_label(Some(&movie)), "watchlist");

        movie.is_watched = true;
        movie.user_rating = Some(9.0);
        assert_eq!(status_label(Some(&movie)), "watched 9/10");
    }

    #[test]
    fn test_details_to_movie_carries_runtime() {
        let details: MovieDetails = serde_json::from_str(
            r#"{ "id": 550, "title": "Fight Club", "runtime": 139, "vote_average": 8.4 }"#,
        )
        .unwrap();

        let movie = details_to_movie(&details);
        assert_eq!(movie.id, 550);
        assert_eq!(movie.runtime_minutes, Some(139));
        assert!(!movie.is_watched);
        assert!(!movie.in_watchlist);
    }
}
