//! Watch command - Mark a movie watched with a rating and date

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::store::{movies, Database};
use crate::tmdb::{TmdbClient, TmdbError};

/// Options for the watch command
pub struct WatchOptions {
    pub movie_id: i64,
    /// Rating on the 1-10 scale
    pub rating: u8,
    /// Watch date as YYYY-MM-DD; today if omitted
    pub date: Option<String>,
}

/// Execute the watch command
pub fn execute(options: WatchOptions) -> Result<()> {
    if !(1..=10).contains(&options.rating) {
        anyhow::bail!("Rating must be between 1 and 10");
    }

    let date = match &options.date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{s}'. Use YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    let watched_at = watched_timestamp(date)?;

    let db = Database::open(config::database_path()?)?;

    // Prefer fresh catalog details so the runtime lands in the stats;
    // fall back to the cached row when offline.
    let title = match fetch_details(options.movie_id) {
        Ok(details) => {
            let movie = utils::details_to_movie(&details);
            let title = movie.title.clone();
            let existing = movies::movie_by_id(db.conn(), options.movie_id)?;
            movies::upsert_movie(db.conn(), &movie)?;
            // A replace resets flags; keep an existing watchlist mark until
            // set_watched clears it below
            if existing.is_some_and(|m| m.in_watchlist) {
                movies::set_in_watchlist(db.conn(), options.movie_id)?;
            }
            title
        }
        Err(err) => {
            let Some(movie) = movies::movie_by_id(db.conn(), options.movie_id)? else {
                return Err(err);
            };
            tracing::warn!(movie_id = options.movie_id, "using cached row: {err}");
            movie.title
        }
    };

    movies::set_watched(
        db.conn(),
        options.movie_id,
        options.rating as f32,
        watched_at,
    )?;

    println!(
        "{} '{}' as watched ({}/10) on {}",
        "Marked".green(),
        title,
        options.rating,
        date.format("%Y-%m-%d")
    );
    Ok(())
}

fn fetch_details(movie_id: i64) -> Result<crate::tmdb::MovieDetails> {
    let client = TmdbClient::new(config::api_token()?)?;
    match client.details(movie_id) {
        Ok(details) => Ok(details),
        Err(TmdbError::Api(404, _)) => {
            anyhow::bail!("Movie {movie_id} not found in the catalog")
        }
        Err(err) => Err(utils::friendly(err)),
    }
}

/// Timestamp for a watch date. Noon keeps the day stable across DST shifts
/// when grouping back into calendar days.
fn watched_timestamp(date: NaiveDate) -> Result<i64> {
    let noon = date
        .and_hms_opt(12, 0, 0)
        .context("Invalid time of day")?;
    let local = noon
        .and_local_timezone(Local)
        .single()
        .or_else(|| noon.and_local_timezone(Local).earliest())
        .context("Could not resolve local time")?;
    Ok(local.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_watched_timestamp_round_trips_to_same_day() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let ts = watched_timestamp(date).unwrap();

        let back = Local.timestamp_opt(ts, 0).single().unwrap().date_naive();
        assert_eq!(back.year(), 2026);
        assert_eq!(back.month(), 3);
        assert_eq!(back.day(), 15);
    }
}
