//! Watched command - Watch history

use anyhow::{Context, Result};

use super::utils;
use crate::config;
use crate::stats::{Month, WatchStats};
use crate::store::{movies, Database};

/// Execute the watched command and return formatted output
pub fn execute(month: Option<&str>) -> Result<String> {
    let db = Database::open(config::database_path()?)?;
    let watched = movies::watched(db.conn())?;

    let (rows, footer) = match month {
        Some(s) => {
            let month = Month::parse(s)
                .with_context(|| format!("Invalid month '{s}'. Use YYYY-MM"))?;
            let stats = WatchStats::compute(&watched, month);
            let label = month.label();
            let mut in_month = stats.watched_in_month;
            in_month.sort_by(|a, b| b.watched_at.unwrap_or(0).cmp(&a.watched_at.unwrap_or(0)));
            let footer = format!("{} movie(s) watched in {}", in_month.len(), label);
            (in_month, footer)
        }
        None => {
            let footer = format!("{} movie(s) watched", watched.len());
            (watched, footer)
        }
    };

    if rows.is_empty() {
        return Ok(format!(
            "{footer}. Mark one with `movilog watch <movie-id> --rating <1-10>`"
        ));
    }

    let mut table = utils::new_table(&["ID", "Title", "Rating", "Watched on", "Runtime"]);
    for movie in &rows {
        table.add_row(vec![
            movie.id.to_string(),
            utils::truncate(&movie.title, 50),
            utils::format_rating(movie.user_rating),
            movie
                .watched_at
                .map(utils::format_watch_date)
                .unwrap_or_else(|| "-".to_string()),
            movie
                .runtime_minutes
                .map(|m| utils::format_minutes(m as u64))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    Ok(format!("{table}\n\n{footer}"))
}
