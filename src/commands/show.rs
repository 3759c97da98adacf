//! Show command - Movie details merged with local tracking state

use anyhow::Result;
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::store::{lists, movies, Database, Movie};
use crate::tmdb::{TmdbClient, TmdbError};

/// Execute the show command
pub fn execute(movie_id: i64) -> Result<()> {
    let db = Database::open(config::database_path()?)?;
    let local = movies::movie_by_id(db.conn(), movie_id)?;

    let client = TmdbClient::new(config::api_token()?)?;
    match client.details(movie_id) {
        Ok(details) => {
            println!("{}", details.title.bold());
            if let Some(date) = details.release_date.as_deref().filter(|d| !d.is_empty()) {
                println!("Released: {date}");
            }
            if let Some(runtime) = details.runtime {
                println!("Runtime: {}", utils::format_minutes(runtime as u64));
            }
            if let Some(avg) = details.vote_average {
                let votes = details.vote_count.unwrap_or(0);
                println!("TMDB rating: {avg:.1}/10 ({votes} votes)");
            }
            if let Some(url) = details.poster_url() {
                println!("Poster: {url}");
            }
            if let Some(url) = details.backdrop_url() {
                println!("Backdrop: {url}");
            }
            if !details.overview.is_empty() {
                println!("\n{}", details.overview);
            }
        }
        Err(TmdbError::Api(404, _)) => {
            anyhow::bail!("Movie {movie_id} not found in the catalog");
        }
        Err(TmdbError::Network(detail)) => {
            tracing::debug!(%detail, "details fetch failed");
            let Some(ref movie) = local else {
                return Err(utils::friendly(TmdbError::Network(detail)));
            };
            // Offline, but we have a cached row
            println!("{}", "You are currently offline. Showing local data.".dimmed());
            println!("{}", movie.title.bold());
            if let Some(date) = movie.release_date.as_deref().filter(|d| !d.is_empty()) {
                println!("Released: {date}");
            }
            if let Some(runtime) = movie.runtime_minutes {
                println!("Runtime: {}", utils::format_minutes(runtime as u64));
            }
            if !movie.overview.is_empty() {
                println!("\n{}", movie.overview);
            }
        }
        Err(other) => return Err(utils::friendly(other)),
    }

    print_tracking_state(&db, movie_id, local.as_ref())?;
    Ok(())
}

fn print_tracking_state(db: &Database, movie_id: i64, local: Option<&Movie>) -> Result<()> {
    println!();
    match local {
        Some(movie) if movie.is_watched => {
            let date = movie
                .watched_at
                .map(utils::format_watch_date)
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{} {} on {}",
                "Watched".green(),
                utils::format_rating(movie.user_rating),
                date
            );
        }
        Some(movie) if movie.in_watchlist => {
            println!("{}", "On your watchlist".cyan());
        }
        _ => println!("{}", "Not tracked".dimmed()),
    }

    let list_names = lists::lists_containing(db.conn(), movie_id)?;
    if !list_names.is_empty() {
        println!("Lists: {}", list_names.join(", "));
    }

    Ok(())
}
