//! Watchlist command - Queue of movies to watch

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::store::{movies, Database};
use crate::tmdb::TmdbClient;

/// Execute `watchlist` without a subcommand: print the queue
pub fn execute_list() -> Result<String> {
    let db = Database::open(config::database_path()?)?;
    let watchlist = movies::watchlist(db.conn())?;

    if watchlist.is_empty() {
        return Ok(
            "Watchlist is empty. Add movies with `movilog watchlist add <movie-id>`".to_string(),
        );
    }

    let mut table = utils::new_table(&["ID", "Title", "Released", "TMDB"]);
    for movie in &watchlist {
        table.add_row(vec![
            movie.id.to_string(),
            utils::truncate(&movie.title, 50),
            movie.release_date.clone().unwrap_or_else(|| "-".to_string()),
            movie
                .vote_average
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!("\n\n{} movie(s) on your watchlist", watchlist.len()));
    Ok(output)
}

/// Execute `watchlist add`: save the movie locally and flag it
pub fn execute_add(movie_id: i64) -> Result<()> {
    let db = Database::open(config::database_path()?)?;

    // Known movie: just flip the flag
    if let Some(movie) = movies::movie_by_id(db.conn(), movie_id)? {
        if movie.is_watched {
            anyhow::bail!(
                "'{}' is already marked watched; the watchlist only holds unwatched movies",
                movie.title
            );
        }
        if movie.in_watchlist {
            println!("'{}' is already on your watchlist", movie.title);
            return Ok(());
        }
        movies::set_in_watchlist(db.conn(), movie_id)?;
        println!("{} '{}' to your watchlist", "Added".green(), movie.title);
        return Ok(());
    }

    // New movie: cache the catalog row first
    let client = TmdbClient::new(config::api_token()?)?;
    let details = client
        .details(movie_id)
        .map_err(utils::friendly)
        .with_context(|| format!("Could not fetch movie {movie_id} from the catalog"))?;

    let mut movie = utils::details_to_movie(&details);
    movie.in_watchlist = true;
    movies::upsert_movie(db.conn(), &movie)?;

    println!("{} '{}' to your watchlist", "Added".green(), movie.title);
    Ok(())
}

/// Execute `watchlist remove`: clear the flag, keep any watch history
pub fn execute_remove(movie_id: i64) -> Result<()> {
    let db = Database::open(config::database_path()?)?;

    let movie = movies::movie_by_id(db.conn(), movie_id)?
        .with_context(|| format!("Movie {movie_id} is not saved locally"))?;

    if !movie.in_watchlist {
        println!("'{}' is not on your watchlist", movie.title);
        return Ok(());
    }

    movies::clear_watchlist_flag(db.conn(), movie_id)?;
    println!(
        "{} '{}' from your watchlist",
        "Removed".green(),
        movie.title
    );
    Ok(())
}
