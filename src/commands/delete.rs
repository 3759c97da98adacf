//! Delete command - Remove a movie and all its tracking state

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::store::{movies, Database};

/// Execute the delete command
pub fn execute(movie_id: i64, yes: bool) -> Result<()> {
    let db = Database::open(config::database_path()?)?;

    let movie = movies::movie_by_id(db.conn(), movie_id)?
        .with_context(|| format!("Movie {movie_id} is not saved locally"))?;

    if !yes {
        let confirmed = utils::confirm(&format!(
            "Delete '{}' with its rating, watch date and list entries?",
            movie.title
        ))?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    movies::delete_movie(db.conn(), movie_id)?;
    println!("{} '{}'", "Deleted".green(), movie.title);
    Ok(())
}
