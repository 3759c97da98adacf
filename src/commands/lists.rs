//! Lists command - Custom named collections of movies

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::store::{lists, movies, CustomList, Database};
use crate::tmdb::TmdbClient;

/// Execute `lists` without a subcommand: overview of all lists
pub fn execute_overview() -> Result<String> {
    let db = Database::open(config::database_path()?)?;
    let summaries = lists::all_lists(db.conn())?;

    if summaries.is_empty() {
        return Ok(
            "No custom lists yet. Create one with `movilog lists create <name>`".to_string(),
        );
    }

    let mut table = utils::new_table(&["Name", "Movies"]);
    for summary in &summaries {
        table.add_row(vec![
            summary.list.list_name.clone(),
            summary.movie_count.to_string(),
        ]);
    }

    Ok(format!("{table}\n\n{} list(s)", summaries.len()))
}

/// Execute `lists create`
pub fn execute_create(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("List name must not be empty");
    }

    let db = Database::open(config::database_path()?)?;

    if lists::list_by_name(db.conn(), name)?.is_some() {
        println!("List '{name}' already exists");
        return Ok(());
    }

    lists::create_list(db.conn(), name)?;
    println!("{} list '{}'", "Created".green(), name);
    Ok(())
}

/// Execute `lists show`: the movies in one list
pub fn execute_show(name: &str) -> Result<String> {
    let db = Database::open(config::database_path()?)?;
    let list = resolve(&db, name)?;
    let members = lists::movies_in_list(db.conn(), list.list_id)?;

    if members.is_empty() {
        return Ok(format!(
            "'{}' is empty. Add movies with `movilog lists add {} <movie-id>`",
            list.list_name, list.list_name
        ));
    }

    let mut table = utils::new_table(&["ID", "Title", "Released", "Status"]);
    for movie in &members {
        table.add_row(vec![
            movie.id.to_string(),
            utils::truncate(&movie.title, 50),
            movie.release_date.clone().unwrap_or_else(|| "-".to_string()),
            utils::status_label(Some(movie)),
        ]);
    }

    Ok(format!(
        "{table}\n\n{} movie(s) in '{}'",
        members.len(),
        list.list_name
    ))
}

/// Execute `lists add`: put a movie on a list, caching it locally if needed
pub fn execute_add(name: &str, movie_id: i64) -> Result<()> {
    let db = Database::open(config::database_path()?)?;
    let list = resolve(&db, name)?;

    let title = match movies::movie_by_id(db.conn(), movie_id)? {
        Some(movie) => movie.title,
        None => {
            // Not saved yet: cache the catalog row so the list can show it
            let client = TmdbClient::new(config::api_token()?)?;
            let details = client
                .details(movie_id)
                .map_err(utils::friendly)
                .with_context(|| format!("Could not fetch movie {movie_id} from the catalog"))?;
            let movie = utils::details_to_movie(&details);
            movies::upsert_movie(db.conn(), &movie)?;
            movie.title
        }
    };

    lists::add_movie_to_list(db.conn(), list.list_id, movie_id)?;
    println!("{} '{}' to '{}'", "Added".green(), title, list.list_name);
    Ok(())
}

/// Execute `lists remove`: take a movie off a list
pub fn execute_remove(name: &str, movie_id: i64) -> Result<()> {
    let db = Database::open(config::database_path()?)?;
    let list = resolve(&db, name)?;

    if !lists::remove_movie_from_list(db.conn(), list.list_id, movie_id)? {
        anyhow::bail!("Movie {} is not in '{}'", movie_id, list.list_name);
    }

    println!(
        "{} movie {} from '{}'",
        "Removed".green(),
        movie_id,
        list.list_name
    );
    Ok(())
}

/// Execute `lists delete`: drop the list and its entries
pub fn execute_delete(name: &str, yes: bool) -> Result<()> {
    let db = Database::open(config::database_path()?)?;
    let list = resolve(&db, name)?;
    let count = lists::movies_in_list(db.conn(), list.list_id)?.len();

    if !yes {
        let confirmed = utils::confirm(&format!(
            "Delete list '{}' and its {} entry(ies)? Movies stay saved.",
            list.list_name, count
        ))?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    lists::delete_list(db.conn(), list.list_id)?;
    println!("{} list '{}'", "Deleted".green(), list.list_name);
    Ok(())
}

fn resolve(db: &Database, name: &str) -> Result<CustomList> {
    lists::list_by_name(db.conn(), name.trim())?.with_context(|| {
        format!("No list named '{name}'. See your lists with `movilog lists`")
    })
}
