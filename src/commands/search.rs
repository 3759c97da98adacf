//! Search command - Query the movie catalog

use anyhow::Result;

use super::utils;
use crate::config;
use crate::store::{movies, Database};
use crate::tmdb::TmdbClient;

/// Minimum query length; shorter searches return too much noise
const MIN_QUERY_LEN: usize = 2;

/// Execute the search command and return formatted output
pub fn execute(query: &str, page: u32) -> Result<String> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        anyhow::bail!("Search query must be at least {MIN_QUERY_LEN} characters");
    }

    let client = TmdbClient::new(config::api_token()?)?;
    let db = Database::open(config::database_path()?)?;

    let result_page = client.search(query, page.max(1)).map_err(utils::friendly)?;

    // Results with neither a poster nor a release date are catalog noise
    let results: Vec<_> = result_page
        .results
        .into_iter()
        .filter(|m| !m.is_bare())
        .collect();

    if results.is_empty() {
        return Ok(format!("No results for '{query}'"));
    }

    let mut table = utils::new_table(&["ID", "Title", "Released", "TMDB", "Status"]);
    for movie in &results {
        let local = movies::movie_by_id(db.conn(), movie.id)?;
        table.add_row(vec![
            movie.id.to_string(),
            utils::truncate(&movie.title, 50),
            movie.release_date.clone().unwrap_or_else(|| "-".to_string()),
            movie
                .vote_average
                .map(|v| format!("{v:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            utils::status_label(local.as_ref()),
        ]);
    }

    let mut output = table.to_string();
    output.push_str(&format!(
        "\n\n{} result(s) for '{}' (page {} of {})",
        results.len(),
        query,
        result_page.page,
        result_page.total_pages
    ));

    Ok(output)
}
