//! Browse command - Page through a catalog category

use anyhow::{Context, Result};

use super::utils;
use crate::config;
use crate::store::{movies, Database};
use crate::tmdb::{Category, TmdbClient};

/// Options for the browse command
pub struct BrowseOptions {
    /// Category: popular, upcoming, top-rated, now-playing
    pub category: String,
    /// Catalog page (1-based)
    pub page: u32,
    /// Limit number of results
    pub limit: Option<usize>,
}

/// Execute the browse command and return formatted output
pub fn execute(options: BrowseOptions) -> Result<String> {
    let category = Category::parse(&options.category).with_context(|| {
        format!(
            "Unknown category '{}'. Use popular, upcoming, top-rated or now-playing",
            options.category
        )
    })?;

    let client = TmdbClient::new(config::api_token()?)?;
    let db = Database::open(config::database_path()?)?;

    let page = client
        .category_page(category, options.page.max(1))
        .map_err(utils::friendly)?;

    let mut results = page.results;
    let total_count = results.len();
    if let Some(n) = options.limit {
        results.truncate(n);
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
    if results.len() < total_count {
        output.push_str(&format!(
            "\n\n{} — showing {} of {} (page {} of {})",
            category,
            results.len(),
            total_count,
            page.page,
            page.total_pages
        ));
    } else {
        output.push_str(&format!(
            "\n\n{} — page {} of {}",
            category, page.page, page.total_pages
        ));
    }

    Ok(output)
}
