//! TMDB response types

use serde::Deserialize;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Compose a TMDB image URL from a size segment and an image path
fn image_url(size: &str, path: &str) -> String {
    format!("{IMAGE_BASE_URL}/{size}{path}")
}

/// One movie as returned in a catalog page or search result
#[derive(Debug, Clone, Deserialize)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f32>,
}

impl MovieSummary {
    /// True when the result has neither a poster nor a release date.
    /// Search results like this are catalog noise and get filtered out.
    pub fn is_bare(&self) -> bool {
        let no_poster = self.poster_path.as_deref().is_none_or(str::is_empty);
        let no_date = self.release_date.as_deref().is_none_or(str::is_empty);
        no_poster && no_date
    }
}

/// A page of movie summaries
#[derive(Debug, Clone, Deserialize)]
pub struct MoviePage {
    #[serde(default = "default_page")]
    pub page: u32,
    pub results: Vec<MovieSummary>,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

/// Full movie details from `GET /movie/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    /// Runtime in minutes
    pub runtime: Option<u32>,
    pub vote_average: Option<f32>,
    pub vote_count: Option<u32>,
}

impl MovieDetails {
    /// Poster URL (w342), if the catalog has one
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(|p| image_url("w342", p))
    }

    /// Backdrop URL (w780), if the catalog has one
    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path.as_deref().map(|p| image_url("w780", p))
    }
}
