//! TMDB API client
//!
//! Thin typed wrapper over the TMDB v3 REST endpoints the tracker uses:
//! the four browse categories, search, and per-movie details. All requests
//! authenticate with a bearer read-access token.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::models::{MovieDetails, MoviePage};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Connect/read timeout, matching the original client configuration
const TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB client errors
#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("network error: {0}")]
    Network(String),

    #[error("TMDB API error {0}: {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// A browse category on the movie catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Popular,
    Upcoming,
    TopRated,
    NowPlaying,
}

impl Category {
    /// Parse a CLI category name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(Self::Popular),
            "upcoming" => Some(Self::Upcoming),
            "top-rated" => Some(Self::TopRated),
            "now-playing" => Some(Self::NowPlaying),
            _ => None,
        }
    }

    /// Endpoint path under /movie/
    fn path(self) -> &'static str {
        match self {
            Self::Popular => "movie/popular",
            Self::Upcoming => "movie/upcoming",
            Self::TopRated => "movie/top_rated",
            Self::NowPlaying => "movie/now_playing",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Popular => write!(f, "Popular"),
            Self::Upcoming => write!(f, "Upcoming"),
            Self::TopRated => write!(f, "Top Rated"),
            Self::NowPlaying => write!(f, "Now Playing"),
        }
    }
}

/// TMDB API client
pub struct TmdbClient {
    http: Client,
    token: String,
}

impl TmdbClient {
    pub fn new(token: String) -> Result<Self, TmdbError> {
        let http = Client::builder()
            .connect_timeout(TIMEOUT)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        Ok(Self { http, token })
    }

    /// Fetch one page of a browse category
    pub fn category_page(&self, category: Category, page: u32) -> Result<MoviePage, TmdbError> {
        self.get_json(category.path(), &[("page", &page.to_string())])
    }

    /// Search the catalog
    pub fn search(&self, query: &str, page: u32) -> Result<MoviePage, TmdbError> {
        self.get_json(
            "search/movie",
            &[("query", query), ("page", &page.to_string())],
        )
    }

    /// Fetch full details for one movie
    pub fn details(&self, movie_id: i64) -> Result<MovieDetails, TmdbError> {
        self.get_json(&format!("movie/{movie_id}"), &[])
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TmdbError> {
        let mut url = Url::parse(&format!("{TMDB_BASE_URL}/{path}"))
            .map_err(|e| TmdbError::Parse(e.to_string()))?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(%url, "TMDB request");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("accept", "application/json")
            .send()
            .map_err(|e| TmdbError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "TMDB request failed");
            return Err(TmdbError::Api(status.as_u16(), truncate_body(&body)));
        }

        response
            .json::<T>()
            .map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

/// Keep error bodies short enough for a terminal line
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(MAX);
        format!("{}...", &trimmed[..cut])
    }
}
