//! TMDB catalog API

pub mod client;
pub mod models;

pub use client::{Category, TmdbClient, TmdbError};
// Re-exports for library consumers
#[allow(unused_imports)]
pub use models::{MovieDetails, MoviePage, MovieSummary};
