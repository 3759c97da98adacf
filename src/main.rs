//! movilog: CLI movie tracker backed by the TMDB catalog
//!
//! Browse and search the catalog, keep a watchlist, log watched movies
//! with ratings, group them into custom lists and look at your stats.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod stats;
mod store;
mod tmdb;

#[derive(Parser)]
#[command(name = "movilog")]
#[command(about = "CLI movie tracker backed by the TMDB catalog", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a catalog category
    Browse {
        /// Category: popular, upcoming, top-rated, now-playing
        #[arg(default_value = "popular")]
        category: String,

        /// Catalog page to fetch
        #[arg(long, short, default_value_t = 1)]
        page: u32,

        /// Limit number of results
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Search the catalog by title
    Search {
        /// Search query (at least 2 characters)
        query: String,

        /// Catalog page to fetch
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },

    /// Show one movie: catalog details plus your tracking state
    Show {
        /// TMDB movie id
        movie_id: i64,
    },

    /// Your watchlist
    Watchlist {
        #[command(subcommand)]
        action: Option<WatchlistAction>,
    },

    /// Mark a movie as watched
    Watch {
        /// TMDB movie id
        movie_id: i64,

        /// Your rating, 1-10
        #[arg(long, short)]
        rating: u8,

        /// Watch date as YYYY-MM-DD (default: today)
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Your watch history
    Watched {
        /// Narrow to one month (YYYY-MM)
        #[arg(long, short)]
        month: Option<String>,
    },

    /// Custom movie lists
    Lists {
        #[command(subcommand)]
        action: Option<ListsAction>,
    },

    /// Delete a movie and all its tracking state
    Delete {
        /// TMDB movie id
        movie_id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Watch statistics and the monthly heatmap
    Stats {
        /// Month to inspect (YYYY-MM, default: current)
        #[arg(long, short)]
        month: Option<String>,
    },
}

#[derive(Subcommand)]
enum WatchlistAction {
    /// Add a movie to the watchlist
    Add {
        /// TMDB movie id
        movie_id: i64,
    },

    /// Remove a movie from the watchlist (keeps its watch history)
    Remove {
        /// TMDB movie id
        movie_id: i64,
    },
}

#[derive(Subcommand)]
enum ListsAction {
    /// Create a new list
    Create {
        /// List name
        name: String,
    },

    /// Show the movies in a list
    Show {
        /// List name
        name: String,
    },

    /// Add a movie to a list
    Add {
        /// List name
        name: String,

        /// TMDB movie id
        movie_id: i64,
    },

    /// Remove a movie from a list
    Remove {
        /// List name
        name: String,

        /// TMDB movie id
        movie_id: i64,
    },

    /// Delete a list (movies stay saved)
    Delete {
        /// List name
        name: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Browse {
            category,
            page,
            limit,
        } => {
            let options = commands::browse::BrowseOptions {
                category,
                page,
                limit,
            };
            let output = commands::browse::execute(options)?;
            println!("{}", output);
        }

        Commands::Search { query, page } => {
            let output = commands::search::execute(&query, page)?;
            println!("{}", output);
        }

        Commands::Show { movie_id } => {
            commands::show::execute(movie_id)?;
        }

        Commands::Watchlist { action } => match action {
            None => {
                let output = commands::watchlist::execute_list()?;
                println!("{}", output);
            }
            Some(WatchlistAction::Add { movie_id }) => {
                commands::watchlist::execute_add(movie_id)?;
            }
            Some(WatchlistAction::Remove { movie_id }) => {
                commands::watchlist::execute_remove(movie_id)?;
            }
        },

        Commands::Watch {
            movie_id,
            rating,
            date,
        } => {
            let options = commands::watch::WatchOptions {
                movie_id,
                rating,
                date,
            };
            commands::watch::execute(options)?;
        }

        Commands::Watched { month } => {
            let output = commands::watched::execute(month.as_deref())?;
            println!("{}", output);
        }

        Commands::Lists { action } => match action {
            None => {
                let output = commands::lists::execute_overview()?;
                println!("{}", output);
            }
            Some(ListsAction::Create { name }) => {
                commands::lists::execute_create(&name)?;
            }
            Some(ListsAction::Show { name }) => {
                let output = commands::lists::execute_show(&name)?;
                println!("{}", output);
            }
            Some(ListsAction::Add { name, movie_id }) => {
                commands::lists::execute_add(&name, movie_id)?;
            }
            Some(ListsAction::Remove { name, movie_id }) => {
                commands::lists::execute_remove(&name, movie_id)?;
            }
            Some(ListsAction::Delete { name, yes }) => {
                commands::lists::execute_delete(&name, yes)?;
            }
        },

        Commands::Delete { movie_id, yes } => {
            commands::delete::execute(movie_id, yes)?;
        }

        Commands::Stats { month } => {
            let output = commands::stats::execute(month.as_deref())?;
            println!("{}", output);
        }
    }

    Ok(())
}
