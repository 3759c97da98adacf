//! Movie rows: catalog cache plus watchlist / watch-history flags

use rusqlite::{params, Connection, OptionalExtension, Result, Row};

/// A movie as stored locally. `id` is the TMDB id; `watched_at` is a unix
/// timestamp in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub in_watchlist: bool,
    pub is_watched: bool,
    pub user_rating: Option<f32>,
    pub watched_at: Option<i64>,
    pub runtime_minutes: Option<u32>,
    pub vote_average: Option<f32>,
}

const MOVIE_COLUMNS: &str = "id, title, overview, poster_path, release_date, \
     in_watchlist, is_watched, user_rating, watched_at, runtime_minutes, vote_average";

fn movie_from_row(row: &Row) -> Result<Movie> {
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        overview: row.get(2)?,
        poster_path: row.get(3)?,
        release_date: row.get(4)?,
        in_watchlist: row.get::<_, i64>(5)? != 0,
        is_watched: row.get::<_, i64>(6)? != 0,
        user_rating: row.get(7)?,
        watched_at: row.get(8)?,
        runtime_minutes: row.get(9)?,
        vote_average: row.get(10)?,
    })
}

/// Insert or replace a movie row
pub fn upsert_movie(conn: &Connection, movie: &Movie) -> Result<()> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO movies (
            id, title, overview, poster_path, release_date,
            in_watchlist, is_watched, user_rating, watched_at,
            runtime_minutes, vote_average
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            movie.id,
            movie.title,
            movie.overview,
            movie.poster_path,
            movie.release_date,
            movie.in_watchlist as i64,
            movie.is_watched as i64,
            movie.user_rating,
            movie.watched_at,
            movie.runtime_minutes,
            movie.vote_average,
        ],
    )?;
    Ok(())
}

/// Look up a movie by TMDB id
pub fn movie_by_id(conn: &Connection, movie_id: i64) -> Result<Option<Movie>> {
    conn.query_row(
        &format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?1"),
        params![movie_id],
        movie_from_row,
    )
    .optional()
}

/// Watchlist: saved but not yet watched, newest additions first
pub fn watchlist(conn: &Connection) -> Result<Vec<Movie>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies \
         WHERE in_watchlist = 1 AND is_watched = 0 ORDER BY id DESC"
    ))?;
    let movies = stmt.query_map([], movie_from_row)?;
    movies.collect()
}

/// Watch history, most recently watched first
pub fn watched(conn: &Connection) -> Result<Vec<Movie>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MOVIE_COLUMNS} FROM movies WHERE is_watched = 1 ORDER BY watched_at DESC"
    ))?;
    let movies = stmt.query_map([], movie_from_row)?;
    movies.collect()
}

/// Every saved movie
#[allow(dead_code)]
pub fn all_movies(conn: &Connection) -> Result<Vec<Movie>> {
    let mut stmt = conn.prepare(&format!("SELECT {MOVIE_COLUMNS} FROM movies"))?;
    let movies = stmt.query_map([], movie_from_row)?;
    movies.collect()
}

/// Put an existing movie on the watchlist. Returns false if no row exists.
pub fn set_in_watchlist(conn: &Connection, movie_id: i64) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE movies SET in_watchlist = 1 WHERE id = ?1",
        params![movie_id],
    )?;
    Ok(updated > 0)
}

/// Take a movie off the watchlist without touching its watch history
pub fn clear_watchlist_flag(conn: &Connection, movie_id: i64) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE movies SET in_watchlist = 0 WHERE id = ?1",
        params![movie_id],
    )?;
    Ok(updated > 0)
}

/// Mark a movie watched. A watched movie always leaves the watchlist.
pub fn set_watched(conn: &Connection, movie_id: i64, rating: f32, watched_at: i64) -> Result<bool> {
    let updated = conn.execute(
        "UPDATE movies SET is_watched = 1, user_rating = ?2, watched_at = ?3, \
         in_watchlist = 0 WHERE id = ?1",
        params![movie_id, rating, watched_at],
    )?;
    Ok(updated > 0)
}

/// Delete a movie and its tracking state. List entries are removed too.
pub fn delete_movie(conn: &Connection, movie_id: i64) -> Result<bool> {
    // movie_list_entries has no FK on movie_id (the original junction kept
    // the movie side loose), so clear it explicitly.
    conn.execute(
        "DELETE FROM movie_list_entries WHERE movie_id = ?1",
        params![movie_id],
    )?;
    let deleted = conn.execute("DELETE FROM movies WHERE id = ?1", params![movie_id])?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Database;

    fn sample(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: Some(format!("/poster{id}.jpg")),
            release_date: Some("2024-06-01".to_string()),
            in_watchlist: false,
            is_watched: false,
            user_rating: None,
            watched_at: None,
            runtime_minutes: Some(120),
            vote_average: Some(7.5),
        }
    }

    #[test]
    fn test_upsert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let movie = sample(550, "Fight Club");

        upsert_movie(db.conn(), &movie).unwrap();
        let found = movie_by_id(db.conn(), 550).unwrap().unwrap();
        assert_eq!(found, movie);

        assert!(movie_by_id(db.conn(), 999).unwrap().is_none());
    }

    #[test]
    fn test_upsert_replaces() {
        let db = Database::open_in_memory().unwrap();
        upsert_movie(db.conn(), &sample(1, "Old Title")).unwrap();
        upsert_movie(db.conn(), &sample(1, "New Title")).unwrap();

        let found = movie_by_id(db.conn(), 1).unwrap().unwrap();
        assert_eq!(found.title, "New Title");
        assert_eq!(all_movies(db.conn()).unwrap().len(), 1);
    }

    #[test]
    fn test_watchlist_excludes_watched() {
        let db = Database::open_in_memory().unwrap();
        let mut a = sample(1, "A");
        a.in_watchlist = true;
        let mut b = sample(2, "B");
        b.in_watchlist = true;
        upsert_movie(db.conn(), &a).unwrap();
        upsert_movie(db.conn(), &b).unwrap();

        set_watched(db.conn(), 1, 8.0, 1_700_000_000).unwrap();

        let list = watchlist(db.conn()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, 2);
    }

    #[test]
    fn test_watchlist_newest_first() {
        let db = Database::open_in_memory().unwrap();
        for id in [3, 1, 2] {
            let mut m = sample(id, "M");
            m.in_watchlist = true;
            upsert_movie(db.conn(), &m).unwrap();
        }

        let ids: Vec<i64> = watchlist(db.conn()).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_set_watched_clears_watchlist() {
        let db = Database::open_in_memory().unwrap();
        let mut m = sample(7, "Seven");
        m.in_watchlist = true;
        upsert_movie(db.conn(), &m).unwrap();

        assert!(set_watched(db.conn(), 7, 9.0, 1_700_000_000).unwrap());

        let found = movie_by_id(db.conn(), 7).unwrap().unwrap();
        assert!(found.is_watched);
        assert!(!found.in_watchlist);
        assert_eq!(found.user_rating, Some(9.0));
        assert_eq!(found.watched_at, Some(1_700_000_000));
    }

    #[test]
    fn test_set_watched_missing_row() {
        let db = Database::open_in_memory().unwrap();
        assert!(!set_watched(db.conn(), 42, 5.0, 0).unwrap());
    }

    #[test]
    fn test_watched_most_recent_first() {
        let db = Database::open_in_memory().unwrap();
        for (id, ts) in [(1, 100), (2, 300), (3, 200)] {
            upsert_movie(db.conn(), &sample(id, "M")).unwrap();
            set_watched(db.conn(), id, 7.0, ts).unwrap();
        }

        let ids: Vec<i64> = watched(db.conn()).unwrap().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_delete_movie() {
        let db = Database::open_in_memory().unwrap();
        upsert_movie(db.conn(), &sample(5, "Gone")).unwrap();

        assert!(delete_movie(db.conn(), 5).unwrap());
        assert!(movie_by_id(db.conn(), 5).unwrap().is_none());
        assert!(!delete_movie(db.conn(), 5).unwrap());
    }

    #[test]
    fn test_watchlist_flag_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        upsert_movie(db.conn(), &sample(9, "Nine")).unwrap();

        assert!(set_in_watchlist(db.conn(), 9).unwrap());
        assert!(movie_by_id(db.conn(), 9).unwrap().unwrap().in_watchlist);

        assert!(clear_watchlist_flag(db.conn(), 9).unwrap());
        assert!(!movie_by_id(db.conn(), 9).unwrap().unwrap().in_watchlist);

        assert!(!set_in_watchlist(db.conn(), 999).unwrap());
    }
}
