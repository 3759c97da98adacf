//! Custom lists: user-named many-to-many groupings of movies

use rusqlite::{params, Connection, OptionalExtension, Result};

use super::movies::Movie;

/// A user-created list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomList {
    pub list_id: i64,
    pub list_name: String,
}

/// A list together with how many movies it holds
#[derive(Debug, Clone)]
pub struct ListSummary {
    pub list: CustomList,
    pub movie_count: usize,
}

/// Create a list, or return the existing one with the same name
pub fn create_list(conn: &Connection, name: &str) -> Result<CustomList> {
    conn.execute(
        "INSERT OR IGNORE INTO custom_lists (list_name) VALUES (?1)",
        params![name],
    )?;

    conn.query_row(
        "SELECT list_id, list_name FROM custom_lists WHERE list_name = ?1",
        params![name],
        |row| {
            Ok(CustomList {
                list_id: row.get(0)?,
                list_name: row.get(1)?,
            })
        },
    )
}

/// Look up a list by name
pub fn list_by_name(conn: &Connection, name: &str) -> Result<Option<CustomList>> {
    conn.query_row(
        "SELECT list_id, list_name FROM custom_lists WHERE list_name = ?1",
        params![name],
        |row| {
            Ok(CustomList {
                list_id: row.get(0)?,
                list_name: row.get(1)?,
            })
        },
    )
    .optional()
}

/// All lists with their movie counts, alphabetical
pub fn all_lists(conn: &Connection) -> Result<Vec<ListSummary>> {
    let mut stmt = conn.prepare(
        "SELECT l.list_id, l.list_name, COUNT(e.movie_id) \
         FROM custom_lists l \
         LEFT JOIN movie_list_entries e ON l.list_id = e.list_id \
         GROUP BY l.list_id \
         ORDER BY l.list_name",
    )?;

    let summaries = stmt.query_map([], |row| {
        Ok(ListSummary {
            list: CustomList {
                list_id: row.get(0)?,
                list_name: row.get(1)?,
            },
            movie_count: row.get::<_, i64>(2)? as usize,
        })
    })?;
    summaries.collect()
}

/// Add a movie to a list. The movie row must already exist in the store.
pub fn add_movie_to_list(conn: &Connection, list_id: i64, movie_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO movie_list_entries (list_id, movie_id) VALUES (?1, ?2)",
        params![list_id, movie_id],
    )?;
    Ok(())
}

/// All movies in a list, in the watchlist's newest-first order
pub fn movies_in_list(conn: &Connection, list_id: i64) -> Result<Vec<Movie>> {
    let mut stmt = conn.prepare(
        "SELECT m.id, m.title, m.overview, m.poster_path, m.release_date, \
                m.in_watchlist, m.is_watched, m.user_rating, m.watched_at, \
                m.runtime_minutes, m.vote_average \
         FROM movies m \
         JOIN movie_list_entries e ON m.id = e.movie_id \
         WHERE e.list_id = ?1 \
         ORDER BY m.id DESC",
    )?;

    let movies = stmt.query_map(params![list_id], |row| {
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
    })?;
    movies.collect()
}

/// Names of the lists containing a movie
pub fn lists_containing(conn: &Connection, movie_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT l.list_name FROM custom_lists l \
         JOIN movie_list_entries e ON l.list_id = e.list_id \
         WHERE e.movie_id = ?1 ORDER BY l.list_name",
    )?;
    let names = stmt.query_map(params![movie_id], |row| row.get(0))?;
    names.collect()
}

/// Remove a movie from a list. Returns false if it wasn't in the list.
pub fn remove_movie_from_list(conn: &Connection, list_id: i64, movie_id: i64) -> Result<bool> {
    let removed = conn.execute(
        "DELETE FROM movie_list_entries WHERE list_id = ?1 AND movie_id = ?2",
        params![list_id, movie_id],
    )?;
    Ok(removed > 0)
}

/// Delete a list and all its entries in one transaction
pub fn delete_list(conn: &Connection, list_id: i64) -> Result<bool> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "DELETE FROM movie_list_entries WHERE list_id = ?1",
        params![list_id],
    )?;
    let deleted = tx.execute(
        "DELETE FROM custom_lists WHERE list_id = ?1",
        params![list_id],
    )?;
    tx.commit()?;
    Ok(deleted > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::movies::upsert_movie;
    use crate::store::Database;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: None,
            in_watchlist: false,
            is_watched: false,
            user_rating: None,
            watched_at: None,
            runtime_minutes: None,
            vote_average: None,
        }
    }

    #[test]
    fn test_create_list_is_idempotent() {
        let db = Database::open_in_memory().unwrap();

        let first = create_list(db.conn(), "Old but Gold").unwrap();
        let second = create_list(db.conn(), "Old but Gold").unwrap();
        assert_eq!(first, second);

        let other = create_list(db.conn(), "Halloween").unwrap();
        assert_ne!(first.list_id, other.list_id);
        assert_eq!(all_lists(db.conn()).unwrap().len(), 2);
    }

    #[test]
    fn test_list_by_name() {
        let db = Database::open_in_memory().unwrap();
        create_list(db.conn(), "Noir").unwrap();

        assert!(list_by_name(db.conn(), "Noir").unwrap().is_some());
        assert!(list_by_name(db.conn(), "noir").unwrap().is_none());
    }

    #[test]
    fn test_membership_roundtrip() {
        let db = Database::open_in_memory().unwrap();
        let list = create_list(db.conn(), "Favorites").unwrap();
        upsert_movie(db.conn(), &movie(10, "Ten")).unwrap();
        upsert_movie(db.conn(), &movie(20, "Twenty")).unwrap();

        add_movie_to_list(db.conn(), list.list_id, 10).unwrap();
        add_movie_to_list(db.conn(), list.list_id, 20).unwrap();
        // Adding twice is a no-op
        add_movie_to_list(db.conn(), list.list_id, 10).unwrap();

        let ids: Vec<i64> = movies_in_list(db.conn(), list.list_id)
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![20, 10]);

        assert!(remove_movie_from_list(db.conn(), list.list_id, 10).unwrap());
        assert!(!remove_movie_from_list(db.conn(), list.list_id, 10).unwrap());
        assert_eq!(movies_in_list(db.conn(), list.list_id).unwrap().len(), 1);
    }

    #[test]
    fn test_movie_in_multiple_lists() {
        let db = Database::open_in_memory().unwrap();
        let a = create_list(db.conn(), "A").unwrap();
        let b = create_list(db.conn(), "B").unwrap();
        upsert_movie(db.conn(), &movie(1, "One")).unwrap();

        add_movie_to_list(db.conn(), a.list_id, 1).unwrap();
        add_movie_to_list(db.conn(), b.list_id, 1).unwrap();

        assert_eq!(lists_containing(db.conn(), 1).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_counts() {
        let db = Database::open_in_memory().unwrap();
        let list = create_list(db.conn(), "Counted").unwrap();
        create_list(db.conn(), "Empty").unwrap();
        upsert_movie(db.conn(), &movie(1, "One")).unwrap();
        add_movie_to_list(db.conn(), list.list_id, 1).unwrap();

        let summaries = all_lists(db.conn()).unwrap();
        let counted = summaries
            .iter()
            .find(|s| s.list.list_name == "Counted")
            .unwrap();
        let empty = summaries
            .iter()
            .find(|s| s.list.list_name == "Empty")
            .unwrap();
        assert_eq!(counted.movie_count, 1);
        assert_eq!(empty.movie_count, 0);
    }

    #[test]
    fn test_delete_list_removes_entries() {
        let db = Database::open_in_memory().unwrap();
        let list = create_list(db.conn(), "Doomed").unwrap();
        upsert_movie(db.conn(), &movie(1, "One")).unwrap();
        add_movie_to_list(db.conn(), list.list_id, 1).unwrap();

        assert!(delete_list(db.conn(), list.list_id).unwrap());
        assert!(list_by_name(db.conn(), "Doomed").unwrap().is_none());

        let orphans: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM movie_list_entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(orphans, 0);

        // Movie itself survives list deletion
        assert_eq!(
            crate::store::movies::all_movies(db.conn()).unwrap().len(),
            1
        );

        assert!(!delete_list(db.conn(), list.list_id).unwrap());
    }
}
