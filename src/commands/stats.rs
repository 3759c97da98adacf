//! Stats command - Watch statistics and the monthly calendar heatmap

use anyhow::{Context, Result};
use chrono::Datelike;
use owo_colors::OwoColorize;

use super::utils;
use crate::config;
use crate::stats::{Month, WatchStats};
use crate::store::{movies, Database};

/// Execute the stats command and return formatted output
pub fn execute(month: Option<&str>) -> Result<String> {
    let month = match month {
        Some(s) => Month::parse(s).with_context(|| format!("Invalid month '{s}'. Use YYYY-MM"))?,
        None => Month::current(),
    };

    let db = Database::open(config::database_path()?)?;
    let watched = movies::watched(db.conn())?;
    let stats = WatchStats::compute(&watched, month);

    Ok(format_stats(&stats, month))
}

/// Format the stats report
fn format_stats(stats: &WatchStats, month: Month) -> String {
    let mut lines = vec![];

    lines.push(format!("Watched: {} movie(s)", stats.watched_count));
    lines.push(format!(
        "Time watched: {}",
        utils::format_minutes(stats.total_minutes)
    ));
    lines.push(String::new());

    lines.push(format!(
        "{} — {} watched",
        stats.month_label.bold(),
        stats.watched_in_month.len()
    ));
    lines.push(format_heatmap(month, &stats.heatmap));

    if !stats.favorites.is_empty() {
        lines.push(String::new());
        lines.push("Favorites".bold().to_string());
        let mut table = utils::new_table(&["Title", "Rating"]);
        for movie in &stats.favorites {
            table.add_row(vec![
                utils::truncate(&movie.title, 50),
                utils::format_rating(movie.user_rating),
            ]);
        }
        lines.push(table.to_string());
    }

    if !stats.recent.is_empty() {
        lines.push(String::new());
        lines.push("Recently watched".bold().to_string());
        let mut table = utils::new_table(&["Title", "Watched on"]);
        for movie in &stats.recent {
            table.add_row(vec![
                utils::truncate(&movie.title, 50),
                movie
                    .watched_at
                    .map(utils::format_watch_date)
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        lines.push(table.to_string());
    }

    lines.join("\n")
}

/// Shade character for a per-day watch count
fn shade(count: u32) -> &'static str {
    match count {
        0 => "··",
        1 => "░░",
        2 => "▒▒",
        3 => "▓▓",
        _ => "██",
    }
}

/// Render the month as a Monday-first calendar grid of shaded cells
fn format_heatmap(month: Month, heatmap: &[u32]) -> String {
    let mut lines = vec!["Mo Tu We Th Fr Sa Su".to_string()];

    let offset = month.first_day().weekday().num_days_from_monday() as usize;
    let mut row: Vec<&str> = vec!["  "; offset];

    for &count in heatmap {
        row.push(shade(count));
        if row.len() == 7 {
            lines.push(row.join(" "));
            row.clear();
        }
    }
    if !row.is_empty() {
        lines.push(row.join(" "));
    }

    lines.push("·· 0  ░░ 1  ▒▒ 2  ▓▓ 3  ██ 4+".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_levels() {
        assert_eq!(shade(0), "··");
        assert_eq!(shade(1), "░░");
        assert_eq!(shade(2), "▒▒");
        assert_eq!(shade(3), "▓▓");
        assert_eq!(shade(4), "██");
        assert_eq!(shade(17), "██");
    }

    #[test]
    fn test_heatmap_grid_shape() {
        // March 2026 starts on a Sunday: 6 leading blanks, 31 days
        let month = Month {
            year: 2026,
            month: 3,
        };
        let heatmap = vec![0u32; 31];
        let rendered = format_heatmap(month, &heatmap);
        let lines: Vec<&str> = rendered.lines().collect();

        // header + 6 week rows + legend
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Mo Tu We Th Fr Sa Su");
        // First row: six blank cells then day 1
        assert_eq!(lines[1], format!("{}··", " ".repeat(18)));
        // Full middle week
        assert_eq!(lines[2], "·· ·· ·· ·· ·· ·· ··");
    }

    #[test]
    fn test_heatmap_marks_counts() {
        // June 2026 starts on a Monday
        let month = Month {
            year: 2026,
            month: 6,
        };
        let mut heatmap = vec![0u32; 30];
        heatmap[0] = 1;
        heatmap[1] = 4;
        let rendered = format_heatmap(month, &heatmap);
        let first_week = rendered.lines().nth(1).unwrap();
        assert!(first_week.starts_with("░░ ██ ··"));
    }

    #[test]
    fn test_format_stats_empty() {
        let month = Month {
            year: 2026,
            month: 2,
        };
        let stats = WatchStats {
            month_label: month.label(),
            heatmap: vec![0; 28],
            ..Default::default()
        };

        let rendered = format_stats(&stats, month);
        assert!(rendered.contains("Watched: 0 movie(s)"));
        assert!(rendered.contains("Time watched: 0m"));
        assert!(!rendered.contains("Favorites"));
        assert!(!rendered.contains("Recently watched"));
    }
}
