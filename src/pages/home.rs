use std::fmt::Write;

use crate::store::CatalogState;

/// Render the catalog listing from a state snapshot.
pub fn render(state: &CatalogState, page: i64, query: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("Book Store\n");
    out.push_str("==========\n");
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {error}");
    } else if state.books.is_empty() {
        out.push_str("(no books on this page)\n");
    }
    for book in &state.books {
        let author = book.author.as_deref().unwrap_or("unknown");
        match book.year {
            Some(year) => {
                let _ = writeln!(out, "{:>4}  {} by {} ({})", book.id, book.title, author, year);
            }
            None => {
                let _ = writeln!(out, "{:>4}  {} by {}", book.id, book.title, author);
            }
        }
    }
    match query.filter(|q| !q.is_empty()) {
        Some(q) => {
            let _ = writeln!(out, "-- page {page}, search \"{q}\"");
        }
        None => {
            let _ = writeln!(out, "-- page {page}");
        }
    }
    out
}
