use std::fmt::Write;

use crate::store::CatalogState;

/// Render the book detail page. `image_url` is the resolved public cover URL,
/// if the record carries one.
pub fn render(state: &CatalogState, image_url: Option<String>) -> String {
    let mut out = String::new();
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {error}");
    }
    let Some(book) = &state.book else {
        out.push_str("(no book loaded)\n");
        return out;
    };
    let _ = writeln!(out, "{}", book.title);
    let _ = writeln!(out, "{}", "-".repeat(book.title.len()));
    let _ = writeln!(out, "Author:   {}", book.author.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Year:     {}", display_i64(book.year));
    let _ = writeln!(out, "Country:  {}", book.country.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Pages:    {}", display_i64(book.pages));
    let _ = writeln!(out, "Language: {}", book.language.as_deref().unwrap_or("-"));
    if let Some(url) = image_url {
        let _ = writeln!(out, "Cover:    {url}");
    }
    out
}

fn display_i64(value: Option<i64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}
