use std::fmt::Write;

use crate::store::CatalogState;

/// Render the saved reading list.
pub fn render(state: &CatalogState) -> String {
    let mut out = String::new();
    out.push_str("Reading List\n");
    out.push_str("============\n");
    if let Some(error) = &state.error {
        let _ = writeln!(out, "error: {error}");
        return out;
    }
    if state.reading_list.is_empty() {
        out.push_str("(empty)\n");
        return out;
    }
    for book in &state.reading_list {
        let author = book.author.as_deref().unwrap_or("unknown");
        let _ = writeln!(out, "{:>4}  {} by {}", book.id, book.title, author);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::Book;

    #[test]
    fn renders_saved_books() {
        let state = CatalogState {
            reading_list: vec![Book {
                id: 3,
                title: "Beloved".to_string(),
                author: Some("Toni Morrison".to_string()),
                year: Some(1987),
                country: None,
                pages: None,
                language: None,
                image_link: None,
            }],
            ..Default::default()
        };
        let page = render(&state);
        assert!(page.contains("Reading List"));
        assert!(page.contains("   3  Beloved by Toni Morrison"));
    }

    #[test]
    fn renders_empty_notice() {
        let page = render(&CatalogState::default());
        assert!(page.contains("(empty)"));
    }

    #[test]
    fn error_replaces_listing() {
        let state = CatalogState {
            error: Some("boom".to_string()),
            ..Default::default()
        };
        let page = render(&state);
        assert!(page.contains("error: boom"));
        assert!(!page.contains("(empty)"));
    }
}
