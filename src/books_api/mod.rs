use async_trait::async_trait;

use crate::domain::models::Book;

/// Catalog pages are fixed at ten entries, mirroring the service's `_limit`.
pub const PAGE_SIZE: i64 = 10;

/// Transport seam for the books REST service. The store only sees this trait,
/// so its transitions can be exercised against a stub transport.
#[async_trait]
pub trait BooksApi: Send + Sync {
    async fn list_books(&self, page: i64, query: Option<&str>) -> anyhow::Result<Vec<Book>>;
    async fn get_book(&self, book_id: i64) -> anyhow::Result<Book>;
    async fn add_favorite(&self, book: &Book) -> anyhow::Result<Book>;
    async fn remove_favorite(&self, book_id: i64) -> anyhow::Result<()>;
    async fn list_favorites(&self) -> anyhow::Result<Vec<Book>>;
}

#[derive(Clone, Debug)]
pub struct BooksClient {
    base_url: String,
    client: reqwest::Client,
}

impl BooksClient {
    /// Create a new client with the given base URL (e.g. "http://localhost:5000").
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().build()?;
        let base_url_str = base_url.into();
        tracing::debug!(base_url = %base_url_str, "creating BooksClient");
        Ok(BooksClient {
            base_url: base_url_str.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Public URL for a book's cover image, joined onto the API host. This does
    /// not perform a request; records without an `imageLink` have no cover.
    pub fn image_url(&self, book: &Book) -> Option<String> {
        book.image_link.as_deref().map(|link| self.url(link))
    }

    /// GET /books?_page={n}&_limit=10[&q={query}]
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_books(&self, page: i64, query: Option<&str>) -> anyhow::Result<Vec<Book>> {
        let url = self.url("/books");
        tracing::debug!(%url, page, query = query.unwrap_or(""), "GET books page");
        let mut q: Vec<(String, String)> = vec![
            ("_page".into(), page.to_string()),
            ("_limit".into(), PAGE_SIZE.to_string()),
        ];
        if let Some(text) = query.filter(|t| !t.is_empty()) {
            q.push(("q".into(), text.to_string()));
        }
        let resp = self.client.get(&url).query(&q).send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        match serde_json::from_str::<Vec<Book>>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                let snippet_len = body.len().min(2000);
                let snippet = &body[..snippet_len];
                tracing::error!(error = %e, body_snippet = %snippet, "failed to parse books page");
                Err(e.into())
            }
        }
    }

    /// GET /books/{id}
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_book(&self, book_id: i64) -> anyhow::Result<Book> {
        let url = self.url(&format!("/books/{}", book_id));
        tracing::debug!(%url, "GET book");
        let resp = self.client.get(&url).send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        let parsed: Book = serde_json::from_str(&body)?;
        Ok(parsed)
    }

    /// POST /favorites with the book as JSON body; returns the created record.
    #[tracing::instrument(level = "debug", skip(self, book), fields(book_id = book.id))]
    pub async fn add_favorite(&self, book: &Book) -> anyhow::Result<Book> {
        let url = self.url("/favorites");
        tracing::debug!(%url, book_id = book.id, "POST favorite");
        let resp = self.client.post(&url).json(book).send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        let parsed: Book = serde_json::from_str(&body)?;
        Ok(parsed)
    }

    /// DELETE /favorites/{id}; the response body is not required.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove_favorite(&self, book_id: i64) -> anyhow::Result<()> {
        let url = self.url(&format!("/favorites/{}", book_id));
        tracing::debug!(%url, "DELETE favorite");
        let resp = self.client.delete(&url).send().await?;
        resp.error_for_status()?;
        Ok(())
    }

    /// GET /favorites
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list_favorites(&self) -> anyhow::Result<Vec<Book>> {
        let url = self.url("/favorites");
        tracing::debug!(%url, "GET favorites");
        let resp = self.client.get(&url).send().await?;
        let status = resp.error_for_status()?;
        let body = status.text().await?;
        match serde_json::from_str::<Vec<Book>>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                let snippet_len = body.len().min(2000);
                let snippet = &body[..snippet_len];
                tracing::error!(error = %e, body_snippet = %snippet, "failed to parse favorites");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl BooksApi for BooksClient {
    async fn list_books(&self, page: i64, query: Option<&str>) -> anyhow::Result<Vec<Book>> {
        BooksClient::list_books(self, page, query).await
    }

    async fn get_book(&self, book_id: i64) -> anyhow::Result<Book> {
        BooksClient::get_book(self, book_id).await
    }

    async fn add_favorite(&self, book: &Book) -> anyhow::Result<Book> {
        BooksClient::add_favorite(self, book).await
    }

    async fn remove_favorite(&self, book_id: i64) -> anyhow::Result<()> {
        BooksClient::remove_favorite(self, book_id).await
    }

    async fn list_favorites(&self) -> anyhow::Result<Vec<Book>> {
        BooksClient::list_favorites(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book_with_cover(link: Option<&str>) -> Book {
        Book {
            id: 21,
            title: "The Idiot".to_string(),
            author: Some("Fyodor Dostoevsky".to_string()),
            year: Some(1869),
            country: Some("Russia".to_string()),
            pages: Some(656),
            language: Some("Russian".to_string()),
            image_link: link.map(|l| l.to_string()),
        }
    }

    #[test]
    fn build_image_url_basic() {
        let c = BooksClient::new("http://localhost:5000/").unwrap();
        let url = c.image_url(&book_with_cover(Some("images/the-idiot.jpg")));
        assert_eq!(
            url.as_deref(),
            Some("http://localhost:5000/images/the-idiot.jpg")
        );
    }

    #[test]
    fn image_url_absent_without_link() {
        let c = BooksClient::new("http://localhost:5000").unwrap();
        assert_eq!(c.image_url(&book_with_cover(None)), None);
    }

    #[test]
    fn books_page_deserialize_example() {
        let json = r#"[
            {
                "id": 1,
                "title": "Things Fall Apart",
                "author": "Chinua Achebe",
                "country": "Nigeria",
                "imageLink": "images/things-fall-apart.jpg",
                "language": "English",
                "pages": 209,
                "year": 1958
            },
            {
                "id": 2,
                "title": "Fairy tales",
                "author": "Hans Christian Andersen",
                "country": "Denmark",
                "imageLink": "images/fairy-tales.jpg",
                "language": "Danish",
                "pages": 784,
                "year": 1836
            }
        ]"#;
        let parsed: Vec<Book> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].title, "Things Fall Apart");
        assert_eq!(parsed[1].author.as_deref(), Some("Hans Christian Andersen"));
    }
}
