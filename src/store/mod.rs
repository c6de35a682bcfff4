// Catalog state and the only legal transitions over it. Each operation makes
// exactly one API call; completions are applied under the state lock and the
// lock is never held across an await.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::books_api::BooksApi;
use crate::domain::models::Book;

/// UI-relevant catalog state. `reading_list` is a distinct field, never an
/// alias for `books`, and holds each book id at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
    pub books: Vec<Book>,
    pub book: Option<Book>,
    pub reading_list: Vec<Book>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Whether a list/detail completion reached the state, or was discarded
/// because a newer fetch of the same family started in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Superseded,
}

/// The one authoritative state container for catalog data. Constructed with an
/// injected transport; there is no global instance.
pub struct CatalogStore {
    api: Arc<dyn BooksApi>,
    state: Mutex<CatalogState>,
    page_generation: AtomicU64,
    detail_generation: AtomicU64,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn BooksApi>) -> Self {
        CatalogStore {
            api,
            state: Mutex::new(CatalogState::default()),
            page_generation: AtomicU64::new(0),
            detail_generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CatalogState {
        self.state.lock().clone()
    }

    // Every operation starts the same way: mark the store busy and clear any
    // previous error.
    fn begin(&self) {
        let mut state = self.state.lock();
        state.loading = true;
        state.error = None;
    }

    // Start a guarded fetch: the returned ticket must still be the newest of
    // its family when the completion is applied. Incrementing under the state
    // lock keeps ticket order consistent with transition order.
    fn begin_fetch(&self, family: &AtomicU64) -> u64 {
        let mut state = self.state.lock();
        state.loading = true;
        state.error = None;
        family.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Fetch one catalog page, optionally filtered by a search query. A newer
    /// `fetch_page` supersedes an older in-flight one; the stale completion is
    /// discarded instead of overwriting fresher results.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_page(&self, page: i64, query: Option<&str>) -> FetchOutcome {
        let ticket = self.begin_fetch(&self.page_generation);
        let result = self.api.list_books(page, query).await;
        self.finish_page(ticket, result)
    }

    fn finish_page(&self, ticket: u64, result: anyhow::Result<Vec<Book>>) -> FetchOutcome {
        let mut state = self.state.lock();
        if self.page_generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding superseded page fetch");
            return FetchOutcome::Superseded;
        }
        state.loading = false;
        match result {
            Ok(books) => state.books = books,
            Err(e) => state.error = Some(format!("{e:#}")),
        }
        FetchOutcome::Applied
    }

    /// Fetch a single book into the detail slot. Guarded by its own family
    /// counter, independent of page fetches.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_detail(&self, book_id: i64) -> FetchOutcome {
        let ticket = self.begin_fetch(&self.detail_generation);
        let result = self.api.get_book(book_id).await;
        self.finish_detail(ticket, result)
    }

    fn finish_detail(&self, ticket: u64, result: anyhow::Result<Book>) -> FetchOutcome {
        let mut state = self.state.lock();
        if self.detail_generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding superseded detail fetch");
            return FetchOutcome::Superseded;
        }
        state.loading = false;
        match result {
            Ok(book) => state.book = Some(book),
            Err(e) => state.error = Some(format!("{e:#}")),
        }
        FetchOutcome::Applied
    }

    /// Persist the book as a favorite and track it in the reading list. The id
    /// is appended at most once even if the service accepts duplicates.
    #[tracing::instrument(level = "debug", skip(self, book), fields(book_id = book.id))]
    pub async fn add_favorite(&self, book: Book) -> anyhow::Result<()> {
        self.begin();
        let result = self.api.add_favorite(&book).await;
        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(saved) => {
                if !state.reading_list.iter().any(|b| b.id == saved.id) {
                    state.reading_list.push(saved);
                }
                Ok(())
            }
            Err(e) => {
                state.error = Some(format!("{e:#}"));
                Err(e)
            }
        }
    }

    /// Delete the favorite remotely and drop it from the reading list.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove_favorite(&self, book_id: i64) -> anyhow::Result<()> {
        self.begin();
        let result = self.api.remove_favorite(book_id).await;
        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(()) => {
                state.reading_list.retain(|b| b.id != book_id);
                Ok(())
            }
            Err(e) => {
                state.error = Some(format!("{e:#}"));
                Err(e)
            }
        }
    }

    /// Replace the reading list with the server's current favorites.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn fetch_favorites(&self) -> anyhow::Result<()> {
        self.begin();
        let result = self.api.list_favorites().await;
        let mut state = self.state.lock();
        state.loading = false;
        match result {
            Ok(books) => {
                state.reading_list = books;
                Ok(())
            }
            Err(e) => {
                state.error = Some(format!("{e:#}"));
                Err(e)
            }
        }
    }
}
