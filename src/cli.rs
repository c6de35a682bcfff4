use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::books_api::BooksClient;
use crate::pages;
use crate::store::{CatalogState, CatalogStore};

#[derive(Parser, Debug)]
#[command(name = "bookstand")]
#[command(about = "Browse a books catalog and manage a reading list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a page of the catalog, optionally filtered by a search query
    List {
        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: i64,
        /// Full-text search query passed through to the service
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Show one book's details
    Show {
        book_id: i64,
        /// Also add the book to the reading list
        #[arg(long)]
        save: bool,
    },
    /// Manage the reading list
    #[command(subcommand, name = "reading-list")]
    ReadingList(ReadingListCommand),
}

#[derive(Subcommand, Debug)]
pub enum ReadingListCommand {
    /// Show the current reading list
    Show,
    /// Add a book to the reading list by id
    Add { book_id: i64 },
    /// Remove a book from the reading list by id
    Remove { book_id: i64 },
}

/// Dispatch one store operation per invocation and print the rendered page.
/// The process exits non-zero when the operation left an error in the store.
pub async fn run(store: &CatalogStore, client: &BooksClient, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { page, query } => {
            store.fetch_page(page, query.as_deref()).await;
            let state = store.state();
            print!("{}", pages::home::render(&state, page, query.as_deref()));
            fail_on_store_error(&state)
        }
        Command::Show { book_id, save } => {
            store.fetch_detail(book_id).await;
            let state = store.state();
            let image_url = state.book.as_ref().and_then(|b| client.image_url(b));
            print!("{}", pages::detail::render(&state, image_url));
            fail_on_store_error(&state)?;
            if save {
                let book = state.book.context("book detail missing after fetch")?;
                store.add_favorite(book).await?;
                println!("The book has been added to the reading list.");
            }
            Ok(())
        }
        Command::ReadingList(ReadingListCommand::Show) => {
            let _ = store.fetch_favorites().await;
            let state = store.state();
            print!("{}", pages::reading_list::render(&state));
            fail_on_store_error(&state)
        }
        Command::ReadingList(ReadingListCommand::Add { book_id }) => {
            store.fetch_detail(book_id).await;
            let state = store.state();
            fail_on_store_error(&state)?;
            let book = state.book.context("book detail missing after fetch")?;
            store.add_favorite(book).await?;
            println!("The book has been added to the reading list.");
            Ok(())
        }
        Command::ReadingList(ReadingListCommand::Remove { book_id }) => {
            store.remove_favorite(book_id).await?;
            println!("Removed book {book_id} from the reading list.");
            Ok(())
        }
    }
}

fn fail_on_store_error(state: &CatalogState) -> anyhow::Result<()> {
    match &state.error {
        Some(message) => Err(anyhow::anyhow!("request failed: {message}")),
        None => Ok(()),
    }
}
