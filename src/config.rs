#[derive(Debug)]
pub struct Config {
    pub books_api_base_url: String,
}

impl Config {
    pub fn load() -> Self {
        let books_api_base_url = std::env::var("BOOKS_API_BASE_URL").unwrap_or_default();
        Config { books_api_base_url }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.books_api_base_url.is_empty() {
            return Err("BOOKS_API_BASE_URL is missing".into());
        }
        Ok(())
    }
}
