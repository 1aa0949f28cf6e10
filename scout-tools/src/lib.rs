mod extract;
mod loader;
mod scrape;
mod search;

pub use extract::{extract_page_text, ExtractedPage};
pub use loader::{HttpPageLoader, PageDocument, PageLoader};
pub use scrape::{ScrapeWebsite, SCRAPE_NOTES_PROMPT};
pub use search::{SearchResult, TavilySearch};
