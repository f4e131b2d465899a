pub mod fetcher;
pub mod page_extractor;

pub use fetcher::PageFetcher;
pub use page_extractor::PageExtractor;
