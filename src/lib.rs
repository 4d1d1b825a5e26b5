pub mod config;
pub mod delivery;
pub mod feed;
pub mod fetch_error;
pub mod fetcher;
pub mod puzzle;

pub use fetch_error::FetchError;
pub use fetcher::{FetchResult, PuzzleFetcher};
pub use puzzle::Puzzle;
