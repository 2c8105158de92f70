pub mod client;
pub mod error;
pub mod extract;
pub mod import;
pub mod normalize;
pub mod parse;
pub mod store;
pub mod types;

pub use client::PageFetcher;
pub use error::ScraperError;
pub use extract::{
    extract, extract_candidates, extract_with, ExtractOptions, DEFAULT_IMAGE_SCAN_RADIUS,
};
pub use import::Importer;
pub use normalize::{Normalizer, ValidationDrop};
pub use parse::parse_price;
pub use store::{MemoryStore, ProductStore, StoreError};
pub use types::{CandidateSet, ExtractionResult, ProductCandidate};
