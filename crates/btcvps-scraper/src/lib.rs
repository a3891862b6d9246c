pub mod blocks;
pub mod error;
pub mod extract;
pub mod geocode;
pub mod merge;
pub mod page;
pub mod patterns;
pub mod pipeline;
pub mod resolve;

pub use blocks::{Anchor, Block, ListItem};
pub use error::ScraperError;
pub use pipeline::run_pipeline;
pub use resolve::RedirectResolver;
