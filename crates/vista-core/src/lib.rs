//! Vista Core - batch image gallery pipeline.
//!
//! Vista turns a folder of photos into an ordered list of gallery items, each
//! carrying a content id and an inline thumbnail, while reporting progress as
//! files finish.
//!
//! ```text
//! Directory → Filter → [Validate → Digest → Thumbnail] × N (bounded) → Ordered items
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use vista_core::{BatchImageProcessor, Config, ProgressSnapshot};
//!
//! #[tokio::main]
//! async fn main() -> vista_core::Result<()> {
//!     let config = Config::load()?;
//!     let processor = BatchImageProcessor::new(&config);
//!
//!     let items = processor
//!         .process_directory("./photos".as_ref(), 5, |p: &ProgressSnapshot| {
//!             eprintln!("{}/{}", p.completed, p.total);
//!         })
//!         .await?;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod testutil;

pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Result, VistaError};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{
    BatchImageProcessor, ConcurrencyScheduler, ContentIdentity, MetadataExtractor, NoProgress,
    ProgressSink, ProgressTracker, ThumbnailGenerator,
};
pub use types::{BatchStats, ExifData, GalleryItem, ProgressSnapshot};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
