//! Gallery pipeline components.
//!
//! - **scheduler**: bounded-concurrency task runner with ordered results
//! - **progress**: per-completion progress snapshots
//! - **hash**: content identity digests
//! - **decode** / **thumbnail**: image decoding and preview encoding
//! - **discovery** / **validate**: listing and pre-flight checks
//! - **metadata**: EXIF lookup
//! - **source**: full-size originals as `data:` URIs
//! - **processor**: the batch orchestrator tying the above together

pub mod decode;
pub mod discovery;
pub mod hash;
pub mod metadata;
pub mod processor;
pub mod progress;
pub mod scheduler;
pub mod source;
pub mod thumbnail;
pub mod validate;

pub use decode::{DecodedImage, ImageDecoder};
pub use discovery::FileDiscovery;
pub use hash::ContentIdentity;
pub use metadata::MetadataExtractor;
pub use processor::BatchImageProcessor;
pub use progress::{NoProgress, ProgressSink, ProgressTracker};
pub use scheduler::ConcurrencyScheduler;
pub use source::source_data_uri;
pub use thumbnail::{data_uri, ThumbnailGenerator};
pub use validate::Validator;
