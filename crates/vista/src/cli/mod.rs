//! Command implementations.

pub mod config;
pub mod exif;
pub mod interactive;
pub mod scan;
pub mod show;
