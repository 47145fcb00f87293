//! Groupo Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by the Groupo upload client crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ErrorMetadata, FailureKind, LogLevel, UploadError};
pub use models::{
    MediaItem, MediaKind, PostCreationResult, SourceHandle, Tier, Transport, UploadAttempt,
    UploadTarget,
};
