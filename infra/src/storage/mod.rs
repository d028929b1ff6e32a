//! Storage module - S3-compatible object storage

pub mod r2;

pub use r2::R2ObjectStorage;
