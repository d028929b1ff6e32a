//! Media upload and deletion against object storage

mod service;
mod storage;

pub use service::{FileService, FileServiceConfig, FileType, UploadedFile};
pub use storage::{InMemoryObjectStorage, ObjectStorage, StoredObject};
