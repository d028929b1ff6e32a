//! Business services containing domain logic and use cases.

pub mod auth;
pub mod files;
pub mod session;

// Re-export commonly used types
pub use auth::{AuthService, BcryptPasswordHasher, Mailer, PasswordHasher, RecordingMailer};
pub use files::{
    FileService, FileServiceConfig, FileType, InMemoryObjectStorage, ObjectStorage, UploadedFile,
};
pub use session::{OneTimeTokenPolicy, SessionConfig, SessionService};
