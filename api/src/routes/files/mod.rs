//! Media endpoints backed by object storage

pub mod delete;
pub mod upload;

pub use delete::delete_file;
pub use upload::upload_file;
