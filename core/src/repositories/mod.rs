pub mod kv_store;
pub mod user;

pub use kv_store::{Clock, InMemoryKeyValueStore, KeyValueStore, ManualClock, SystemClock};
pub use user::{InMemoryUserRepository, UserRepository};
