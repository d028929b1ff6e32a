//! Cache module for Redis-based storage
//!
//! The Redis instance holds the token revocation list and the one-time
//! verification and password-reset tokens.

pub mod redis_client;
pub mod redis_store;

#[cfg(test)]
mod tests;

pub use redis_client::RedisClient;
pub use redis_store::RedisKeyValueStore;

// Re-export commonly used types
pub use lr_shared::config::CacheConfig;
