//! Per-session key-value cache with expiry.
//!
//! Values are opaque strings (callers serialize JSON). Entries vanish after
//! their TTL. Backends: Redis when configured, otherwise an in-process map.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::AppError;

pub mod memory;
pub mod redis_store;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn put(&self, key: &str, value: String, ttl: Duration) -> Result<(), AppError>;

    async fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// Cache key for a user's resume.
pub fn resume_key(uid: &str) -> String {
    format!("resume:{uid}")
}
