use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DivvyError;

#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value from the cache by key
    async fn get<T: for<'a> Deserialize<'a> + Send + Sync>(
        &self,
        key: &str,
    ) -> Result<Option<T>, DivvyError>;

    /// Set a value in the cache with an optional TTL (in seconds)
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<u64>,
    ) -> Result<(), DivvyError>;

    /// Delete a key from the cache
    async fn del(&self, key: &str) -> Result<(), DivvyError>;
}

pub fn user_balance_key(user_id: Uuid) -> String {
    format!("balance:user:{user_id}")
}

pub mod in_memory;
