use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DivvyError;
use crate::models::AppLog;

#[async_trait]
pub trait LoggingService: Send + Sync {
    /// Record one structured audit entry for an action.
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        user_id: Option<Uuid>,
    ) -> Result<(), DivvyError>;

    async fn get_logs(&self) -> Result<Vec<AppLog>, DivvyError>;
}

pub mod in_memory;
