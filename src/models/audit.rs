use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Structured audit record written by the logging port.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppLog {
    pub id: Uuid,
    pub action: String,
    pub user_id: Option<Uuid>,
    pub details: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}
