use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meditation {
    pub id: i32,
    pub prompt: String,
    pub content: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}
