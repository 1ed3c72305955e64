use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{BatchId, NotificationId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient_id: UserId,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NotificationTarget {
    All,
    Batch,
    Individual,
}

/// Fan-out request. "Broadcast" is one stored row per resolved recipient.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SendNotificationDto {
    pub target: NotificationTarget,
    /// Required when target is `batch`.
    pub batch_id: Option<BatchId>,
    /// Required when target is `individual`.
    pub student_id: Option<UserId>,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SendNotificationResponse {
    /// How many rows the single batch insert created.
    pub recipients: u64,
}
