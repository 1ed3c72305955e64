use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::{EventId, RegistrationId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventRegistration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub student_id: UserId,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RegistrationWithStudent {
    pub id: RegistrationId,
    pub student_id: UserId,
    pub full_name: String,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

/// An event as a student sees it, with their own registration state.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EventForStudent {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub registered: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEventDto {
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEventDto {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
}
