use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use gurukul_models::ids::TestimonialId;

// student_name is free text on purpose; testimonials are marketing copy,
// not linked to enrolled students.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub student_name: String,
    pub content: String,
    pub rating: i32,
    pub is_featured: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTestimonialDto {
    #[validate(length(min = 1))]
    pub student_name: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    pub is_featured: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTestimonialDto {
    #[validate(length(min = 1))]
    pub student_name: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    pub is_featured: Option<bool>,
}
