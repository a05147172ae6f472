//! Note domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Note record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    /// 创建时写入，之后不再变更
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create note request
#[derive(Debug, Deserialize, validator::Validate)]
pub struct CreateNoteRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 5, message = "description must be at least 5 characters"))]
    pub description: String,
    pub tag: Option<String>,
}

/// Update note request (partial; owner is never updatable)
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateNoteRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 5, message = "description must be at least 5 characters"))]
    pub description: Option<String>,
    pub tag: Option<String>,
}
