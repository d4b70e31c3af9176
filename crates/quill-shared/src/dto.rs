//! Data Transfer Objects - response payloads for the posts API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub is_published: bool,
    pub published_date: Option<DateTime<Utc>>,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub last_page: u64,
}

/// Result of restoring every trashed post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreAllResponse {
    pub restored_count: u64,
}
