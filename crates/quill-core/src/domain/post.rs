use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Soft-delete lifecycle of a stored post.
///
/// A force-deleted post has no state: its row is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PostState {
    Active,
    Trashed { deleted_at: DateTime<Utc> },
}

impl PostState {
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(deleted_at) => PostState::Trashed { deleted_at },
            None => PostState::Active,
        }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PostState::Active => None,
            PostState::Trashed { deleted_at } => Some(*deleted_at),
        }
    }
}

/// Post entity - represents a blog post or article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub is_published: bool,
    pub published_date: Option<DateTime<Utc>>,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
    pub state: PostState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new, active post from validated data.
    pub fn new(data: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: data.title,
            slug: data.slug,
            body: data.body,
            is_published: data.is_published,
            published_date: data.published_date,
            meta_description: data.meta_description,
            tags: data.tags,
            keywords: data.keywords,
            state: PostState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_trashed(&self) -> bool {
        matches!(self.state, PostState::Trashed { .. })
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.state.deleted_at()
    }

    /// Move an active post to the trash. Returns `false` if it already was.
    pub fn trash(&mut self, at: DateTime<Utc>) -> bool {
        if self.is_trashed() {
            return false;
        }
        self.state = PostState::Trashed { deleted_at: at };
        self.updated_at = at;
        true
    }

    /// Bring a trashed post back. Returns `false` if it was not trashed.
    pub fn restore(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_trashed() {
            return false;
        }
        self.state = PostState::Active;
        self.updated_at = at;
        true
    }

    /// Merge validated changes; omitted fields keep their stored value.
    pub fn apply(&mut self, changes: PostChanges, at: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(slug) = changes.slug {
            self.slug = slug;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(is_published) = changes.is_published {
            self.is_published = is_published;
        }
        if let Some(published_date) = changes.published_date {
            self.published_date = published_date;
        }
        if let Some(meta_description) = changes.meta_description {
            self.meta_description = meta_description;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(keywords) = changes.keywords {
            self.keywords = keywords;
        }
        self.updated_at = at;
    }
}

/// Normalized, validated data for a new post.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub is_published: bool,
    pub published_date: Option<DateTime<Utc>>,
    pub meta_description: Option<String>,
    pub tags: Vec<String>,
    pub keywords: Vec<String>,
}

/// Normalized, validated changes for an existing post.
///
/// `None` leaves the stored value alone; for nullable columns the inner
/// `Option` carries the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub is_published: Option<bool>,
    pub published_date: Option<Option<DateTime<Utc>>>,
    pub meta_description: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub keywords: Option<Vec<String>>,
}
