use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post, PostQuery, TrashScope};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID, regardless of soft-delete state.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Physically delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository with soft-delete aware queries.
///
/// Implementations must enforce slug uniqueness across every stored row and
/// report collisions as [`RepoError::UniqueViolation`].
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post whose current state falls within `scope`.
    async fn find_scoped(&self, id: Uuid, scope: TrashScope) -> Result<Option<Post>, RepoError>;

    /// Overwrite a stored post, but only while the stored row is still within
    /// `scope`. [`RepoError::NotFound`] when it is gone or has changed state.
    async fn update_scoped(&self, post: Post, scope: TrashScope) -> Result<Post, RepoError>;

    /// One page of posts matching `query`, oldest first.
    async fn paginate(&self, query: PostQuery, page: PageRequest)
    -> Result<Page<Post>, RepoError>;

    /// Whether any row (trashed included) other than `exclude` uses `slug`.
    async fn exists_by_slug_excluding(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError>;

    /// Clear the deletion mark on every trashed post; returns how many changed.
    async fn restore_all(&self, at: DateTime<Utc>) -> Result<u64, RepoError>;
}
