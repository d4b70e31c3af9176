//! Post business operations over a [`PostRepository`].

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post, PostInput, PostQuery, TrashScope};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;
use crate::validation::Normalizer;

/// Page size for the public listing.
pub const POSTS_PER_PAGE: u64 = 10;
/// Page size for the trash listing.
pub const TRASHED_PER_PAGE: u64 = 5;

const ENTITY: &str = "Post";

/// Create, update and soft-delete lifecycle for posts.
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    normalizer: Normalizer,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self {
            repo,
            normalizer: Normalizer::new(),
        }
    }

    /// Active posts, optionally only published ones.
    pub async fn list_posts(
        &self,
        published_only: bool,
        page: u64,
    ) -> Result<Page<Post>, DomainError> {
        let query = PostQuery {
            scope: TrashScope::ActiveOnly,
            published_only,
        };
        Ok(self
            .repo
            .paginate(query, PageRequest::new(page, POSTS_PER_PAGE))
            .await?)
    }

    /// An active post by ID.
    pub async fn find_post(&self, id: Uuid) -> Result<Post, DomainError> {
        tracing::debug!(post_id = %id, "Finding active post");
        self.repo
            .find_scoped(id, TrashScope::ActiveOnly)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_post(&self, input: PostInput) -> Result<Post, DomainError> {
        let data = self.normalizer.create(input)?;
        self.ensure_slug_available(&data.slug, None).await?;

        let post = Post::new(data);
        let slug = post.slug.clone();
        let created = self
            .repo
            .insert(post)
            .await
            .map_err(|e| translate_unique(e, slug))?;

        tracing::info!(post_id = %created.id, slug = %created.slug, "Post created");
        Ok(created)
    }

    /// Merge the fields present in `input` into an active post.
    pub async fn update_post(&self, id: Uuid, input: PostInput) -> Result<Post, DomainError> {
        let mut post = self.find_post(id).await?;
        let changes = self.normalizer.update(input, &post)?;

        if let Some(slug) = &changes.slug {
            self.ensure_slug_available(slug, Some(id)).await?;
        }

        post.apply(changes, Utc::now());
        let slug = post.slug.clone();
        let updated = self
            .repo
            .update_scoped(post, TrashScope::ActiveOnly)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => not_found(id),
                other => translate_unique(other, slug),
            })?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(updated)
    }

    /// Soft delete an active post and return it in its trashed state.
    pub async fn delete_post(&self, id: Uuid) -> Result<Post, DomainError> {
        let mut post = self.find_post(id).await?;
        post.trash(Utc::now());
        let trashed = self
            .repo
            .update_scoped(post, TrashScope::ActiveOnly)
            .await
            .map_err(|e| or_not_found(e, id))?;

        tracing::info!(post_id = %id, "Post moved to trash");
        Ok(trashed)
    }

    /// Restore a trashed post. `None` if it does not exist or is not trashed.
    pub async fn restore(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let Some(mut post) = self.repo.find_scoped(id, TrashScope::OnlyTrashed).await? else {
            return Ok(None);
        };
        post.restore(Utc::now());
        let restored = match self.repo.update_scoped(post, TrashScope::OnlyTrashed).await {
            Ok(post) => post,
            Err(RepoError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(post_id = %id, "Post restored");
        Ok(Some(restored))
    }

    pub async fn list_trashed(&self, page: u64) -> Result<Page<Post>, DomainError> {
        let query = PostQuery {
            scope: TrashScope::OnlyTrashed,
            published_only: false,
        };
        Ok(self
            .repo
            .paginate(query, PageRequest::new(page, TRASHED_PER_PAGE))
            .await?)
    }

    /// Restore every trashed post; returns the number restored.
    pub async fn restore_all(&self) -> Result<u64, DomainError> {
        let count = self.repo.restore_all(Utc::now()).await?;
        tracing::info!(restored = count, "Restored all trashed posts");
        Ok(count)
    }

    /// Lookup by ID across active and trashed posts.
    pub async fn get_trashed_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.repo.find_scoped(id, TrashScope::WithTrashed).await?)
    }

    /// Physically remove a row. Returns whether one existed.
    pub async fn force_delete(&self, id: Uuid) -> Result<bool, DomainError> {
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(post_id = %id, "Post permanently deleted");
                Ok(true)
            }
            Err(RepoError::NotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Permanently delete a trashed post, returning its last state.
    pub async fn purge(&self, id: Uuid) -> Result<Post, DomainError> {
        let post = self.get_trashed_post(id).await?.ok_or_else(|| not_found(id))?;
        if !post.is_trashed() {
            return Err(DomainError::NotTrashed { entity_type: ENTITY, id });
        }
        if !self.force_delete(id).await? {
            return Err(not_found(id));
        }
        Ok(post)
    }

    async fn ensure_slug_available(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<(), DomainError> {
        if self.repo.exists_by_slug_excluding(slug, exclude).await? {
            return Err(DomainError::Duplicate {
                field: "slug",
                value: slug.to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(id: Uuid) -> DomainError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id,
    }
}

/// A scoped write that matched no row lost a race with another request.
fn or_not_found(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => not_found(id),
        other => other.into(),
    }
}

/// The store's unique index is authoritative for slug collisions.
fn translate_unique(err: RepoError, slug: String) -> DomainError {
    match err {
        RepoError::UniqueViolation(detail) => {
            tracing::debug!(%slug, %detail, "Slug collision reported by store");
            DomainError::Duplicate {
                field: "slug",
                value: slug,
            }
        }
        other => other.into(),
    }
}
