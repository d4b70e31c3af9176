//! In-memory post store - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Page, PageRequest, Post, PostQuery, TrashScope};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository};

/// Post store backed by a `HashMap` behind an async `RwLock`.
///
/// Slug uniqueness is checked under the write lock, mirroring the unique
/// index of the SQL schema. Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }

    fn slug_taken(posts: &HashMap<Uuid, Post>, slug: &str, exclude: Option<Uuid>) -> bool {
        posts
            .values()
            .any(|p| p.slug == slug && Some(p.id) != exclude)
    }

    fn in_scope(post: &Post, scope: TrashScope) -> bool {
        match scope {
            TrashScope::ActiveOnly => !post.is_trashed(),
            TrashScope::OnlyTrashed => post.is_trashed(),
            TrashScope::WithTrashed => true,
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.contains_key(&post.id) {
            return Err(RepoError::UniqueViolation(format!("posts_pkey: {}", post.id)));
        }
        if Self::slug_taken(&posts, &post.slug, None) {
            return Err(RepoError::UniqueViolation(format!("posts_slug_key: {}", post.slug)));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_scoped(&self, id: Uuid, scope: TrashScope) -> Result<Option<Post>, RepoError> {
        Ok(self
            .find_by_id(id)
            .await?
            .filter(|p| Self::in_scope(p, scope)))
    }

    async fn update_scoped(&self, post: Post, scope: TrashScope) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.get(&post.id).is_some_and(|p| Self::in_scope(p, scope)) {
            return Err(RepoError::NotFound);
        }
        if Self::slug_taken(&posts, &post.slug, Some(post.id)) {
            return Err(RepoError::UniqueViolation(format!("posts_slug_key: {}", post.slug)));
        }
        posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn paginate(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let posts = self.posts.read().await;
        let mut matching: Vec<&Post> = posts
            .values()
            .filter(|p| Self::in_scope(p, query.scope))
            .filter(|p| !query.published_only || p.is_published)
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .cloned()
            .collect();

        Ok(Page {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    async fn exists_by_slug_excluding(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, RepoError> {
        Ok(Self::slug_taken(&*self.posts.read().await, slug, exclude))
    }

    async fn restore_all(&self, at: DateTime<Utc>) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        let mut restored = 0;
        for post in posts.values_mut() {
            if post.restore(at) {
                restored += 1;
            }
        }
        Ok(restored)
    }
}
