//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use quill_core::domain::{Page, PageRequest, Post, PostQuery, TrashScope};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, query_err, write_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Row filter for a soft-delete scope.
fn scope_condition(scope: TrashScope) -> Condition {
    match scope {
        TrashScope::ActiveOnly => Condition::all().add(post::Column::DeletedAt.is_null()),
        TrashScope::OnlyTrashed => Condition::all().add(post::Column::DeletedAt.is_not_null()),
        TrashScope::WithTrashed => Condition::all(),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_scoped(&self, id: Uuid, scope: TrashScope) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .filter(scope_condition(scope))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_scoped(&self, post: Post, scope: TrashScope) -> Result<Post, RepoError> {
        // The scope is re-checked by the UPDATE itself, so a state change made
        // since the row was read leaves it untouched.
        let model = PostEntity::update(post::ActiveModel::from(post))
            .filter(scope_condition(scope))
            .exec(&self.db)
            .await
            .map_err(write_err)?;

        Ok(model.into())
    }

    async fn paginate(
        &self,
        query: PostQuery,
        page: PageRequest,
    ) -> Result<Page<Post>, RepoError> {
        let mut select = PostEntity::find().filter(scope_condition(query.scope));
        if query.published_only {
            select = select.filter(post::Column::IsPublished.eq(true));
        }

        let paginator = select
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .paginate(&self.db, page.per_page);

        let total = paginator.num_items().await.map_err(query_err)?;
        let items = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(query_err)?;

        tracing::debug!(?query, page = page.page, total, "Paginated posts");

        Ok(Page {
            items: items.into_iter().map(Into::into).collect(),
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
        // Trashed rows still own their slug.
        let mut select = PostEntity::find().filter(post::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            select = select.filter(post::Column::Id.ne(id));
        }

        let found = select.one(&self.db).await.map_err(query_err)?;
        Ok(found.is_some())
    }

    async fn restore_all(&self, at: DateTime<Utc>) -> Result<u64, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::DeletedAt, Expr::cust("NULL"))
            .col_expr(post::Column::UpdatedAt, Expr::value(at.fixed_offset()))
            .filter(post::Column::DeletedAt.is_not_null())
            .exec(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.rows_affected)
    }
}
