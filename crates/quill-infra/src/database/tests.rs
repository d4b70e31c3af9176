#[cfg(test)]
mod tests {
    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;
    use quill_core::domain::{PageRequest, Post, PostQuery, TrashScope};
    use quill_core::error::RepoError;
    use quill_core::ports::{BaseRepository, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    fn model(id: uuid::Uuid, slug: &str, deleted: bool) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id,
            title: "Test Post".to_owned(),
            slug: slug.to_owned(),
            body: "Content".to_owned(),
            is_published: false,
            published_date: None,
            meta_description: None,
            tags: serde_json::json!(["rust", 7]),
            keywords: serde_json::json!(["web"]),
            deleted_at: deleted.then(|| now.into()),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let post_id = uuid::Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(post_id, "test-post", true)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.expect("post should be found");
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
        assert!(post.is_trashed());
        // Non-string JSON entries are dropped on the way in.
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_find_scoped_returns_none_when_filtered_out() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .find_scoped(uuid::Uuid::new_v4(), TrashScope::ActiveOnly)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_slug_exists() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(uuid::Uuid::new_v4(), "taken", false)]])
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert!(repo.exists_by_slug_excluding("taken", None).await.unwrap());
        assert!(
            !repo
                .exists_by_slug_excluding("free", Some(uuid::Uuid::new_v4()))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_restore_all_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 3,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        assert_eq!(repo.restore_all(chrono::Utc::now()).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_paginate_trashed() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(2)]])
            .append_query_results(vec![vec![
                model(uuid::Uuid::new_v4(), "one", true),
                model(uuid::Uuid::new_v4(), "two", true),
            ]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let query = PostQuery {
            scope: TrashScope::OnlyTrashed,
            published_only: false,
        };

        let page = repo.paginate(query, PageRequest::new(1, 5)).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.items.iter().all(Post::is_trashed));
    }

    #[tokio::test]
    async fn test_scoped_update_of_changed_row_is_not_found() {
        // The guarded UPDATE ... RETURNING matches nothing.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post: Post = model(Uuid::new_v4(), "stale", false).into();

        let result = repo.update_scoped(post, TrashScope::ActiveOnly).await;
        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_scoped_update_returns_written_row() {
        let id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(id, "kept", true)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let post: Post = model(id, "kept", true).into();

        let updated = repo.update_scoped(post, TrashScope::ActiveOnly).await.unwrap();
        assert_eq!(updated.id, id);
        assert!(updated.is_trashed());
    }

    #[tokio::test]
    async fn test_paginate_clamps_huge_page_numbers() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![count_row(1)]])
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let page = repo
            .paginate(PostQuery::default(), PageRequest::new(u64::MAX, 10))
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total, 1);
    }

    /// Row shape SeaORM's paginator reads its count from.
    fn count_row(n: i64) -> std::collections::BTreeMap<&'static str, sea_orm::Value> {
        let mut row = std::collections::BTreeMap::new();
        row.insert("num_items", sea_orm::Value::BigInt(Some(n)));
        row
    }
}
