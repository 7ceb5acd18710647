//! PostgreSQL post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgBinOper;
use sea_orm::sea_query::{Expr, Func, Order, SimpleExpr, UpdateStatement};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QueryTrait, Select,
};
use uuid::Uuid;

use quill_core::domain::{
    ListOptions, Post, PostFilter, PostPatch, SortBy, SortOrder, timestamp_now,
};
use quill_core::error::RepoError;
use quill_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// Build the listing query: exact-match filters plus a single-field sort,
/// with the id as tie-breaker.
pub(crate) fn list_query(filter: &PostFilter, options: ListOptions) -> Select<PostEntity> {
    let mut query = PostEntity::find();

    if let Some(author) = &filter.author {
        query = query.filter(post::Column::Author.eq(author.as_str()));
    }
    if let Some(tag) = &filter.tag {
        // jsonb containment: the tag array holds this value
        query = query.filter(
            Expr::col((PostEntity, post::Column::Tags))
                .binary(PgBinOper::Contains, Expr::val(serde_json::json!([tag]))),
        );
    }

    let column = match options.sort_by {
        SortBy::CreatedAt => post::Column::CreatedAt,
        SortBy::UpdatedAt => post::Column::UpdatedAt,
        SortBy::Title => post::Column::Title,
    };
    let order = match options.sort_order {
        SortOrder::Ascending => Order::Asc,
        SortOrder::Descending => Order::Desc,
    };

    query
        .order_by(column, order.clone())
        .order_by(post::Column::Id, order)
}

/// Build `UPDATE ... RETURNING` writing only the patched columns.
///
/// `updated_at` becomes `GREATEST(now, updated_at + 1µs)` so it always moves
/// forward, whatever the application server's clock says.
pub(crate) fn update_query(id: Uuid, patch: PostPatch, now: DateTime<Utc>) -> UpdateStatement {
    let bumped = Expr::col(post::Column::UpdatedAt).add(Expr::cust("interval '1 microsecond'"));
    let now: SimpleExpr = Expr::val(now).into();

    let mut update = PostEntity::update_many()
        .col_expr(post::Column::UpdatedAt, Func::greatest([now, bumped]).into())
        .filter(post::Column::Id.eq(id));

    if let Some(title) = patch.title {
        update = update.col_expr(post::Column::Title, Expr::val(title).into());
    }
    if let Some(author) = patch.author {
        update = update.col_expr(post::Column::Author, Expr::val(author).into());
    }
    if let Some(contents) = patch.contents {
        update = update.col_expr(post::Column::Contents, Expr::val(contents).into());
    }
    if let Some(tags) = patch.tags {
        update = update.col_expr(
            post::Column::Tags,
            Expr::val(serde_json::Value::from(tags)).into(),
        );
    }

    let mut query = update.into_query();
    query.returning_all();
    query
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(
        &self,
        filter: &PostFilter,
        options: ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let result = list_query(filter, options)
            .all(&self.db)
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&update_query(id, patch, timestamp_now()));

        let updated = PostEntity::find()
            .from_raw_sql(stmt)
            .one(&self.db)
            .await
            .map_err(repo_error)?;

        if updated.is_none() {
            tracing::debug!(post_id = %id, "No post row to update");
        }
        Ok(updated.map(Into::into))
    }
}
