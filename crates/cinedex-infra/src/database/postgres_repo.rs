//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use cinedex_core::domain::{Movie, Page, PageRequest, User};
use cinedex_core::error::RepoError;
use cinedex_core::ports::{MovieRepository, UserRepository};

use super::entity::movie::{self, Entity as MovieEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL movie repository.
pub type PostgresMovieRepository = PostgresBaseRepository<MovieEntity>;

/// Mask an email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next();
            match first {
                Some(c) if local.chars().count() > 1 => format!("{c}***@{domain}"),
                _ => format!("***@{domain}"),
            }
        }
        None => "***".to_string(),
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn list(&self, request: PageRequest) -> Result<Page<Movie>, RepoError> {
        let total = MovieEntity::find()
            .count(&*self.db)
            .await
            .map_err(query_error)?;
        let models = MovieEntity::find()
            .order_by_desc(movie::Column::CreatedAt)
            .order_by_desc(movie::Column::Id)
            .offset(request.offset())
            .limit(request.limit())
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(Page::new(
            models.into_iter().map(Into::into).collect(),
            total,
            request,
        ))
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, RepoError> {
        tracing::debug!(query = %query, "Searching movies by title");

        let title = Expr::expr(Func::lower(Expr::col(movie::Column::Title)));
        let result = MovieEntity::find()
            .filter(title.like(LikeExpr::new(like_pattern(query)).escape('\\')))
            .order_by_desc(movie::Column::CreatedAt)
            .order_by_desc(movie::Column::Id)
            .all(&*self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("demo@demo.com"), "d***@demo.com");
        assert_eq!(mask_email("a@b.c"), "***@b.c");
        assert_eq!(mask_email("nope"), "***");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Dune"), "%dune%");
        assert_eq!(like_pattern(""), "%%");
        assert_eq!(like_pattern("100%_"), "%100\\%\\_%");
    }
}
