//! PostgreSQL Repository Implementations
//!
//! All reads exclude soft-deleted rows with an explicit `deleted_at IS NULL`
//! predicate; deletes set `deleted_at` rather than removing rows. Cascades
//! run inside a single transaction, so a failure before commit rolls back
//! every mutation in the cascade.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{CommentId, Id, PostId, UserId};

use crate::domain::entity::{comment::Comment, post::Post, user::User};
use crate::domain::repository::{
    CommentRepository, Page, PostFilter, PostPatch, PostRepository, UserRepository,
};
use crate::domain::value_object::{email::Email, username::Username};
use crate::error::{BlogError, BlogResult};
use platform::password::StoredPasswordHash;

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgBlogRepository {
    async fn create_user(&self, user: &User) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                username,
                username_canonical,
                email,
                email_canonical,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.username.original())
        .bind(user.username.canonical())
        .bind(user.email.original())
        .bind(user.email.canonical())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user_by_id(&self, user_id: UserId) -> BlogResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                email,
                password_hash,
                created_at,
                updated_at,
                deleted_at
            FROM users
            WHERE user_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_user_by_username(&self, username: &Username) -> BlogResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                username,
                email,
                password_hash,
                created_at,
                updated_at,
                deleted_at
            FROM users
            WHERE username_canonical = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(username.canonical())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn exists_by_username(&self, username: &Username) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username_canonical = $1 AND deleted_at IS NULL)",
        )
        .bind(username.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> BlogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email_canonical = $1 AND deleted_at IS NULL)",
        )
        .bind(email.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete_user_cascade(&self, user_id: UserId) -> BlogResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            "UPDATE users SET deleted_at = $2, updated_at = $2 WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.as_uuid())
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted == 0 {
            return Err(BlogError::UserNotFound);
        }

        // Reachable via ownership only: the user's own comments anywhere.
        // Comments other users left on this user's posts are not part of the
        // cascade; they become unreachable once their post is deleted.
        sqlx::query(
            "UPDATE comments SET deleted_at = $2, updated_at = $2 WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.as_uuid())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE posts SET deleted_at = $2, updated_at = $2 WHERE user_id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id.as_uuid())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn create_post(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                user_id,
                title,
                content,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.user_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_post_by_id(&self, post_id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                user_id,
                title,
                content,
                created_at,
                updated_at,
                deleted_at
            FROM posts
            WHERE post_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn update_post(&self, post_id: PostId, patch: &PostPatch) -> BlogResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_at = $4
            WHERE post_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(patch.title.as_deref())
        .bind(patch.content.as_deref())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(BlogError::PostNotFound);
        }
        Ok(())
    }

    async fn delete_post_cascade(&self, post_id: PostId) -> BlogResult<()> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(
            "UPDATE posts SET deleted_at = $2, updated_at = $2 WHERE post_id = $1 AND deleted_at IS NULL",
        )
        .bind(post_id.as_uuid())
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if deleted == 0 {
            return Err(BlogError::PostNotFound);
        }

        sqlx::query(
            "UPDATE comments SET deleted_at = $2, updated_at = $2 WHERE post_id = $1 AND deleted_at IS NULL",
        )
        .bind(post_id.as_uuid())
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_posts(&self, filter: &PostFilter, page: &Page) -> BlogResult<(Vec<Post>, i64)> {
        let pattern = filter.keyword.as_ref().map(|k| format!("%{k}%"));
        let owner = filter.owner.map(|id| *id.as_uuid());

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM posts
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR title ILIKE $1 OR content ILIKE $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            "#,
        )
        .bind(pattern.as_deref())
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                user_id,
                title,
                content,
                created_at,
                updated_at,
                deleted_at
            FROM posts
            WHERE deleted_at IS NULL
              AND ($1::text IS NULL OR title ILIKE $1 OR content ILIKE $1)
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(pattern.as_deref())
        .bind(owner)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((rows.into_iter().map(PostRow::into_post).collect(), total))
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn create_comment(&self, comment: &Comment) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                user_id,
                content,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.user_id.as_uuid())
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comment_by_id(&self, comment_id: CommentId) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                user_id,
                content,
                created_at,
                updated_at,
                deleted_at
            FROM comments
            WHERE comment_id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn delete_comment(&self, comment_id: CommentId) -> BlogResult<()> {
        let deleted = sqlx::query(
            "UPDATE comments SET deleted_at = $2, updated_at = $2 WHERE comment_id = $1 AND deleted_at IS NULL",
        )
        .bind(comment_id.as_uuid())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted == 0 {
            return Err(BlogError::CommentNotFound);
        }
        Ok(())
    }

    async fn list_comments_by_post(
        &self,
        post_id: PostId,
        page: &Page,
    ) -> BlogResult<(Vec<Comment>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE post_id = $1 AND deleted_at IS NULL",
        )
        .bind(post_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                user_id,
                content,
                created_at,
                updated_at,
                deleted_at
            FROM comments
            WHERE post_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id.as_uuid())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((
            rows.into_iter().map(CommentRow::into_comment).collect(),
            total,
        ))
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: Id::from_uuid(self.user_id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash: StoredPasswordHash::from_db(self.password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: Id::from_uuid(self.post_id),
            user_id: Id::from_uuid(self.user_id),
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: Id::from_uuid(self.comment_id),
            post_id: Id::from_uuid(self.post_id),
            user_id: Id::from_uuid(self.user_id),
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }
    }
}
