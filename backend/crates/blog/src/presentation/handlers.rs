//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use kernel::id::Id;
use platform::password::CredentialHasher;
use platform::token::TokenService;

use crate::application::{
    CommentListInput, CommentListUseCase, CreateCommentInput, CreateCommentUseCase,
    CreatePostInput, CreatePostUseCase, DeleteAccountUseCase, DeleteCommentUseCase,
    DeletePostUseCase, LoginInput, LoginUseCase, PostDetailUseCase, PostListInput,
    PostListUseCase, RegisterInput, RegisterUseCase, UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::repository::BlogRepository;
use crate::error::BlogResult;
use crate::presentation::dto::{
    CommentListResponse, CommentView, CreateCommentRequest, CreatePostRequest, LoginRequest,
    LoginResponse, PageQuery, PostDetailResponse, PostListQuery, PostListResponse, PostView,
    RegisterRequest, RegisterResponse, UpdatePostRequest,
};
use crate::presentation::middleware::Principal;

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub hasher: Arc<CredentialHasher>,
    pub tokens: Arc<TokenService>,
}

// ============================================================================
// Accounts
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<BlogAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> BlogResult<(StatusCode, Json<RegisterResponse>)>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.hasher.clone());

    let output = use_case
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: output.user_id,
            username: output.username,
        }),
    ))
}

/// POST /login
pub async fn login<R>(
    State(state): State<BlogAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> BlogResult<Json<LoginResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.tokens.clone(),
    );

    let output = use_case
        .execute(
            LoginInput {
                username: req.username,
                password: req.password,
            },
            Utc::now(),
        )
        .await?;

    Ok(Json(LoginResponse {
        token: output.token,
        expires_at: output.expires_at,
        user_id: output.user_id,
        username: output.username,
    }))
}

/// DELETE /account
pub async fn delete_account<R>(
    State(state): State<BlogAppState<R>>,
    Extension(principal): Extension<Principal>,
) -> BlogResult<StatusCode>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteAccountUseCase::new(state.repo.clone());
    use_case.execute(principal.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Posts
// ============================================================================

/// POST /posts
pub async fn create_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<CreatePostRequest>,
) -> BlogResult<(StatusCode, Json<PostView>)>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePostUseCase::new(state.repo.clone());

    let output = use_case
        .execute(
            principal.user_id,
            CreatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostView::from_entity(&output.post))))
}

/// PUT /posts/{id}
pub async fn update_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<UpdatePostRequest>,
) -> BlogResult<Json<PostView>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdatePostUseCase::new(state.repo.clone());

    let updated = use_case
        .execute(
            principal.user_id,
            Id::from_uuid(post_id),
            UpdatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(Json(PostView::from_entity(&updated)))
}

/// DELETE /posts/{id}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(post_id): Path<Uuid>,
) -> BlogResult<StatusCode>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeletePostUseCase::new(state.repo.clone());
    use_case
        .execute(principal.user_id, Id::from_uuid(post_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /posts
pub async fn post_list<R>(
    State(state): State<BlogAppState<R>>,
    Query(query): Query<PostListQuery>,
) -> BlogResult<Json<PostListResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = PostListUseCase::new(state.repo.clone());

    let output = use_case
        .execute(PostListInput {
            page_num: query.page_num,
            page_size: query.page_size,
            keyword: query.keyword,
            owner: query.owner,
        })
        .await?;

    Ok(Json(PostListResponse {
        posts: output.posts.iter().map(PostView::from_entity).collect(),
        total: output.total,
        page_num: output.page.page_num(),
        page_size: output.page.page_size(),
    }))
}

/// GET /posts/{id}
pub async fn post_detail<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<Uuid>,
) -> BlogResult<Json<PostDetailResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = PostDetailUseCase::new(state.repo.clone());
    let output = use_case.execute(Id::from_uuid(post_id)).await?;

    Ok(Json(PostDetailResponse {
        post: PostView::from_entity(&output.post),
        author: output.author,
        comments: output.comments.iter().map(CommentView::from_entity).collect(),
        comment_total: output.comment_total,
    }))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /posts/{id}/comments
pub async fn create_comment<R>(
    State(state): State<BlogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(post_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> BlogResult<(StatusCode, Json<CommentView>)>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateCommentUseCase::new(state.repo.clone());

    let output = use_case
        .execute(
            principal.user_id,
            Id::from_uuid(post_id),
            CreateCommentInput {
                content: req.content,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CommentView::from_entity(&output.comment)),
    ))
}

/// GET /posts/{id}/comments
pub async fn comment_list<R>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> BlogResult<Json<CommentListResponse>>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = CommentListUseCase::new(state.repo.clone());

    let output = use_case
        .execute(
            Id::from_uuid(post_id),
            CommentListInput {
                page_num: query.page_num,
                page_size: query.page_size,
            },
        )
        .await?;

    Ok(Json(CommentListResponse {
        comments: output
            .comments
            .iter()
            .map(CommentView::from_entity)
            .collect(),
        total: output.total,
        page_num: output.page.page_num(),
        page_size: output.page.page_size(),
    }))
}

/// DELETE /comments/{id}
pub async fn delete_comment<R>(
    State(state): State<BlogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(comment_id): Path<Uuid>,
) -> BlogResult<StatusCode>
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteCommentUseCase::new(state.repo.clone());
    use_case
        .execute(principal.user_id, Id::from_uuid(comment_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
