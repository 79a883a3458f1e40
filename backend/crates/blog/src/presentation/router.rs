//! Blog Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use platform::password::CredentialHasher;
use platform::token::TokenService;

use crate::domain::repository::BlogRepository;
use crate::infra::postgres::PgBlogRepository;
use crate::presentation::handlers::{self, BlogAppState};
use crate::presentation::middleware::require_bearer_auth;

/// Create the blog router with the PostgreSQL repository
pub fn blog_router(
    repo: PgBlogRepository,
    hasher: CredentialHasher,
    tokens: TokenService,
) -> Router {
    blog_router_generic(repo, hasher, tokens)
}

/// Create a blog router for any repository implementation.
///
/// Reads are public; mutations sit behind the bearer-token middleware, which
/// is attached per method so public and protected verbs can share a path.
pub fn blog_router_generic<R>(repo: R, hasher: CredentialHasher, tokens: TokenService) -> Router
where
    R: BlogRepository + Clone + Send + Sync + 'static,
{
    let tokens = Arc::new(tokens);
    let state = BlogAppState {
        repo: Arc::new(repo),
        hasher: Arc::new(hasher),
        tokens: tokens.clone(),
    };
    let auth = middleware::from_fn_with_state(tokens, require_bearer_auth);

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route(
            "/account",
            delete(handlers::delete_account::<R>).layer(auth.clone()),
        )
        .route(
            "/posts",
            get(handlers::post_list::<R>)
                .merge(post(handlers::create_post::<R>).layer(auth.clone())),
        )
        .route(
            "/posts/{id}",
            get(handlers::post_detail::<R>).merge(
                put(handlers::update_post::<R>)
                    .delete(handlers::delete_post::<R>)
                    .layer(auth.clone()),
            ),
        )
        .route(
            "/posts/{id}/comments",
            get(handlers::comment_list::<R>)
                .merge(post(handlers::create_comment::<R>).layer(auth.clone())),
        )
        .route(
            "/comments/{id}",
            delete(handlers::delete_comment::<R>).layer(auth),
        )
        .with_state(state)
}
