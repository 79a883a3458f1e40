//! Application Layer
//!
//! Use cases and application services.

pub mod comment_list;
pub mod config;
pub mod create_comment;
pub mod create_post;
pub mod delete_account;
pub mod delete_comment;
pub mod delete_post;
pub mod login;
pub mod post_detail;
pub mod post_list;
pub mod register;
pub mod update_post;

// Re-exports
pub use comment_list::{CommentListInput, CommentListOutput, CommentListUseCase};
pub use config::BlogConfig;
pub use create_comment::{CreateCommentInput, CreateCommentOutput, CreateCommentUseCase};
pub use create_post::{CreatePostInput, CreatePostOutput, CreatePostUseCase};
pub use delete_account::DeleteAccountUseCase;
pub use delete_comment::DeleteCommentUseCase;
pub use delete_post::DeletePostUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use post_detail::{PostDetailOutput, PostDetailUseCase};
pub use post_list::{PostListInput, PostListOutput, PostListUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use update_post::{UpdatePostInput, UpdatePostUseCase};
