//! 포스트 리포지토리 모듈

pub mod post_repo;

pub use post_repo::PostRepository;
