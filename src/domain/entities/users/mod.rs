//! 사용자 엔티티 모듈

pub mod user;

pub use user::{User, UserRole};
