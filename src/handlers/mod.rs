//! HTTP 핸들러 모듈

pub mod auth;
pub mod posts;
pub mod realtime;
pub mod users;
