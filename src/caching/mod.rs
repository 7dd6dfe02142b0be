//! 캐싱 계층 모듈
//!
//! Redis 기반의 캐시 클라이언트와 피드 캐시를 제공합니다.
//!
//! - [`redis`] - 타입 안전한 Redis 클라이언트 래퍼
//! - [`feed_cache`] - 페이지네이션된 포스트 목록 캐시

pub mod feed_cache;
pub mod redis;

pub use feed_cache::FeedCache;
pub use redis::RedisClient;
