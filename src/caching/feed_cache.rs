//! # 피드 캐시 구현
//!
//! 페이지네이션된 포스트 목록의 Redis 캐시를 담당합니다.
//!
//! ## 캐싱 전략
//!
//! - **캐시 키**: `feed:page:{page}:limit:{limit}` - 페이지/한도 쌍을 그대로 키로 사용
//! - **TTL**: 300초 (5분)
//! - **무효화**: 포스트 생성/수정/삭제 시 `feed:*` 네임스페이스 전체를 일괄 삭제
//!
//! 무효화는 정밀한 페이지 계산 대신 전체 삭제를 선택한
//! 정확성 우선 정책입니다. 어떤 페이지가 영향을 받았는지 계산하지 않고
//! 모든 페이지를 버립니다.
//!
//! ## 알려진 레이스
//!
//! 캐시 미스가 스냅샷을 적재하는 사이에 다른 요청의 무효화가 끼어들면,
//! 뒤늦게 도착한 캐시 쓰기가 이미 오래된 데이터를 재삽입할 수 있습니다.
//! 이 설계는 버전 기반 무효화 대신 300초 TTL로 그 창을 제한합니다.

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::domain::dto::posts::response::PostResponse;
use crate::errors::errors::{AppError, AppResult};

/// 피드 캐시 항목의 TTL (초)
pub const FEED_TTL_SECONDS: u64 = 300;

/// 피드 네임스페이스의 전체 키 패턴
const FEED_KEY_PATTERN: &str = "feed:*";

/// 페이지네이션된 포스트 목록 캐시
///
/// 포스트 목록 조회(`GET /api/posts`)의 응답 페이로드를 페이지 단위로
/// 캐싱합니다. 조회 경로는 캐시 오류에 관대하고(미스로 처리),
/// 무효화 경로는 엄격합니다(실패가 호출자에게 전파됨).
pub struct FeedCache {
    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl FeedCache {
    /// 새 피드 캐시를 생성합니다.
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    /// 페이지/한도 쌍에 대한 캐시 키를 생성합니다.
    fn page_key(page: u64, limit: u64) -> String {
        format!("feed:page:{}:limit:{}", page, limit)
    }

    /// 캐시된 페이지를 조회합니다.
    ///
    /// 캐시 미스이거나 Redis 오류가 발생하면 `None`을 반환하여
    /// 호출자가 저장소에서 목록을 재계산하도록 합니다.
    pub async fn get_page(&self, page: u64, limit: u64) -> Option<Vec<PostResponse>> {
        let key = Self::page_key(page, limit);

        match self.redis.get::<Vec<PostResponse>>(&key).await {
            Ok(cached) => cached,
            Err(e) => {
                log::debug!("피드 캐시 조회 실패 (미스로 처리): {}", e);
                None
            }
        }
    }

    /// 재계산된 페이지를 캐시에 저장합니다 (TTL 300초).
    ///
    /// 저장 실패는 캐싱 기회의 손실일 뿐이므로 호출자에게 전파하지 않습니다.
    pub async fn store_page(&self, page: u64, limit: u64, posts: &[PostResponse]) {
        let key = Self::page_key(page, limit);

        if let Err(e) = self
            .redis
            .set_with_expiry(&key, &posts, FEED_TTL_SECONDS)
            .await
        {
            log::warn!("피드 캐시 저장 실패 - key: {}, 에러: {}", key, e);
        }
    }

    /// 피드 네임스페이스의 모든 캐시 항목을 삭제합니다.
    ///
    /// 포스트 변경 연산이 저장소에 반영된 직후, 응답을 반환하기 전에
    /// 호출되어야 합니다. 이미 응답된 쓰기 이후의 읽기가 오래된
    /// 캐시를 관찰하지 않도록 실패는 호출자에게 전파됩니다.
    pub async fn invalidate_all(&self) -> AppResult<()> {
        let keys = self
            .redis
            .keys(FEED_KEY_PATTERN)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        if keys.is_empty() {
            return Ok(());
        }

        self.redis
            .del_multiple(&keys)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;

        log::debug!("피드 캐시 무효화 완료 - 삭제된 키: {}개", keys.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_key_format() {
        assert_eq!(FeedCache::page_key(1, 10), "feed:page:1:limit:10");
        assert_eq!(FeedCache::page_key(3, 25), "feed:page:3:limit:25");
    }

    #[test]
    fn test_page_keys_match_namespace_pattern() {
        // 무효화 패턴이 모든 페이지 키를 포괄해야 합니다
        let key = FeedCache::page_key(7, 50);
        assert!(key.starts_with("feed:"));
        assert!(FEED_KEY_PATTERN.starts_with("feed:"));
    }

    #[test]
    fn test_feed_ttl_is_five_minutes() {
        assert_eq!(FEED_TTL_SECONDS, 300);
    }
}
