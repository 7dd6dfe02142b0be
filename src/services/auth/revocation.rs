//! 토큰 블랙리스트 (무효화 리스트) 구현
//!
//! 자연 만료 전에 명시적으로 무효화된 토큰을 Redis에 기록합니다.
//!
//! ## 키 설계
//!
//! - 액세스 토큰: `access_token:{원본 토큰 문자열}`
//! - 리프레시 토큰: `refresh_token:{원본 토큰 문자열}`
//! - 값: 센티널 `"1"`
//!
//! TTL은 액세스 토큰의 경우 남은 수명, 리프레시 토큰의 경우
//! 실제 남은 수명과 무관한 고정 7일 창입니다. 항목은 로그아웃 시
//! 생성되고, 갱신/사용 시 조회되며, 자연 만료로 제거됩니다.
//! 토큰 쌍 자체는 영속되지 않으므로 토큰의 "존재"는
//! 이 리스트에 없다는 사실로만 암시됩니다.

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::errors::errors::{AppError, AppResult};

/// 블랙리스트 항목의 센티널 값
const REVOKED_SENTINEL: &str = "1";

/// 액세스 토큰 블랙리스트 키 접두사
const ACCESS_KEY_PREFIX: &str = "access_token:";

/// 리프레시 토큰 블랙리스트 키 접두사
const REFRESH_KEY_PREFIX: &str = "refresh_token:";

/// Redis 기반 토큰 무효화 리스트
///
/// 생성자 주입으로 Redis 클라이언트를 전달받습니다.
pub struct TokenRevocationList {
    /// Redis 캐시 클라이언트
    redis: Arc<RedisClient>,
}

impl TokenRevocationList {
    /// 새 무효화 리스트를 생성합니다.
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    /// 액세스 토큰 블랙리스트 키
    fn access_key(token: &str) -> String {
        format!("{}{}", ACCESS_KEY_PREFIX, token)
    }

    /// 리프레시 토큰 블랙리스트 키
    fn refresh_key(token: &str) -> String {
        format!("{}{}", REFRESH_KEY_PREFIX, token)
    }

    /// 액세스 토큰을 남은 수명만큼 블랙리스트에 추가합니다.
    ///
    /// TTL이 0이면 이미 만료된 토큰이므로 기록하지 않습니다.
    pub async fn revoke_access(&self, token: &str, ttl_seconds: u64) -> AppResult<()> {
        if ttl_seconds == 0 {
            return Ok(());
        }

        self.redis
            .set_with_expiry(&Self::access_key(token), &REVOKED_SENTINEL, ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// 리프레시 토큰을 고정 TTL로 블랙리스트에 추가합니다.
    pub async fn revoke_refresh(&self, token: &str, ttl_seconds: u64) -> AppResult<()> {
        self.redis
            .set_with_expiry(&Self::refresh_key(token), &REVOKED_SENTINEL, ttl_seconds)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// 액세스 토큰의 무효화 여부를 확인합니다.
    pub async fn is_access_revoked(&self, token: &str) -> AppResult<bool> {
        self.redis
            .exists(&Self::access_key(token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    /// 리프레시 토큰의 무효화 여부를 확인합니다.
    pub async fn is_refresh_revoked(&self, token: &str) -> AppResult<bool> {
        self.redis
            .exists(&Self::refresh_key(token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_formats() {
        assert_eq!(
            TokenRevocationList::access_key("eyJ.abc.def"),
            "access_token:eyJ.abc.def"
        );
        assert_eq!(
            TokenRevocationList::refresh_key("eyJ.abc.def"),
            "refresh_token:eyJ.abc.def"
        );
    }

    #[test]
    fn test_token_classes_use_distinct_namespaces() {
        // 같은 토큰 문자열이라도 클래스별로 다른 키를 가져야 합니다
        let token = "same-token";
        assert_ne!(
            TokenRevocationList::access_key(token),
            TokenRevocationList::refresh_key(token)
        );
    }
}
