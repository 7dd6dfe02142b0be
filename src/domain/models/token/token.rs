//! JWT 토큰 클레임과 토큰 쌍 모델

use serde::{Deserialize, Serialize};

/// JWT 토큰 클레임
///
/// 액세스 토큰과 리프레시 토큰이 동일한 클레임 형태를 공유하므로
/// 검증 측은 토큰 클래스와 무관하게 `sub`/`email`/`role`을 추출할 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID (MongoDB ObjectId 문자열)
    pub sub: String,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할 ("user" | "admin")
    pub role: String,
    /// 발급 시각 (Unix timestamp)
    pub iat: i64,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

/// 액세스/리프레시 토큰 쌍
///
/// 두 토큰은 서로 다른 시크릿으로 독립적으로 서명됩니다.
/// 영속되지 않으며, 존재 여부는 블랙리스트 부재로 암시됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 단기 액세스 토큰
    pub access_token: String,
    /// 장기 리프레시 토큰
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
}
