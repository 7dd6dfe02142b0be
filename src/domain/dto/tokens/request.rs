//! 토큰 요청 DTO
//!
//! 토큰 갱신과 로그아웃 요청의 본문을 매핑합니다.

use serde::Deserialize;
use validator::Validate;

/// 리프레시 토큰 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// 로그아웃 요청 구조체
///
/// 액세스 토큰은 Authorization 헤더에, 리프레시 토큰은 본문에 실립니다.
/// 로그아웃은 항상 성공으로 응답하므로 본문 검증도 관대합니다.
#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: String,
}
