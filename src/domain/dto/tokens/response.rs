//! 토큰 응답 DTO

use serde::{Deserialize, Serialize};

use crate::domain::models::token::token::TokenPair;

/// 토큰 쌍 응답 DTO
///
/// 로그인/회원가입/갱신 응답에 실리는 토큰 정보입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
    pub token_type: String,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            expires_in: pair.expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}
