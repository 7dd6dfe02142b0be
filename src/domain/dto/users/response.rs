//! 사용자 응답 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::dto::tokens::response::TokenPairResponse;
use crate::domain::entities::users::user::{User, UserRole};

/// 사용자 응답 DTO
///
/// 비밀번호 해시를 제외한 사용자 정보입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            username,
            display_name,
            avatar,
            role,
            is_active,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            username,
            display_name,
            avatar,
            role,
            is_active,
            created_at,
            updated_at,
        }
    }
}

/// 인증 응답 DTO (회원가입/로그인)
///
/// 사용자 요약과 토큰 쌍을 함께 반환합니다.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPairResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User::new(
            "bob@example.com".to_string(),
            "bob".to_string(),
            "$2b$04$secret-hash".to_string(),
            None,
        );

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();

        assert!(!json.contains("password"));
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("bob@example.com"));
    }
}
