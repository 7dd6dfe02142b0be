//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 이메일/패스워드 기반의 로컬 인증 사용자 모델을 제공합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 사용자 역할
///
/// 시스템은 일반 사용자와 관리자의 두 역할만 구분합니다.
/// 관리자는 소유권 검사를 우회하여 모든 포스트를 수정/삭제할 수 있습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// 관리자 여부
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    /// JWT 클레임에 실리는 문자열 표현
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// 클레임 문자열에서 역할을 복원합니다.
    ///
    /// 알 수 없는 값은 최소 권한인 `User`로 간주합니다.
    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

/// 사용자 엔티티
///
/// 시스템의 모든 사용자를 표현하는 핵심 도메인 엔티티입니다.
/// 이메일과 사용자명은 시스템 전체에서 유니크합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 사용자명 (unique)
    pub username: String,
    /// bcrypt로 해시된 비밀번호
    pub password_hash: String,
    /// 표시 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// 프로필 이미지 URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// 사용자 역할
    pub role: UserRole,
    /// 계정 활성화 여부
    pub is_active: bool,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    ///
    /// 기본 역할은 `user`이며 활성 상태로 시작됩니다.
    pub fn new(
        email: String,
        username: String,
        password_hash: String,
        display_name: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            username,
            password_hash,
            display_name,
            avatar: None,
            role: UserRole::User,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    ///
    /// MongoDB ObjectId를 16진수 문자열로 반환합니다.
    /// 아직 저장되지 않은 엔티티는 None을 반환합니다.
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "alice@example.com".to_string(),
            "alice".to_string(),
            "$2b$04$hash".to_string(),
            None,
        );

        assert_eq!(user.role, UserRole::User);
        assert!(user.is_active);
        assert!(user.id.is_none());
        assert!(user.id_string().is_none());
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(UserRole::from_str("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_str("user"), UserRole::User);
        assert_eq!(UserRole::from_str("garbage"), UserRole::User);
        assert_eq!(UserRole::Admin.as_str(), "admin");
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::User.is_admin());
    }
}
