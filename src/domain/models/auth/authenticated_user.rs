//! 인증된 사용자 principal
//!
//! 인증 미들웨어가 토큰 검증 후 요청 컨텍스트에 첨부하는 타입드 principal입니다.
//! 핸들러는 이 타입을 명시적인 파라미터로 선언하여 전달받습니다.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::domain::entities::users::user::UserRole;
use crate::domain::models::token::token::TokenClaims;
use crate::errors::errors::{AppError, AppResult};

/// 인증된 요청의 principal
///
/// 토큰 클레임에서 추출된 최소한의 사용자 정보만을 담습니다.
/// 최신 사용자 상태가 필요하면 핸들러에서 저장소를 조회합니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// 사용자 ID (ObjectId 16진수 문자열)
    pub user_id: String,
    /// 사용자 이메일
    pub email: String,
    /// 사용자 역할
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// 관리자 여부
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// 사용자 ID를 ObjectId로 파싱합니다.
    pub fn object_id(&self) -> AppResult<ObjectId> {
        ObjectId::parse_str(&self.user_id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 사용자 ID 형식입니다".to_string()))
    }
}

impl From<&TokenClaims> for AuthenticatedUser {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub.clone(),
            email: claims.email.clone(),
            role: UserRole::from_str(&claims.role),
        }
    }
}

/// Request Extensions에서 principal을 꺼내는 추출기
///
/// 인증 미들웨어가 principal을 첨부하지 않은 요청에서는
/// 401 Unauthorized로 거부됩니다. 선택적 인증 스코프의 핸들러가
/// 이 파라미터를 선언하면 해당 핸들러만 인증을 요구하게 됩니다.
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                AppError::AuthenticationError("유효한 인증 토큰이 필요합니다".to_string())
            });

        ready(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claims() {
        let claims = TokenClaims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            email: "alice@example.com".to_string(),
            role: "admin".to_string(),
            iat: 0,
            exp: 0,
        };

        let user = AuthenticatedUser::from(&claims);
        assert_eq!(user.user_id, "507f1f77bcf86cd799439011");
        assert!(user.is_admin());
        assert!(user.object_id().is_ok());
    }

    #[test]
    fn test_unknown_role_defaults_to_user() {
        let claims = TokenClaims {
            sub: "507f1f77bcf86cd799439011".to_string(),
            email: "bob@example.com".to_string(),
            role: "superuser".to_string(),
            iat: 0,
            exp: 0,
        };

        let user = AuthenticatedUser::from(&claims);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_invalid_object_id_rejected() {
        let user = AuthenticatedUser {
            user_id: "not-hex".to_string(),
            email: "bob@example.com".to_string(),
            role: UserRole::User,
        };

        assert!(user.object_id().is_err());
    }
}
