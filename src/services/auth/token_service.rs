//! JWT 토큰 관리 서비스 구현
//!
//! JSON Web Token 기반의 인증 시스템을 제공합니다.
//! 액세스 토큰과 리프레시 토큰의 생성, 검증, 무효화를 담당합니다.
//!
//! ## 토큰 클래스
//!
//! | 구분 | 시크릿 | 수명 | 용도 |
//! |------|--------|------|------|
//! | 액세스 토큰 | `JWT_ACCESS_SECRET` | 기본 15분 | API 호출 인가 |
//! | 리프레시 토큰 | `JWT_REFRESH_SECRET` | 기본 7일 | 새 토큰 쌍 발급 |
//!
//! 두 토큰은 서로 다른 시크릿으로 서명되므로 교차 사용이 불가능하며,
//! 클레임 형태는 `{sub, email, role, iat, exp}`로 동일합니다.
//!
//! ## 알려진 한계
//!
//! 갱신 시 새 토큰 쌍이 발급되지만 이전 리프레시 토큰은 자동으로
//! 무효화되지 않습니다. 탈취된 리프레시 토큰은 정상 갱신 이후에도
//! 자연 만료까지 유효합니다 (DESIGN.md 미해결 질문 참고).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtSettings;
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::{TokenClaims, TokenPair};
use crate::errors::errors::{AppError, AppResult};
use crate::services::auth::revocation::TokenRevocationList;

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하여 토큰을 생성하고 검증합니다.
/// 설정과 무효화 리스트는 생성자 주입으로 전달받습니다.
pub struct TokenService {
    /// JWT 서명/만료 설정
    settings: JwtSettings,
    /// 토큰 블랙리스트
    revocation: TokenRevocationList,
}

impl TokenService {
    /// 새 토큰 서비스를 생성합니다.
    pub fn new(settings: JwtSettings, revocation: TokenRevocationList) -> Self {
        Self {
            settings,
            revocation,
        }
    }

    /// 사용자를 위한 토큰 쌍 발급 (액세스 + 리프레시)
    ///
    /// 두 토큰을 각각의 시크릿과 수명으로 독립적으로 서명합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(TokenPair)` - 액세스/리프레시 토큰과 액세스 토큰 수명(초)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 토큰 생성 실패 또는 사용자 ID 없음
    pub fn issue(&self, user: &User) -> AppResult<TokenPair> {
        let access_token = self.sign_for_user(
            user,
            &self.settings.access_secret,
            Duration::minutes(self.settings.access_expires_minutes),
        )?;

        let refresh_token = self.sign_for_user(
            user,
            &self.settings.refresh_secret,
            Duration::days(self.settings.refresh_expires_days),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.settings.access_expires_minutes * 60,
        })
    }

    /// 사용자 정보로 클레임을 구성하고 서명합니다.
    fn sign_for_user(&self, user: &User, secret: &str, lifetime: Duration) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now + lifetime;

        let claims = TokenClaims {
            sub: user
                .id_string()
                .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?,
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(secret.as_ref());

        encode(&header, &claims, &encoding_key)
            .map_err(|e| AppError::InternalError(format!("JWT 토큰 생성 실패: {}", e)))
    }

    /// 서명/만료 검증 후 클레임을 추출합니다.
    ///
    /// 모든 검증 실패는 `AuthenticationError`로 수렴하며
    /// 어떤 검사가 실패했는지는 메시지로만 구분됩니다.
    fn decode_with_secret(&self, token: &str, secret: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()),
            })
    }

    /// 액세스 토큰의 서명/만료를 검증합니다 (블랙리스트 미확인).
    pub fn decode_access(&self, token: &str) -> AppResult<TokenClaims> {
        self.decode_with_secret(token, &self.settings.access_secret)
    }

    /// 리프레시 토큰의 서명/만료를 검증합니다 (블랙리스트 미확인).
    pub fn decode_refresh(&self, token: &str) -> AppResult<TokenClaims> {
        self.decode_with_secret(token, &self.settings.refresh_secret)
    }

    /// 액세스 토큰 검증 (서명/만료 + 블랙리스트)
    ///
    /// 인증 미들웨어가 매 요청마다 호출합니다.
    pub async fn verify_access(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self.decode_access(token)?;

        if self.revocation.is_access_revoked(token).await? {
            return Err(AppError::AuthenticationError(
                "무효화된 토큰입니다".to_string(),
            ));
        }

        Ok(claims)
    }

    /// 리프레시 토큰 검증 (서명/만료 + 블랙리스트)
    ///
    /// 호출자는 검증 성공 후 참조된 사용자의 존재/활성 여부를
    /// 추가로 확인해야 합니다 ([`super::AuthService::refresh`] 참고).
    pub async fn verify_refresh(&self, token: &str) -> AppResult<TokenClaims> {
        let claims = self
            .decode_refresh(token)
            .map_err(|_| {
                AppError::AuthenticationError(
                    "리프레시 토큰이 만료되었거나 유효하지 않습니다".to_string(),
                )
            })?;

        if self.revocation.is_refresh_revoked(token).await? {
            return Err(AppError::AuthenticationError(
                "이미 무효화된 리프레시 토큰입니다".to_string(),
            ));
        }

        Ok(claims)
    }

    /// 로그아웃 시 토큰 쌍을 블랙리스트에 추가합니다.
    ///
    /// 로그아웃은 항상 성공으로 응답해야 하므로 이 메서드는 실패하지 않습니다.
    /// 액세스 토큰의 디코딩 실패는 조용히 무시되고, Redis 오류는
    /// 로그만 남깁니다. 클라이언트가 로컬 상태를 비우는 것을
    /// 서버 측 오류가 막아서는 안 됩니다.
    ///
    /// # TTL 정책
    ///
    /// * 액세스 토큰: `max(0, exp - now)` - 이미 만료되었으면 기록하지 않음
    /// * 리프레시 토큰: 실제 남은 수명과 무관한 고정 7일 창
    pub async fn revoke_on_logout(&self, access_token: Option<&str>, refresh_token: &str) {
        if let Some(access_token) = access_token {
            match self.decode_for_revocation(access_token) {
                Ok(claims) => {
                    let remaining = (claims.exp - Utc::now().timestamp()).max(0) as u64;
                    if let Err(e) = self.revocation.revoke_access(access_token, remaining).await {
                        log::warn!("액세스 토큰 블랙리스트 추가 실패: {}", e);
                    }
                }
                Err(_) => {
                    log::debug!("로그아웃: 액세스 토큰 디코딩 실패, 무시합니다");
                }
            }
        }

        if !refresh_token.is_empty() {
            if let Err(e) = self
                .revocation
                .revoke_refresh(refresh_token, self.settings.refresh_expires_seconds())
                .await
            {
                log::warn!("리프레시 토큰 블랙리스트 추가 실패: {}", e);
            }
        }
    }

    /// 만료 검증 없이 액세스 토큰을 디코딩합니다.
    ///
    /// 로그아웃 경로 전용입니다. 만료된 토큰이라도 `exp` 클레임을
    /// 읽어 남은 TTL을 계산할 수 있어야 합니다.
    fn decode_for_revocation(&self, token: &str) -> AppResult<TokenClaims> {
        let decoding_key = DecodingKey::from_secret(self.settings.access_secret.as_ref());
        let mut validation = Validation::default();
        validation.validate_exp = false;

        decode::<TokenClaims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| AppError::AuthenticationError(format!("토큰 디코딩 실패: {}", e)))
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서
    /// 토큰 부분만을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        if auth_header.starts_with("Bearer ") {
            Ok(&auth_header[7..])
        } else {
            Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::redis::RedisClient;
    use mongodb::bson::oid::ObjectId;
    use std::sync::Arc;

    fn test_settings() -> JwtSettings {
        JwtSettings {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_expires_minutes: 15,
            refresh_expires_days: 7,
        }
    }

    fn test_service() -> TokenService {
        // RedisClient::default()는 연결을 맺지 않으므로
        // 블랙리스트를 건드리지 않는 테스트에서 안전합니다
        TokenService::new(
            test_settings(),
            TokenRevocationList::new(Arc::new(RedisClient::default())),
        )
    }

    fn test_user() -> User {
        let mut user = User::new(
            "alice@example.com".to_string(),
            "alice".to_string(),
            "$2b$04$hash".to_string(),
            None,
        );
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_issue_produces_decodable_pair() {
        let service = test_service();
        let user = test_user();

        let pair = service.issue(&user).unwrap();
        assert_eq!(pair.expires_in, 15 * 60);

        let access_claims = service.decode_access(&pair.access_token).unwrap();
        assert_eq!(access_claims.sub, user.id_string().unwrap());
        assert_eq!(access_claims.email, "alice@example.com");
        assert_eq!(access_claims.role, "user");
        assert_eq!(access_claims.exp - access_claims.iat, 15 * 60);

        let refresh_claims = service.decode_refresh(&pair.refresh_token).unwrap();
        assert_eq!(refresh_claims.sub, access_claims.sub);
        assert_eq!(refresh_claims.exp - refresh_claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_classes_are_not_interchangeable() {
        let service = test_service();
        let pair = service.issue(&test_user()).unwrap();

        // 리프레시 토큰을 액세스 토큰으로 사용할 수 없어야 합니다
        assert!(service.decode_access(&pair.refresh_token).is_err());
        // 반대 방향도 마찬가지입니다
        assert!(service.decode_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = test_service();
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: ObjectId::new().to_hex(),
            email: "old@example.com".to_string(),
            role: "user".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-access-secret".as_ref()),
        )
        .unwrap();

        let err = service.decode_access(&token).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));

        // 로그아웃 경로에서는 만료된 토큰도 디코딩되어야 합니다
        let claims = service.decode_for_revocation(&token).unwrap();
        assert_eq!(claims.exp, now - 3600);
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let service = test_service();
        let user = test_user();

        let foreign = TokenService::new(
            JwtSettings {
                access_secret: "some-other-secret".to_string(),
                ..test_settings()
            },
            TokenRevocationList::new(Arc::new(RedisClient::default())),
        );

        let pair = foreign.issue(&user).unwrap();
        assert!(service.decode_access(&pair.access_token).is_err());
    }

    #[test]
    fn test_issue_requires_persisted_user() {
        let service = test_service();
        let user = User::new(
            "ghost@example.com".to_string(),
            "ghost".to_string(),
            "$2b$04$hash".to_string(),
            None,
        );

        assert!(service.issue(&user).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        let service = test_service();

        assert_eq!(
            service.extract_bearer_token("Bearer abc.def.ghi").unwrap(),
            "abc.def.ghi"
        );
        assert!(service.extract_bearer_token("Basic abc").is_err());
        assert!(service.extract_bearer_token("abc.def.ghi").is_err());
    }
}
