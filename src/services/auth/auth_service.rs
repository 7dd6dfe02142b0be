//! 인증 오케스트레이션 서비스 구현
//!
//! 회원가입, 로그인, 토큰 갱신, 로그아웃의 전체 흐름을 조율합니다.
//! 사용자 검증은 [`UserService`]에, 토큰 생명주기는 [`TokenService`]에
//! 위임하며 이 서비스는 그 사이의 순서와 실패 의미론만을 책임집니다.
//!
//! ## 인증 방식 디스패치
//!
//! 지원하는 인증 방식은 [`Credentials`] 열거형의 닫힌 집합이며,
//! [`AuthService::authenticate`]의 `match`에서 명시적으로 분기됩니다.
//! 새 인증 방식 추가는 변형 추가와 분기 추가로 이루어집니다.

use std::sync::Arc;

use crate::domain::dto::tokens::response::TokenPairResponse;
use crate::domain::dto::users::request::{LoginRequest, RegisterRequest};
use crate::domain::dto::users::response::{AuthResponse, UserResponse};
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::credentials::Credentials;
use crate::errors::errors::{AppError, AppResult};
use crate::services::auth::token_service::TokenService;
use crate::services::users::user_service::UserService;

/// 인증 오케스트레이션 서비스
pub struct AuthService {
    /// 사용자 관리 서비스
    user_service: Arc<UserService>,
    /// JWT 토큰 서비스
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// 새 인증 서비스를 생성합니다.
    pub fn new(user_service: Arc<UserService>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }

    /// 자격 증명 검증 및 principal 해석
    ///
    /// 태그된 자격 증명을 명시적으로 분기하여 처리합니다.
    ///
    /// * `LocalCredentials` - 이메일/비밀번호 검증 (로그인 경로)
    /// * `BearerToken` - 액세스 토큰 검증: 서명/만료 확인 후
    ///   블랙리스트를 조회합니다 (인증 미들웨어 경로)
    ///
    /// 모든 실패는 `AuthenticationError`로 수렴합니다.
    pub async fn authenticate(&self, credentials: Credentials) -> AppResult<AuthenticatedUser> {
        match credentials {
            Credentials::LocalCredentials { email, password } => {
                let user = self.user_service.verify_password(&email, &password).await?;

                Ok(AuthenticatedUser {
                    user_id: user.id_string().ok_or_else(|| {
                        AppError::InternalError("사용자 ID가 없습니다".to_string())
                    })?,
                    email: user.email,
                    role: user.role,
                })
            }
            Credentials::BearerToken { token } => {
                let claims = self.token_service.verify_access(&token).await?;
                Ok(AuthenticatedUser::from(&claims))
            }
        }
    }

    /// 회원가입
    ///
    /// 계정을 생성하고 곧바로 토큰 쌍을 발급하여
    /// 가입 직후 로그인 상태가 되도록 합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(AuthResponse)` - 사용자 요약 + 토큰 쌍
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        let user = self.user_service.create_user(request).await?;
        let tokens = self.token_service.issue(&user)?;

        log::info!("회원가입 완료 - email: {}", user.email);

        Ok(AuthResponse {
            user: UserResponse::from(user),
            tokens: TokenPairResponse::from(tokens),
        })
    }

    /// 로그인
    ///
    /// 로컬 자격 증명을 검증하고 토큰 쌍을 발급합니다.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .user_service
            .verify_password(&request.email, &request.password)
            .await?;

        let tokens = self.token_service.issue(&user)?;

        log::info!(
            "로그인 성공 - email: {}, id: {}",
            user.email,
            user.id_string().unwrap_or_default()
        );

        Ok(AuthResponse {
            user: UserResponse::from(user),
            tokens: TokenPairResponse::from(tokens),
        })
    }

    /// 토큰 갱신
    ///
    /// 리프레시 토큰의 서명/만료/블랙리스트를 확인한 뒤, 참조된 사용자가
    /// 존재하고 활성 상태인 경우에만 새 토큰 쌍을 발급합니다 (회전).
    ///
    /// 이전 리프레시 토큰은 자동으로 무효화되지 않으며 자연 만료까지
    /// 유효합니다. 의도가 불분명하여 수정하지 않은 기록된 공백입니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(TokenPairResponse)` - 새로 발급된 토큰 쌍
    /// * `Err(AppError::AuthenticationError)` - 토큰 무효/만료/블랙리스트,
    ///   또는 사용자 부재/비활성
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPairResponse> {
        let claims = self.token_service.verify_refresh(refresh_token).await?;

        let user = self
            .user_service
            .find_by_id(&claims.sub)
            .await?
            .filter(|user| user.is_active)
            .ok_or_else(|| {
                log::warn!("갱신 거부 - 사용자 부재 또는 비활성: {}", claims.sub);
                AppError::AuthenticationError(
                    "사용자를 찾을 수 없거나 비활성화된 계정입니다".to_string(),
                )
            })?;

        let tokens = self.token_service.issue(&user)?;

        log::info!("토큰 갱신 성공 - 사용자 ID: {}", claims.sub);

        Ok(TokenPairResponse::from(tokens))
    }

    /// 로그아웃 (항상 성공)
    ///
    /// 토큰 쌍을 블랙리스트에 추가합니다. 액세스 토큰이 없거나 손상되어도,
    /// Redis가 응답하지 않아도 호출자에게는 항상 성공으로 보고됩니다.
    /// 클라이언트의 로컬 상태 정리를 서버가 막지 않기 위한 명시적 정책입니다.
    pub async fn logout(&self, access_token: Option<&str>, refresh_token: &str) {
        self.token_service
            .revoke_on_logout(access_token, refresh_token)
            .await;

        log::info!("로그아웃 처리 완료");
    }
}
