//! Authentication HTTP Handlers
//!
//! 사용자 인증과 관련된 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 회원가입, 로그인, 토큰 갱신, 로그아웃을 지원하며
//! JWT 토큰 기반의 상태 없는 인증을 구현합니다.
//!
//! # Endpoints
//!
//! - `POST /api/auth/register` - 회원가입 (201, 중복 시 409)
//! - `POST /api/auth/login` - 이메일/패스워드 로그인 (401은 단일 메시지)
//! - `POST /api/auth/refresh` - 리프레시 토큰으로 새 토큰 쌍 발급
//! - `POST /api/auth/logout` - 토큰 쌍 블랙리스트 추가 (항상 200)

use actix_web::{post, web, HttpRequest, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::domain::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest};
use crate::errors::errors::AppError;
use crate::services::auth::AuthService;

/// 회원가입 핸들러
///
/// 계정을 생성하고 곧바로 토큰 쌍을 발급합니다.
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(
    payload: web::Json<RegisterRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth_service.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 로그인 핸들러
///
/// 이메일과 패스워드를 사용한 로그인을 처리합니다.
/// 이메일 부재와 비밀번호 불일치는 동일한 401 메시지로 응답합니다.
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = auth_service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신 핸들러
///
/// 리프레시 토큰을 검증하고 새 토큰 쌍을 발급합니다 (회전).
///
/// # Endpoint
/// `POST /api/auth/refresh`
#[post("/refresh")]
pub async fn refresh(
    payload: web::Json<RefreshTokenRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let tokens = auth_service.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// 로그아웃 핸들러
///
/// Authorization 헤더의 액세스 토큰과 본문의 리프레시 토큰을
/// 블랙리스트에 추가합니다. 헤더가 없거나 토큰이 손상되어도
/// 항상 200으로 응답합니다. 로그아웃은 best-effort이며
/// 클라이언트의 로컬 상태 정리를 막지 않습니다.
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(
    req: HttpRequest,
    payload: Option<web::Json<LogoutRequest>>,
    auth_service: web::Data<AuthService>,
) -> HttpResponse {
    // Authorization 헤더에서 액세스 토큰을 관대하게 추출
    let access_token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let refresh_token = payload
        .map(|body| body.into_inner().refresh_token)
        .unwrap_or_default();

    auth_service.logout(access_token, &refresh_token).await;

    HttpResponse::Ok().json(json!({
        "message": "로그아웃이 완료되었습니다"
    }))
}
