//! Users HTTP Handlers
//!
//! 사용자 프로필 관련 HTTP 엔드포인트를 처리하는 핸들러 함수들입니다.

use actix_web::{get, web, HttpResponse};

use crate::domain::{AuthenticatedUser, UserResponse};
use crate::errors::errors::AppError;
use crate::services::users::UserService;

/// 현재 인증된 사용자 정보 조회 핸들러
///
/// 미들웨어가 첨부한 principal로 데이터베이스에서 최신 사용자 정보를
/// 조회하여 반환합니다. 비밀번호 해시는 응답에서 제외됩니다.
/// 토큰은 유효하지만 사용자 레코드가 사라진 경우 `null`을 반환합니다.
///
/// # Endpoint
/// `GET /api/users/me`
#[get("/me")]
pub async fn get_me(
    user: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let found = user_service.find_by_id(&user.user_id).await?;

    match found {
        Some(record) => Ok(HttpResponse::Ok().json(UserResponse::from(record))),
        None => Ok(HttpResponse::Ok().json(serde_json::Value::Null)),
    }
}
