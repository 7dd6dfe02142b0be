//! AuthMiddleware 인증 로직의 핵심적인 기능

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::domain::models::auth::credentials::Credentials;
use crate::errors::errors::AppError;
use crate::middlewares::auth_middleware::AuthMode;
use crate::services::auth::auth_service::AuthService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();

        Box::pin(async move {
            // Bearer 토큰 검증 시도
            let auth_result = authenticate_request(&req).await;

            match (&mode, auth_result) {
                // Required 모드에서 인증 실패
                (AuthMode::Required, Err(err)) => {
                    log::warn!("인증 실패: {}", err);
                    let response = HttpResponse::Unauthorized().json(serde_json::json!({
                        "error": "유효한 인증 토큰이 필요합니다"
                    }));
                    let (req, _) = req.into_parts();
                    let res = ServiceResponse::new(req, response).map_into_right_body();
                    return Ok(res);
                }
                // 인증 성공: principal을 Request Extensions에 저장
                (_, Ok(user)) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                // Optional 모드에서 인증 실패 (진행 허용)
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("선택적 인증: 유효한 토큰 없음, 요청 진행");
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 요청에서 Bearer 토큰을 추출하고 AuthService로 검증
///
/// AuthService는 애플리케이션 구성 시 `web::Data`로 등록되며,
/// 태그된 자격 증명(`Credentials::BearerToken`)으로 명시적으로
/// 디스패치됩니다.
async fn authenticate_request(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let auth_service = req
        .app_data::<web::Data<AuthService>>()
        .ok_or_else(|| {
            AppError::InternalError("AuthService가 등록되지 않았습니다".to_string())
        })?;

    // Authorization 헤더 추출
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string())
        })?;

    // Bearer 토큰 추출
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())
    })?;

    // 토큰 검증 및 principal 해석 (블랙리스트 조회 포함)
    auth_service.authenticate(Credentials::bearer(token)).await
}
