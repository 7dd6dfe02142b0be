//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 토큰을 검증하고
//! 타입드 principal을 요청 컨텍스트에 첨부합니다.
//!
//! ## 동작 모드
//!
//! - `Required` - 검증 실패 시 401로 즉시 거부
//! - `Optional` - 검증 실패 시 principal 없이 통과. 변경 핸들러가
//!   [`crate::domain::AuthenticatedUser`] 파라미터를 선언하여
//!   핸들러 단위로 인증을 요구합니다
//!
//! 토큰 검증은 `web::Data`로 등록된 [`crate::services::auth::AuthService`]에
//! 위임되며, 서명/만료 확인과 블랙리스트 조회를 모두 수행합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 모드 (Required/Optional)
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 유효한 토큰이 없으면 요청을 거부합니다
    Required,
    /// 토큰이 없거나 무효해도 요청을 통과시킵니다
    Optional,
}

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드
    mode: AuthMode,
}

impl AuthMiddleware {
    /// 새로운 인증 미들웨어 생성
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_modes() {
        assert_eq!(AuthMiddleware::required().mode, AuthMode::Required);
        assert_eq!(AuthMiddleware::optional().mode, AuthMode::Optional);
    }
}
