//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증, 사용자, 포스트 라우트와 WebSocket, 헬스체크 엔드포인트를 포함합니다.
//!
//! # Auth Middleware Usage
//!
//! 라우트 그룹에 따라 다른 인증 레벨을 적용합니다:
//!
//! ## 인증 불필요 (Public 라우트)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/auth")
//!         .service(handlers::auth::login)     // 로그인 자체는 인증 불필요
//!         .service(handlers::auth::register)  // 회원가입은 인증 불필요
//! );
//! ```
//!
//! ## 필수 인증
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/users")
//!         .wrap(AuthMiddleware::required())
//!         .service(handlers::users::get_me)
//! );
//! ```
//!
//! ## 선택적 인증 (조회는 공개, 변경은 핸들러 단위 요구)
//! ```rust,ignore
//! cfg.service(
//!     web::scope("/api/posts")
//!         .wrap(AuthMiddleware::optional())
//!         .service(handlers::posts::list_posts)   // principal 불필요
//!         .service(handlers::posts::create_post)  // AuthenticatedUser 파라미터로 요구
//! );
//! ```

use actix_web::web;
use serde_json::json;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// 기능별로 분할된 라우트들을 통합하여 애플리케이션에 등록합니다.
///
/// # Arguments
///
/// * `cfg` - Actix-web 서비스 설정 객체
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // WebSocket endpoint
    cfg.service(handlers::realtime::ws_connect);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_post_routes(cfg);
}

/// 인증 관련 라우트를 설정합니다
///
/// 모든 인증 라우트는 Public 접근이 가능합니다
/// (인증을 위한 엔드포인트이므로). 로그아웃도 미들웨어를 거치지
/// 않습니다. 손상된 토큰으로도 항상 성공해야 하기 때문입니다.
///
/// # Available Routes
///
/// - `POST /api/auth/register` - 회원가입
/// - `POST /api/auth/login` - 이메일/비밀번호 로그인
/// - `POST /api/auth/refresh` - 토큰 갱신
/// - `POST /api/auth/logout` - 로그아웃 (항상 200)
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh)
            .service(handlers::auth::logout),
    );
}

/// 사용자 관련 라우트를 설정합니다
///
/// # Available Routes
///
/// - `GET /api/users/me` - 현재 사용자 조회 (인증 필수)
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_me),
    );
}

/// 포스트 관련 라우트를 설정합니다
///
/// 선택적 인증 미들웨어를 사용합니다. 조회 엔드포인트는 공개이고,
/// 변경 핸들러는 `AuthenticatedUser` 파라미터로 인증을 요구합니다.
///
/// 정적 경로(`/search`, `/user/{author_id}`)는 동적 경로(`/{id}`)보다
/// 먼저 등록되어야 합니다.
///
/// # Available Routes
///
/// - `POST   /api/posts` - 포스트 생성 (인증)
/// - `GET    /api/posts` - 피드 목록 (캐시 경유)
/// - `GET    /api/posts/search?q=` - 캡션 검색
/// - `GET    /api/posts/user/{author_id}` - 작성자별 목록
/// - `GET    /api/posts/{id}` - 단일 조회
/// - `PATCH  /api/posts/{id}` - 수정 (소유권 검사)
/// - `DELETE /api/posts/{id}` - 삭제 (소유권 검사)
/// - `POST   /api/posts/{id}/like` - 좋아요 토글 (인증)
fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/posts")
            .wrap(AuthMiddleware::optional())
            .service(handlers::posts::create_post)
            .service(handlers::posts::list_posts)
            .service(handlers::posts::search_posts)
            .service(handlers::posts::posts_by_author)
            .service(handlers::posts::like_post)
            .service(handlers::posts::get_post)
            .service(handlers::posts::update_post)
            .service(handlers::posts::delete_post),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// # Examples
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "social_feed_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "realtime": "WebSocket"
        }
    }))
}
