//! Posts HTTP Handlers
//!
//! 포스트 CRUD, 좋아요, 목록/검색 HTTP 엔드포인트를 처리하는
//! 핸들러 함수들입니다.
//!
//! 조회 엔드포인트는 공개이고, 변경 엔드포인트는
//! [`AuthenticatedUser`] 파라미터 선언으로 인증을 요구합니다.
//! 소유권 검사는 서비스 계층에서 수행됩니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use serde_json::json;
use validator::Validate;

use crate::domain::{
    AuthenticatedUser, CreatePostRequest, PageQuery, SearchQuery, UpdatePostRequest,
};
use crate::errors::errors::AppError;
use crate::services::posts::PostService;

/// 포스트 생성 핸들러
///
/// 캡션(≤2000자)과 미디어 참조(≤10개)는 본문 검증에서 거부됩니다.
///
/// # Endpoint
/// `POST /api/posts`
#[post("")]
pub async fn create_post(
    user: AuthenticatedUser,
    payload: web::Json<CreatePostRequest>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let post = post_service.create(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(post))
}

/// 피드 목록 조회 핸들러 (캐시 경유)
///
/// # Endpoint
/// `GET /api/posts?page=1&limit=10`
#[get("")]
pub async fn list_posts(
    query: web::Query<PageQuery>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    let posts = post_service.list_page(&query).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// 캡션 전문 검색 핸들러
///
/// # Endpoint
/// `GET /api/posts/search?q=hello&page=1&limit=10`
#[get("/search")]
pub async fn search_posts(
    query: web::Query<SearchQuery>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let posts = post_service.search(&query.q, &query.pagination()).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// 작성자별 포스트 조회 핸들러
///
/// # Endpoint
/// `GET /api/posts/user/{author_id}?page=1&limit=10`
#[get("/user/{author_id}")]
pub async fn posts_by_author(
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    let author_id = path.into_inner();
    let posts = post_service.find_by_author(&author_id, &query).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// 단일 포스트 조회 핸들러
///
/// # Endpoint
/// `GET /api/posts/{id}`
#[get("/{id}")]
pub async fn get_post(
    path: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    let post = post_service.find_one(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// 포스트 수정 핸들러
///
/// 작성자 본인 또는 관리자만 수정할 수 있으며,
/// 수정 가능한 필드는 캡션뿐입니다.
///
/// # Endpoint
/// `PATCH /api/posts/{id}`
#[patch("/{id}")]
pub async fn update_post(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    // 유효성 검사
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let post = post_service
        .update(&path.into_inner(), payload.into_inner(), &user)
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// 포스트 삭제 핸들러
///
/// 작성자 본인 또는 관리자만 삭제할 수 있습니다.
///
/// # Endpoint
/// `DELETE /api/posts/{id}`
#[delete("/{id}")]
pub async fn delete_post(
    user: AuthenticatedUser,
    path: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    post_service.remove(&path.into_inner(), &user).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "포스트가 삭제되었습니다"
    })))
}

/// 좋아요 토글 핸들러 (멱등)
///
/// # Endpoint
/// `POST /api/posts/{id}/like`
#[post("/{id}/like")]
pub async fn like_post(
    user: AuthenticatedUser,
    path: web::Path<String>,
    post_service: web::Data<PostService>,
) -> Result<HttpResponse, AppError> {
    let post = post_service.toggle_like(&path.into_inner(), &user).await?;

    Ok(HttpResponse::Ok().json(post))
}
