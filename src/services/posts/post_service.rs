//! # 포스트 관리 서비스 구현
//!
//! 포스트의 생성, 수정, 삭제, 좋아요 토글, 목록 조회, 검색을 담당하는
//! 비즈니스 로직입니다. 저장소 변경 → 피드 캐시 무효화 → 실시간 이벤트
//! 브로드캐스트의 순서를 보장합니다.
//!
//! ## 순서 보장
//!
//! 피드 캐시 무효화는 변경 연산이 저장소에 반영된 직후, 핸들러가
//! 응답을 반환하기 전에 같은 경로에서 `await`됩니다. fire-and-forget이
//! 아니므로 이미 응답된 쓰기 이후의 목록 조회는 변경 전 캐시를
//! 관찰하지 않습니다. 요청 사이의 교차(캐시 미스의 늦은 쓰기)는
//! TTL로만 제한됩니다 ([`crate::caching::feed_cache`] 참고).
//!
//! ## 소유권 규칙
//!
//! 수정과 삭제는 작성자 본인 또는 관리자에게만 허용됩니다.
//! 좋아요 토글과 조회에는 소유권 제한이 없습니다.

use std::sync::Arc;

use serde_json::json;

use crate::caching::feed_cache::FeedCache;
use crate::domain::dto::posts::request::{CreatePostRequest, PageQuery, UpdatePostRequest};
use crate::domain::dto::posts::response::PostResponse;
use crate::domain::entities::posts::post::Post;
use crate::domain::models::auth::authenticated_user::AuthenticatedUser;
use crate::errors::errors::{AppError, AppResult, ErrorContext};
use crate::realtime::events;
use crate::realtime::hub::RealtimeHub;
use crate::repositories::posts::post_repo::PostRepository;

/// 포스트 부재 시 공통 메시지
const POST_NOT_FOUND: &str = "포스트를 찾을 수 없습니다";

/// 포스트 관리 비즈니스 로직 서비스
///
/// 생성자 주입으로 리포지토리, 피드 캐시, 실시간 허브를 전달받습니다.
pub struct PostService {
    /// 포스트 데이터 액세스 리포지토리
    post_repo: Arc<PostRepository>,
    /// 페이지네이션된 피드 캐시
    feed_cache: Arc<FeedCache>,
    /// 실시간 이벤트 허브
    hub: Arc<RealtimeHub>,
}

impl PostService {
    /// 새 포스트 서비스를 생성합니다.
    pub fn new(
        post_repo: Arc<PostRepository>,
        feed_cache: Arc<FeedCache>,
        hub: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            post_repo,
            feed_cache,
            hub,
        }
    }

    /// 새 포스트 생성
    ///
    /// 저장 후 피드 캐시를 무효화하고 `post-created` 이벤트를
    /// 전역 브로드캐스트합니다.
    pub async fn create(
        &self,
        author: &AuthenticatedUser,
        request: CreatePostRequest,
    ) -> AppResult<PostResponse> {
        let author_id = author.object_id()?;

        let post = Post::new(author_id, request.caption, request.media_urls);
        let created = self.post_repo.insert(post).await?;

        self.feed_cache.invalidate_all().await?;

        let response = PostResponse::from(created);
        self.hub.broadcast_all(
            events::POST_CREATED,
            serde_json::to_value(&response).context("이벤트 직렬화 실패")?,
        );

        log::info!(
            "포스트 생성 완료 - id: {}, author: {}",
            response.id,
            response.author_id
        );

        Ok(response)
    }

    /// 피드 페이지 조회 (캐시 경유)
    ///
    /// 캐시 히트 시 저장소를 건너뛰고, 미스 시 저장소에서 재계산한 뒤
    /// TTL 300초로 캐시에 적재합니다.
    pub async fn list_page(&self, query: &PageQuery) -> AppResult<Vec<PostResponse>> {
        let page = query.page();
        let limit = query.limit();

        if let Some(cached) = self.feed_cache.get_page(page, limit).await {
            log::debug!("피드 캐시 히트 - page: {}, limit: {}", page, limit);
            return Ok(cached);
        }

        let posts = self.post_repo.find_page(query.offset(), limit).await?;
        let responses: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();

        self.feed_cache.store_page(page, limit, &responses).await;

        Ok(responses)
    }

    /// 단일 포스트 조회
    pub async fn find_one(&self, id: &str) -> AppResult<PostResponse> {
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        Ok(PostResponse::from(post))
    }

    /// 특정 작성자의 포스트 페이지 조회 (캐시 미경유)
    pub async fn find_by_author(
        &self,
        author_id: &str,
        query: &PageQuery,
    ) -> AppResult<Vec<PostResponse>> {
        let posts = self
            .post_repo
            .find_by_author(author_id, query.offset(), query.limit())
            .await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// 캡션 전문 검색 (캐시 미경유)
    pub async fn search(&self, q: &str, query: &PageQuery) -> AppResult<Vec<PostResponse>> {
        let posts = self
            .post_repo
            .search(q, query.offset(), query.limit())
            .await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    /// 포스트 수정 (캡션 화이트리스트 병합)
    ///
    /// 작성자 본인 또는 관리자만 수정할 수 있습니다.
    /// 저장 후 피드 캐시를 무효화하고 `post-updated` 이벤트를
    /// 해당 포스트 룸에 브로드캐스트합니다.
    pub async fn update(
        &self,
        id: &str,
        request: UpdatePostRequest,
        requester: &AuthenticatedUser,
    ) -> AppResult<PostResponse> {
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        self.check_ownership(&post, requester, "자신의 포스트만 수정할 수 있습니다")?;

        let caption = request.caption.unwrap_or_else(|| post.caption.clone());

        let updated = self
            .post_repo
            .update_caption(id, &caption)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        self.feed_cache.invalidate_all().await?;

        let response = PostResponse::from(updated);
        self.hub.broadcast_room(
            &events::post_room(&response.id),
            events::POST_UPDATED,
            serde_json::to_value(&response).context("이벤트 직렬화 실패")?,
        );

        log::info!("포스트 수정 완료 - id: {}", response.id);

        Ok(response)
    }

    /// 포스트 삭제
    ///
    /// 작성자 본인 또는 관리자만 삭제할 수 있습니다.
    /// 삭제 후 피드 캐시를 무효화하고 `post-deleted` 이벤트를
    /// 전역 브로드캐스트합니다.
    pub async fn remove(&self, id: &str, requester: &AuthenticatedUser) -> AppResult<()> {
        let post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        self.check_ownership(&post, requester, "자신의 포스트만 삭제할 수 있습니다")?;

        self.post_repo.delete(id).await?;

        self.feed_cache.invalidate_all().await?;

        self.hub
            .broadcast_all(events::POST_DELETED, json!({ "post_id": id }));

        log::info!("포스트 삭제 완료 - id: {}", id);

        Ok(())
    }

    /// 좋아요 토글 (멱등)
    ///
    /// 토글 결과를 저장한 뒤 `post-liked` 이벤트를 해당 포스트 룸에
    /// 브로드캐스트합니다. 좋아요는 피드 캐시를 무효화하지 않으므로
    /// 캐시된 페이지의 좋아요 수는 최대 TTL만큼 뒤처질 수 있습니다.
    pub async fn toggle_like(
        &self,
        id: &str,
        requester: &AuthenticatedUser,
    ) -> AppResult<PostResponse> {
        let mut post = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        let user_id = requester.object_id()?;
        let liked = post.toggle_like(&user_id);

        let saved = self
            .post_repo
            .save_like_state(&post)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))?;

        let response = PostResponse::from(saved);
        self.hub.broadcast_room(
            &events::post_room(&response.id),
            events::POST_LIKED,
            json!({
                "post_id": response.id,
                "user_id": requester.user_id,
                "likes_count": response.likes_count,
                "liked": liked,
            }),
        );

        Ok(response)
    }

    /// 소유권 검사
    ///
    /// 작성자 본인 또는 관리자가 아니면 `AuthorizationError`를 반환합니다.
    fn check_ownership(
        &self,
        post: &Post,
        requester: &AuthenticatedUser,
        message: &str,
    ) -> AppResult<()> {
        let requester_id = requester.object_id()?;

        if !post.is_editable_by(&requester_id, requester.is_admin()) {
            log::warn!(
                "소유권 위반 - post: {}, requester: {}",
                post.id_string().unwrap_or_default(),
                requester.user_id
            );
            return Err(AppError::AuthorizationError(message.to_string()));
        }

        Ok(())
    }
}
