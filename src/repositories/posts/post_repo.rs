//! # 포스트 리포지토리 구현
//!
//! 포스트 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB `posts` 컬렉션에 대한 CRUD, 페이지네이션 조회,
//! 캡션 전문 검색을 제공합니다.
//!
//! ## 조회 규약
//!
//! 모든 목록 조회는 `created_at` 내림차순으로 정렬되며,
//! 오프셋은 호출자가 `(page - 1) * limit`으로 계산하여 전달합니다.

use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, domain::entities::posts::post::Post};
use crate::errors::errors::AppError;

/// `posts` 컬렉션 이름
const COLLECTION_NAME: &str = "posts";

/// 포스트 데이터 액세스 리포지토리
pub struct PostRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl PostRepository {
    /// 새 포스트 리포지토리를 생성합니다.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// `posts` 컬렉션 핸들
    fn collection(&self) -> Collection<Post> {
        self.db.collection::<Post>(COLLECTION_NAME)
    }

    /// ObjectId 문자열 파싱 헬퍼
    fn parse_id(id: &str) -> Result<ObjectId, AppError> {
        ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))
    }

    /// 새 포스트 저장
    ///
    /// # 반환값
    ///
    /// * `Ok(Post)` - 저장된 포스트 (ID 포함)
    pub async fn insert(&self, mut post: Post) -> Result<Post, AppError> {
        let result = self
            .collection()
            .insert_one(&post)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        post.id = result.inserted_id.as_object_id();

        Ok(post)
    }

    /// ID로 포스트 조회
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Post>, AppError> {
        let object_id = Self::parse_id(id)?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 피드 페이지 조회
    ///
    /// 전체 포스트를 `created_at` 내림차순으로 정렬하여
    /// 지정된 오프셋부터 `limit`개를 반환합니다.
    pub async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Post>, AppError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .skip(offset)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 특정 작성자의 포스트 페이지 조회
    pub async fn find_by_author(
        &self,
        author_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, AppError> {
        let author = Self::parse_id(author_id)?;

        let cursor = self
            .collection()
            .find(doc! { "author_id": author })
            .sort(doc! { "created_at": -1 })
            .skip(offset)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 캡션 전문 검색
    ///
    /// MongoDB의 `$text` 연산자를 사용하며, 캡션 텍스트 인덱스가
    /// 필요합니다 ([`PostRepository::create_indexes`] 참고).
    /// 정렬과 페이지네이션 규약은 피드 조회와 동일합니다.
    pub async fn search(
        &self,
        query: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, AppError> {
        let cursor = self
            .collection()
            .find(doc! { "$text": { "$search": query } })
            .sort(doc! { "created_at": -1 })
            .skip(offset)
            .limit(limit as i64)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 캡션 수정
    ///
    /// 원자적 find-and-update로 캡션만 병합하고 수정된 문서를 반환합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(Post))` - 수정된 포스트 (최신 상태)
    /// * `Ok(None)` - 해당 ID의 포스트가 존재하지 않음
    pub async fn update_caption(
        &self,
        id: &str,
        caption: &str,
    ) -> Result<Option<Post>, AppError> {
        let object_id = Self::parse_id(id)?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": {
                    "caption": caption,
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 좋아요 상태 저장
    ///
    /// 엔티티에서 토글된 `liked_by` 집합과 `likes_count`를 함께 기록하여
    /// 불변식 `likes_count == liked_by.len()`이 저장소에서도 유지되도록 합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(Post))` - 저장된 최신 포스트
    /// * `Ok(None)` - 해당 ID의 포스트가 존재하지 않음
    pub async fn save_like_state(&self, post: &Post) -> Result<Option<Post>, AppError> {
        let object_id = post
            .id
            .ok_or_else(|| AppError::InternalError("포스트 ID가 없습니다".to_string()))?;

        let liked_by = to_bson(&post.liked_by)
            .map_err(|e| AppError::InternalError(format!("liked_by 직렬화 실패: {}", e)))?;

        let options = mongodb::options::FindOneAndUpdateOptions::builder()
            .return_document(mongodb::options::ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id },
                doc! { "$set": {
                    "liked_by": liked_by,
                    "likes_count": post.likes_count,
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 포스트 삭제
    ///
    /// # 반환값
    ///
    /// * `Ok(true)` - 포스트가 삭제됨
    /// * `Ok(false)` - 해당 ID의 포스트가 존재하지 않음
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let object_id = Self::parse_id(id)?;

        let result = self
            .collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `author_id` + `created_at` (작성자별 피드 조회)
    /// 2. `created_at` (전체 피드 정렬)
    /// 3. `caption` 텍스트 인덱스 (전문 검색)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection();

        // 작성자별 피드 인덱스
        let author_index = IndexModel::builder()
            .keys(doc! { "author_id": 1, "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("author_created_at".to_string())
                    .build(),
            )
            .build();

        // 전체 피드 정렬 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        // 캡션 전문 검색 인덱스
        let caption_text_index = IndexModel::builder()
            .keys(doc! { "caption": "text" })
            .options(
                IndexOptions::builder()
                    .name("caption_text".to_string())
                    .build(),
            )
            .build();

        collection
            .create_indexes([author_index, created_at_index, caption_text_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
