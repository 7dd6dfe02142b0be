//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층을 담당하는 리포지토리입니다.
//! MongoDB `users` 컬렉션에 대한 CRUD 연산과 유니크 제약 조건 관리를 제공합니다.
//!
//! ## 데이터 무결성
//!
//! - **이메일 유니크성**: 동일한 이메일로 두 번째 계정 생성 불가
//! - **사용자명 유니크성**: 동일한 사용자명으로 두 번째 계정 생성 불가
//!
//! 중복 검사는 저장 전에 수행되며, 인덱스가 최후의 방어선 역할을 합니다.

use std::sync::Arc;

use mongodb::{
    bson::{doc, oid::ObjectId},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{db::Database, domain::entities::users::user::User};
use crate::errors::errors::AppError;

/// `users` 컬렉션 이름
const COLLECTION_NAME: &str = "users";

/// 사용자 데이터 액세스 리포지토리
///
/// 생성자 주입으로 데이터베이스 핸들을 전달받습니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(database.clone());
/// let user = repo.find_by_email("alice@example.com").await?;
/// ```
pub struct UserRepository {
    /// MongoDB 데이터베이스 연결
    db: Arc<Database>,
}

impl UserRepository {
    /// 새 사용자 리포지토리를 생성합니다.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// `users` 컬렉션 핸들
    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(COLLECTION_NAME)
    }

    /// 이메일 주소로 사용자 조회
    ///
    /// # 인자
    ///
    /// * `email` - 조회할 사용자의 이메일 주소
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 이메일의 사용자가 없는 경우
    /// * `Err(AppError)` - 데이터베이스 오류
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 사용자명으로 사용자 조회
    ///
    /// 사용자명은 시스템 전체에서 유니크하므로 최대 1개의 결과만 반환됩니다.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.collection()
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// ID로 사용자 조회
    ///
    /// # 인자
    ///
    /// * `id` - MongoDB ObjectId의 16진수 문자열 표현
    ///
    /// # 반환값
    ///
    /// * `Ok(Some(User))` - 사용자를 찾은 경우
    /// * `Ok(None)` - 해당 ID의 사용자가 없는 경우
    /// * `Err(AppError::ValidationError)` - 잘못된 ObjectId 형식
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| AppError::ValidationError("유효하지 않은 ID 형식입니다".to_string()))?;

        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 생성
    ///
    /// 이메일과 사용자명의 중복 여부를 사전에 검증한 후 저장합니다.
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    /// * `Err(AppError::DatabaseError)` - 데이터베이스 오류
    pub async fn create(&self, mut user: User) -> Result<User, AppError> {
        // 중복 확인
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 이메일입니다".to_string(),
            ));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError(
                "이미 사용 중인 사용자명입니다".to_string(),
            ));
        }

        // DB에 저장
        let result = self
            .collection()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        user.id = result.inserted_id.as_object_id();

        Ok(user)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행하여 유니크 제약과
    /// 조회 성능을 보장합니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. `email` (오름차순, UNIQUE)
    /// 2. `username` (오름차순, UNIQUE)
    /// 3. `created_at` (내림차순)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let collection = self.collection();

        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        // 사용자명 유니크 인덱스
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        // 생성일 인덱스
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        collection
            .create_indexes([email_index, username_index, created_at_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
