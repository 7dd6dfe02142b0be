//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 생성, 조회, 비밀번호 검증을 담당하는 비즈니스 로직입니다.
//!
//! ## 보안 설계 원칙
//!
//! ### 1. 비밀번호 보안
//!
//! - **bcrypt 해싱**: 적응형 해시 함수로 무차별 대입 공격 방지
//! - **환경별 Cost**: 개발(4) vs 운영(12) 환경별 보안 강도
//! - **솔트 자동 생성**: 레인보우 테이블 공격 방지
//!
//! ### 2. 계정 존재 오라클 차단
//!
//! 로그인 실패 시 "이메일 없음"과 "비밀번호 틀림"은 동일한 메시지로
//! 응답합니다. 존재하지 않는 이메일에 대해서도 더미 해시에 대한
//! bcrypt 비교를 수행하여 두 실패 경로의 작업량을 비슷하게 유지합니다.
//!
//! ### 3. 데이터 보안
//!
//! - **민감 정보 제거**: DTO 변환 시 비밀번호 해시 제외
//! - **중복 방지**: 이메일, 사용자명 유니크 제약

use std::sync::Arc;

use bcrypt::hash;

use crate::config::PasswordConfig;
use crate::domain::dto::users::request::RegisterRequest;
use crate::domain::entities::users::user::User;
use crate::errors::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::UserRepository;
use crate::utils::string_utils::clean_optional_string;

/// 로그인 실패 시 공통으로 사용하는 메시지
///
/// 어떤 검사가 실패했는지 노출하지 않습니다.
const INVALID_CREDENTIALS: &str = "잘못된 이메일 또는 비밀번호입니다";

/// 존재하지 않는 이메일에 대한 작업량 균등화용 더미 해시
///
/// "password"가 아닌 임의 입력과 절대 일치하지 않는 유효한 bcrypt 해시입니다.
const DUMMY_PASSWORD_HASH: &str = "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewKyNiLF9U5e2zCy";

/// 사용자 관리 비즈니스 로직 서비스
///
/// 생성자 주입으로 리포지토리를 전달받습니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let user_service = UserService::new(user_repo.clone());
///
/// let user = user_service.create_user(request).await?;
/// let verified = user_service.verify_password("alice@example.com", "secret").await?;
/// ```
pub struct UserService {
    /// 사용자 데이터 액세스 리포지토리
    user_repo: Arc<UserRepository>,
}

impl UserService {
    /// 새 사용자 서비스를 생성합니다.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// 새 사용자 계정 생성
    ///
    /// # 처리 과정
    ///
    /// 1. 비밀번호 해싱 (bcrypt, 환경별 cost)
    /// 2. 표시 이름 정리 (빈 문자열은 None으로)
    /// 3. 엔티티 생성 및 저장 (중복 검사는 리포지토리에서)
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 생성된 사용자 (ID 포함)
    /// * `Err(AppError::ConflictError)` - 이메일 또는 사용자명 중복
    /// * `Err(AppError::InternalError)` - 비밀번호 해싱 실패
    pub async fn create_user(&self, request: RegisterRequest) -> AppResult<User> {
        let password_hash = hash(&request.password, PasswordConfig::bcrypt_cost())
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;

        let user = User::new(
            request.email,
            request.username,
            password_hash,
            clean_optional_string(request.display_name),
        );

        let created = self.user_repo.create(user).await?;

        log::info!(
            "새 사용자 생성 완료 - username: {}, id: {}",
            created.username,
            created.id_string().unwrap_or_default()
        );

        Ok(created)
    }

    /// ID로 사용자 조회
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.user_repo.find_by_id(id).await
    }

    /// 이메일/비밀번호 검증
    ///
    /// # 보안 특징
    ///
    /// - 이메일이 존재하지 않아도 더미 해시에 대해 bcrypt 비교를 수행하여
    ///   두 실패 경로의 응답 시간 차이를 줄입니다
    /// - 실패 사유와 무관하게 동일한 메시지를 반환합니다
    ///
    /// # 반환값
    ///
    /// * `Ok(User)` - 인증된 사용자
    /// * `Err(AppError::AuthenticationError)` - 이메일 없음 또는 비밀번호 불일치
    pub async fn verify_password(&self, email: &str, password: &str) -> AppResult<User> {
        let user = match self.user_repo.find_by_email(email).await? {
            Some(user) => user,
            None => {
                // 작업량 균등화: 존재하지 않는 계정에도 해시 비교 수행
                let _ = bcrypt::verify(password, DUMMY_PASSWORD_HASH);
                return Err(AppError::AuthenticationError(
                    INVALID_CREDENTIALS.to_string(),
                ));
            }
        };

        let is_valid = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !is_valid {
            log::warn!("로그인 실패 - email: {}", email);
            return Err(AppError::AuthenticationError(
                INVALID_CREDENTIALS.to_string(),
            ));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dummy_hash_is_well_formed() {
        // 더미 해시가 bcrypt 파서를 통과해야 작업량 균등화가 성립합니다
        let result = bcrypt::verify("any-password", DUMMY_PASSWORD_HASH);
        assert!(result.is_ok());
        assert!(!result.unwrap());
    }

    #[test]
    fn test_invalid_credentials_message_is_single() {
        // 실패 경로가 공유하는 메시지는 하나뿐이어야 합니다
        assert_eq!(INVALID_CREDENTIALS, "잘못된 이메일 또는 비밀번호입니다");
    }
}
