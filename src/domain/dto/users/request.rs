//! 사용자 요청 DTO
//!
//! 회원가입과 로그인 요청의 데이터 구조를 정의합니다.
//! 클라이언트 입력 데이터의 검증과 타입 안전성을 보장합니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};

/// 회원가입 요청 DTO
///
/// JSON 역직렬화와 입력 검증을 자동으로 수행합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// 사용자 이메일 주소 (RFC 5322 표준)
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    /// 사용자명 (3-30자, 영문/숫자/언더스코어만 허용)
    #[validate(length(min = 3, max = 30, message = "사용자명은 3-30자 사이여야 합니다"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    /// 계정 비밀번호 (최소 8자)
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    /// 표시 이름 (선택, 최대 50자)
    #[validate(length(max = 50, message = "표시 이름은 최대 50자입니다"))]
    pub display_name: Option<String>,
}

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명은 알파벳, 숫자, 언더스코어만 사용 가능합니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            email: "alice@example.com".to_string(),
            username: "alice_01".to_string(),
            password: "Secret1234".to_string(),
            display_name: Some("Alice".to_string()),
        }
    }

    #[test]
    fn test_valid_register_passes() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = valid_register();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_username_charset_rejected() {
        let mut req = valid_register();
        req.username = "alice!".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_short_username_rejected() {
        let mut req = valid_register();
        req.username = "ab".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_short_password_rejected() {
        let mut req = valid_register();
        req.password = "short".to_string();
        assert!(req.validate().is_err());
    }
}
