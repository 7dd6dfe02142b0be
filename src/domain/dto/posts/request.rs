//! 포스트 요청 DTO
//!
//! 포스트 생성/수정 본문과 목록/검색 쿼리 파라미터를 매핑합니다.
//! 캡션 길이(≤2000자)와 미디어 개수(≤10개) 제한은 이 경계에서 검증되어
//! 비즈니스 로직에 도달하기 전에 거부됩니다.

use serde::Deserialize;
use validator::Validate;

/// 기본 페이지 번호
const DEFAULT_PAGE: u64 = 1;
/// 기본 페이지 크기
const DEFAULT_LIMIT: u64 = 10;

/// 포스트 생성 요청 DTO
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// 캡션 (최대 2000자)
    #[validate(length(max = 2000, message = "캡션은 최대 2000자입니다"))]
    pub caption: String,

    /// 미디어 참조 목록 (최대 10개)
    #[serde(default)]
    #[validate(length(max = 10, message = "미디어는 최대 10개까지 첨부할 수 있습니다"))]
    pub media_urls: Vec<String>,
}

/// 포스트 수정 요청 DTO
///
/// 수정 가능한 필드는 캡션뿐입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(max = 2000, message = "캡션은 최대 2000자입니다"))]
    pub caption: Option<String>,
}

/// 목록 조회 쿼리 파라미터
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// 페이지 번호 (1 미만은 1로 보정)
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// 페이지 크기 (0은 기본값으로 보정)
    pub fn limit(&self) -> u64 {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            DEFAULT_LIMIT
        } else {
            limit
        }
    }

    /// 조회 시작 오프셋: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// 검색 쿼리 파라미터
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchQuery {
    /// 검색어
    #[validate(length(min = 1, message = "검색어를 입력해주세요"))]
    pub q: String,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl SearchQuery {
    /// 페이지네이션 파라미터로 변환
    pub fn pagination(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_boundary_2000_accepted() {
        let req = CreatePostRequest {
            caption: "a".repeat(2000),
            media_urls: vec![],
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_caption_boundary_2001_rejected() {
        let req = CreatePostRequest {
            caption: "a".repeat(2001),
            media_urls: vec![],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_media_boundary_10_accepted() {
        let req = CreatePostRequest {
            caption: "hello".to_string(),
            media_urls: (0..10).map(|i| format!("media-{}", i)).collect(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_media_boundary_11_rejected() {
        let req = CreatePostRequest {
            caption: "hello".to_string(),
            media_urls: (0..11).map(|i| format!("media-{}", i)).collect(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_caption_2001_rejected() {
        let req = UpdatePostRequest {
            caption: Some("a".repeat(2001)),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery {
            page: None,
            limit: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_query_offset() {
        let query = PageQuery {
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_page_query_sanitizes_zero() {
        let query = PageQuery {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);
    }
}
