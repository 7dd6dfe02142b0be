//! Post Entity Implementation
//!
//! 포스트 엔티티와 좋아요 토글 도메인 로직을 구현합니다.
//!
//! ## 불변식
//!
//! `likes_count`는 항상 `liked_by` 집합의 크기와 같아야 합니다.
//! 이 불변식을 한 곳에서 지키기 위해 좋아요 상태 변경은
//! 반드시 [`Post::toggle_like`]를 통해서만 수행합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 포스트 엔티티
///
/// 캡션과 미디어 참조 목록, 좋아요 상태를 가지는 피드의 기본 단위입니다.
/// 별도의 상태 필드는 없으며, 존재 여부와 사용자별 좋아요 멤버십만이
/// 상태 전이의 전부입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 작성자 참조 (User id)
    pub author_id: ObjectId,
    /// 캡션 (최대 2000자, DTO 경계에서 검증)
    pub caption: String,
    /// 미디어 참조 목록 (최대 10개, DTO 경계에서 검증)
    pub media_urls: Vec<String>,
    /// 좋아요 수 (== liked_by.len())
    pub likes_count: i64,
    /// 댓글 수 (이 시스템 범위에서는 항상 0)
    pub comments_count: i64,
    /// 좋아요를 누른 사용자 id 집합
    pub liked_by: Vec<ObjectId>,
    /// 생성 시간
    pub created_at: DateTime,
    /// 수정 시간
    pub updated_at: DateTime,
}

impl Post {
    /// 새 포스트 생성
    pub fn new(author_id: ObjectId, caption: String, media_urls: Vec<String>) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            author_id,
            caption,
            media_urls,
            likes_count: 0,
            comments_count: 0,
            liked_by: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// ID 문자열로 변환
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_hex())
    }

    /// 요청자가 이 포스트를 수정/삭제할 수 있는지 확인합니다.
    ///
    /// 작성자 본인이거나 관리자인 경우에만 허용됩니다.
    pub fn is_editable_by(&self, requester_id: &ObjectId, is_admin: bool) -> bool {
        is_admin || &self.author_id == requester_id
    }

    /// 좋아요 토글 (멱등)
    ///
    /// `user_id`가 이미 `liked_by`에 있으면 제거하고 카운트를 감소시키며
    /// (0 미만으로 내려가지 않음), 없으면 추가하고 증가시킵니다.
    /// `liked_by`는 진짜 집합으로 취급됩니다. 같은 사용자의 반복 좋아요는
    /// 중간에 취소가 없는 한 중복 항목을 만들지 않습니다.
    ///
    /// # 반환값
    ///
    /// * `true` - 토글 결과 좋아요 상태가 됨
    /// * `false` - 토글 결과 좋아요가 취소됨
    pub fn toggle_like(&mut self, user_id: &ObjectId) -> bool {
        let already_liked = self.liked_by.contains(user_id);

        if already_liked {
            self.liked_by.retain(|id| id != user_id);
            self.likes_count = (self.likes_count - 1).max(0);
        } else {
            self.liked_by.push(*user_id);
            self.likes_count += 1;
        }

        self.updated_at = DateTime::now();
        !already_liked
    }

    /// 캡션 수정
    ///
    /// 수정 가능한 필드는 캡션뿐입니다 (화이트리스트 병합).
    pub fn apply_caption(&mut self, caption: String) {
        self.caption = caption;
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post::new(ObjectId::new(), "hello".to_string(), Vec::new())
    }

    #[test]
    fn test_toggle_like_adds_then_removes() {
        let mut post = sample_post();
        let user = ObjectId::new();

        assert!(post.toggle_like(&user));
        assert_eq!(post.likes_count, 1);
        assert!(post.liked_by.contains(&user));

        assert!(!post.toggle_like(&user));
        assert_eq!(post.likes_count, 0);
        assert!(!post.liked_by.contains(&user));
    }

    #[test]
    fn test_toggle_like_is_idempotent_pairwise() {
        // 두 번 연속 토글하면 원래 상태로 돌아와야 합니다
        let mut post = sample_post();
        let user = ObjectId::new();
        let original_count = post.likes_count;

        post.toggle_like(&user);
        post.toggle_like(&user);

        assert_eq!(post.likes_count, original_count);
        assert!(!post.liked_by.contains(&user));
    }

    #[test]
    fn test_toggle_like_never_duplicates_user() {
        let mut post = sample_post();
        let user = ObjectId::new();

        post.toggle_like(&user);
        post.toggle_like(&user);
        post.toggle_like(&user);

        assert_eq!(
            post.liked_by.iter().filter(|id| **id == user).count(),
            1
        );
    }

    #[test]
    fn test_likes_count_matches_liked_by_after_many_users() {
        let mut post = sample_post();
        let users: Vec<ObjectId> = (0..5).map(|_| ObjectId::new()).collect();

        for user in &users {
            post.toggle_like(user);
        }
        // 일부 사용자는 취소
        post.toggle_like(&users[1]);
        post.toggle_like(&users[3]);

        assert_eq!(post.likes_count as usize, post.liked_by.len());
        assert_eq!(post.likes_count, 3);
    }

    #[test]
    fn test_likes_count_floors_at_zero() {
        let mut post = sample_post();
        let user = ObjectId::new();

        // 저장소의 비정상 상태를 흉내냅니다: 집합에는 있지만 카운트가 0
        post.liked_by.push(user);
        post.likes_count = 0;

        post.toggle_like(&user);
        assert_eq!(post.likes_count, 0);
        assert!(post.liked_by.is_empty());
    }

    #[test]
    fn test_apply_caption_whitelist() {
        let mut post = sample_post();
        let author = post.author_id;

        post.apply_caption("hi".to_string());
        assert_eq!(post.caption, "hi");
        // 캡션 수정이 다른 필드를 건드리지 않아야 합니다
        assert_eq!(post.author_id, author);
        assert_eq!(post.likes_count, 0);
    }

    #[test]
    fn test_is_editable_by() {
        let post = sample_post();
        let stranger = ObjectId::new();

        assert!(post.is_editable_by(&post.author_id.clone(), false));
        assert!(!post.is_editable_by(&stranger, false));
        // 관리자는 소유권 검사를 우회합니다
        assert!(post.is_editable_by(&stranger, true));
    }
}
