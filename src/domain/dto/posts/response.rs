//! 포스트 응답 DTO

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::domain::entities::posts::post::Post;

/// 포스트 응답 DTO
///
/// 피드 캐시에 직렬화되어 저장되는 형태이기도 합니다.
/// `liked_by`는 클라이언트가 좋아요 여부를 표시할 수 있도록
/// 16진수 문자열 id 목록으로 노출됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub caption: String,
    pub media_urls: Vec<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked_by: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let Post {
            id,
            author_id,
            caption,
            media_urls,
            likes_count,
            comments_count,
            liked_by,
            created_at,
            updated_at,
        } = post;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            author_id: author_id.to_hex(),
            caption,
            media_urls,
            likes_count,
            comments_count,
            liked_by: liked_by.iter().map(|id| id.to_hex()).collect(),
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_post_response_round_trips_through_json() {
        // 피드 캐시 저장/조회 경로는 JSON 직렬화를 거칩니다
        let mut post = Post::new(ObjectId::new(), "hello".to_string(), vec![]);
        post.id = Some(ObjectId::new());
        post.toggle_like(&ObjectId::new());

        let response = PostResponse::from(post);
        let json = serde_json::to_string(&response).unwrap();
        let restored: PostResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, response.id);
        assert_eq!(restored.likes_count, 1);
        assert_eq!(restored.liked_by.len(), 1);
    }
}
