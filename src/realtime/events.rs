//! 실시간 이벤트 이름과 와이어 프레임 정의
//!
//! 서버→클라이언트 이벤트는 `{"event": 이름, "data": 페이로드}` 봉투로,
//! 클라이언트→서버 프레임은 `{"event": "join-room", "room": r}` 형태로
//! 직렬화됩니다.

use serde::Deserialize;

/// 포스트 생성 이벤트 (전역 브로드캐스트)
pub const POST_CREATED: &str = "post-created";

/// 포스트 수정 이벤트 (포스트 룸)
pub const POST_UPDATED: &str = "post-updated";

/// 포스트 삭제 이벤트 (전역 브로드캐스트)
pub const POST_DELETED: &str = "post-deleted";

/// 좋아요 토글 이벤트 (포스트 룸)
pub const POST_LIKED: &str = "post-liked";

/// 포스트 단위 룸 이름을 생성합니다.
pub fn post_room(post_id: &str) -> String {
    format!("post:{}", post_id)
}

/// 클라이언트→서버 프레임
///
/// 룸 가입과 탈퇴의 두 가지만 지원하며, 알 수 없는 프레임은
/// 역직렬화 실패로 조용히 무시됩니다.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientFrame {
    JoinRoom { room: String },
    LeaveRoom { room: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_room_format() {
        assert_eq!(post_room("507f1f77bcf86cd799439011"), "post:507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_client_frame_deserialization() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"event":"join-room","room":"post:abc"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::JoinRoom { room } if room == "post:abc"));

        let frame: ClientFrame =
            serde_json::from_str(r#"{"event":"leave-room","room":"post:abc"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::LeaveRoom { .. }));
    }

    #[test]
    fn test_unknown_frame_rejected() {
        let result = serde_json::from_str::<ClientFrame>(r#"{"event":"subscribe","room":"x"}"#);
        assert!(result.is_err());
    }
}
