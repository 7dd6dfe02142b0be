//! 실시간 연결 허브 구현
//!
//! 현재 연결된 WebSocket 세션의 송신 핸들과 룸 멤버십을 관리합니다.
//!
//! ## 설계
//!
//! 각 연결은 등록 시 unbounded mpsc 채널을 받고, 세션 루프가 수신 측을
//! 소비하여 소켓으로 내보냅니다. 허브는 송신 측 핸들만 보관하므로
//! 브로드캐스트는 락을 잡은 채 I/O를 수행하지 않습니다.
//! 닫힌 채널로의 송신 실패는 해당 연결의 등록 해제로 이어집니다.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::json;
use tokio::sync::mpsc;

/// 연결 식별자
pub type ConnectionId = u64;

/// 허브 내부 상태
///
/// `connections`와 `rooms`는 항상 함께 갱신됩니다.
/// 등록 해제된 연결은 모든 룸에서도 제거됩니다.
#[derive(Default)]
struct HubInner {
    /// 다음에 발급할 연결 ID
    next_conn_id: ConnectionId,
    /// 연결 ID → 송신 핸들
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<String>>,
    /// 룸 이름 → 구성원 연결 ID 집합
    rooms: HashMap<String, HashSet<ConnectionId>>,
}

/// 실시간 이벤트 릴레이 허브
///
/// 포스트 생명주기 이벤트를 룸 단위 또는 전역으로 팬아웃합니다.
/// at-most-once, best-effort 전달이며 수신 확인은 없습니다.
#[derive(Default)]
pub struct RealtimeHub {
    inner: Mutex<HubInner>,
}

impl RealtimeHub {
    /// 새 허브를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 새 연결을 등록하고 수신 채널을 반환합니다.
    ///
    /// 세션 루프는 반환된 수신기를 소비하여 소켓으로 내보냅니다.
    pub fn register(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut inner = self.inner.lock().unwrap();
        let conn_id = inner.next_conn_id;
        inner.next_conn_id += 1;
        inner.connections.insert(conn_id, tx);

        log::debug!("WebSocket 연결 등록 - conn_id: {}", conn_id);
        (conn_id, rx)
    }

    /// 연결을 등록 해제하고 모든 룸에서 제거합니다.
    pub fn unregister(&self, conn_id: ConnectionId) {
        let mut inner = self.inner.lock().unwrap();
        inner.connections.remove(&conn_id);

        inner.rooms.retain(|_, members| {
            members.remove(&conn_id);
            !members.is_empty()
        });

        log::debug!("WebSocket 연결 해제 - conn_id: {}", conn_id);
    }

    /// 연결을 룸에 가입시킵니다.
    ///
    /// 등록되지 않은 연결의 가입 요청은 무시됩니다.
    pub fn join(&self, conn_id: ConnectionId, room: &str) {
        let mut inner = self.inner.lock().unwrap();

        if !inner.connections.contains_key(&conn_id) {
            return;
        }

        inner
            .rooms
            .entry(room.to_string())
            .or_default()
            .insert(conn_id);

        log::debug!("룸 가입 - conn_id: {}, room: {}", conn_id, room);
    }

    /// 연결을 룸에서 탈퇴시킵니다.
    pub fn leave(&self, conn_id: ConnectionId, room: &str) {
        let mut inner = self.inner.lock().unwrap();

        if let Some(members) = inner.rooms.get_mut(room) {
            members.remove(&conn_id);
            if members.is_empty() {
                inner.rooms.remove(room);
            }
        }

        log::debug!("룸 탈퇴 - conn_id: {}, room: {}", conn_id, room);
    }

    /// 이벤트 봉투 직렬화
    fn envelope(event: &str, data: &serde_json::Value) -> String {
        json!({ "event": event, "data": data }).to_string()
    }

    /// 모든 연결에 이벤트를 브로드캐스트합니다.
    pub fn broadcast_all(&self, event: &str, data: serde_json::Value) {
        let message = Self::envelope(event, &data);
        let mut inner = self.inner.lock().unwrap();

        // 닫힌 채널은 전송 시점에 발견되어 제거됩니다
        inner
            .connections
            .retain(|_, sender| sender.send(message.clone()).is_ok());
    }

    /// 특정 룸의 구성원에게 이벤트를 브로드캐스트합니다.
    pub fn broadcast_room(&self, room: &str, event: &str, data: serde_json::Value) {
        let message = Self::envelope(event, &data);
        let mut inner = self.inner.lock().unwrap();

        let members: Vec<ConnectionId> = match inner.rooms.get(room) {
            Some(members) => members.iter().copied().collect(),
            None => return,
        };

        let mut dead = Vec::new();
        for conn_id in members {
            if let Some(sender) = inner.connections.get(&conn_id) {
                if sender.send(message.clone()).is_err() {
                    dead.push(conn_id);
                }
            }
        }

        // 송신에 실패한 연결 정리
        for conn_id in dead {
            inner.connections.remove(&conn_id);
            inner.rooms.retain(|_, members| {
                members.remove(&conn_id);
                !members.is_empty()
            });
        }
    }

    /// 현재 연결 수
    pub fn connection_count(&self) -> usize {
        self.inner.lock().unwrap().connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recv_event(rx: &mut mpsc::UnboundedReceiver<String>) -> Option<serde_json::Value> {
        rx.try_recv().ok().map(|raw| serde_json::from_str(&raw).unwrap())
    }

    #[test]
    fn test_broadcast_all_reaches_every_connection() {
        let hub = RealtimeHub::new();
        let (_id_a, mut rx_a) = hub.register();
        let (_id_b, mut rx_b) = hub.register();

        hub.broadcast_all("post-created", serde_json::json!({ "id": "p1" }));

        let event_a = recv_event(&mut rx_a).unwrap();
        let event_b = recv_event(&mut rx_b).unwrap();
        assert_eq!(event_a["event"], "post-created");
        assert_eq!(event_b["data"]["id"], "p1");
    }

    #[test]
    fn test_broadcast_room_reaches_members_only() {
        let hub = RealtimeHub::new();
        let (id_a, mut rx_a) = hub.register();
        let (_id_b, mut rx_b) = hub.register();

        hub.join(id_a, "post:p1");
        hub.broadcast_room("post:p1", "post-liked", serde_json::json!({ "post_id": "p1" }));

        assert!(recv_event(&mut rx_a).is_some());
        assert!(recv_event(&mut rx_b).is_none());
    }

    #[test]
    fn test_leave_stops_delivery() {
        let hub = RealtimeHub::new();
        let (id, mut rx) = hub.register();

        hub.join(id, "post:p1");
        hub.leave(id, "post:p1");
        hub.broadcast_room("post:p1", "post-updated", serde_json::json!({}));

        assert!(recv_event(&mut rx).is_none());
    }

    #[test]
    fn test_unregister_prunes_rooms_and_connections() {
        let hub = RealtimeHub::new();
        let (id, _rx) = hub.register();

        hub.join(id, "post:p1");
        hub.unregister(id);

        assert_eq!(hub.connection_count(), 0);
        // 룸이 비어 있으므로 브로드캐스트는 조용히 무시됩니다
        hub.broadcast_room("post:p1", "post-liked", serde_json::json!({}));
    }

    #[test]
    fn test_dropped_receiver_is_pruned_on_broadcast() {
        let hub = RealtimeHub::new();
        let (_id, rx) = hub.register();
        drop(rx);

        hub.broadcast_all("post-deleted", serde_json::json!({}));
        assert_eq!(hub.connection_count(), 0);
    }

    #[test]
    fn test_join_unknown_connection_ignored() {
        let hub = RealtimeHub::new();
        hub.join(999, "post:p1");

        hub.broadcast_room("post:p1", "post-liked", serde_json::json!({}));
        assert_eq!(hub.connection_count(), 0);
    }
}
