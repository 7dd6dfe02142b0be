//! WebSocket 세션 루프 구현
//!
//! 연결 수립 후 세션 하나당 하나의 태스크가 이 루프를 실행합니다.
//!
//! 1. 허브에 연결을 등록하고 송신 채널을 받습니다
//! 2. 허브에서 온 이벤트를 소켓으로 내보냅니다
//! 3. 클라이언트 프레임(join-room / leave-room)을 허브에 반영합니다
//! 4. Ping에 Pong으로 응답합니다
//! 5. 연결 종료 시 허브에서 등록을 해제합니다
//!
//! 해석할 수 없는 프레임은 연결을 끊지 않고 조용히 무시됩니다.

use std::sync::Arc;

use actix_ws::{Message, MessageStream, Session};

use crate::realtime::events::ClientFrame;
use crate::realtime::hub::RealtimeHub;

/// 단일 WebSocket 세션을 구동합니다.
///
/// 허브 수신 채널과 클라이언트 메시지 스트림을 동시에 대기하며,
/// 어느 쪽이든 종료되면 세션을 정리합니다.
pub async fn run_session(hub: Arc<RealtimeHub>, mut session: Session, mut msg_stream: MessageStream) {
    let (conn_id, mut rx) = hub.register();

    log::info!("WebSocket 클라이언트 연결됨 - conn_id: {}", conn_id);

    loop {
        tokio::select! {
            // 허브 → 클라이언트
            outbound = rx.recv() => {
                match outbound {
                    Some(text) => {
                        if session.text(text).await.is_err() {
                            break;
                        }
                    }
                    // 허브가 송신 핸들을 제거한 경우
                    None => break,
                }
            }

            // 클라이언트 → 허브
            frame = msg_stream.recv() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_frame(&hub, conn_id, &text);
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break;
                    }
                    Some(Ok(_)) => {
                        // Binary/Pong 등은 무시
                    }
                    Some(Err(e)) => {
                        log::debug!("WebSocket 프로토콜 오류 - conn_id: {}, {}", conn_id, e);
                        break;
                    }
                }
            }
        }
    }

    hub.unregister(conn_id);
    let _ = session.close(None).await;

    log::info!("WebSocket 클라이언트 연결 종료 - conn_id: {}", conn_id);
}

/// 클라이언트 프레임을 해석하여 룸 멤버십에 반영합니다.
fn handle_client_frame(hub: &RealtimeHub, conn_id: u64, raw: &str) {
    match serde_json::from_str::<ClientFrame>(raw) {
        Ok(ClientFrame::JoinRoom { room }) => hub.join(conn_id, &room),
        Ok(ClientFrame::LeaveRoom { room }) => hub.leave(conn_id, &room),
        Err(_) => {
            log::debug!("해석할 수 없는 프레임 무시 - conn_id: {}", conn_id);
        }
    }
}
