//! Realtime WebSocket Handler
//!
//! HTTP 연결을 WebSocket으로 업그레이드하고 세션 루프를 시작합니다.

use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::realtime::hub::RealtimeHub;
use crate::realtime::session;

/// WebSocket 업그레이드 핸들러
///
/// 업그레이드 응답을 즉시 반환하고, 세션 루프는 별도 태스크로
/// 실행됩니다. 연결 생명주기는 전송 계층이 소유하며 세션 종료 시
/// 허브에서 자동으로 등록 해제됩니다.
///
/// # Endpoint
/// `GET /ws`
#[get("/ws")]
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    hub: web::Data<RealtimeHub>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    actix_web::rt::spawn(session::run_session(
        hub.into_inner(),
        session,
        msg_stream,
    ));

    Ok(response)
}
