//! 소셜 피드 백엔드
//!
//! Rust 기반의 소셜 미디어 백엔드 서비스입니다.
//! JWT 토큰 기반 인증, 캐싱된 포스트 피드, 그리고 WebSocket을 통한
//! 실시간 포스트 이벤트 중계를 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원가입, 로그인, 프로필 조회
//! - **JWT 인증**: 액세스/리프레시 토큰 기반 상태 없는 인증 + Redis 블랙리스트
//! - **포스트**: CRUD, 좋아요 토글, 페이지네이션, 캡션 전문 검색
//! - **피드 캐시**: 페이지 단위 Redis 캐시와 변경 시 일괄 무효화
//! - **실시간 이벤트**: 포스트 생명주기 이벤트의 룸/전역 브로드캐스트
//! - **MongoDB**: 사용자/포스트 데이터 영구 저장
//! - **Redis**: 피드 캐시 및 토큰 무효화 리스트
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API + WebSocket 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, DTO 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (인증, 포스트, 토큰)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! 모든 서비스와 클라이언트는 `main`에서 한 번 생성되어
//! `Arc`로 공유되고 `web::Data`를 통해 핸들러에 주입됩니다.
//! 프로세스 전역 싱글톤이나 모듈 레벨 가변 상태는 없습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use social_feed_backend::services::auth::AuthService;
//! use social_feed_backend::services::posts::PostService;
//!
//! // 명시적 생성자 주입으로 서비스 그래프 구성
//! let user_service = Arc::new(UserService::new(user_repo));
//! let auth_service = Arc::new(AuthService::new(user_service, token_service));
//!
//! // 회원가입 및 토큰 발급
//! let response = auth_service.register(request).await?;
//! ```

pub mod caching;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod realtime;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;
