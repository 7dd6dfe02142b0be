//! 소셜 피드 백엔드 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! MongoDB, Redis 연결을 설정하고 JWT 인증 기반의 REST API와
//! WebSocket 실시간 이벤트 엔드포인트를 제공합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use social_feed_backend::caching::feed_cache::FeedCache;
use social_feed_backend::caching::redis::RedisClient;
use social_feed_backend::config::{JwtSettings, ServerConfig};
use social_feed_backend::db::Database;
use social_feed_backend::realtime::hub::RealtimeHub;
use social_feed_backend::repositories::posts::post_repo::PostRepository;
use social_feed_backend::repositories::users::user_repo::UserRepository;
use social_feed_backend::routes::configure_all_routes;
use social_feed_backend::services::auth::{AuthService, TokenRevocationList, TokenService};
use social_feed_backend::services::posts::PostService;
use social_feed_backend::services::users::UserService;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

/// 명시적 생성자 주입으로 구성된 서비스 그래프
///
/// 모든 서비스는 여기서 한 번 생성되어 `web::Data`로 핸들러와
/// 미들웨어에 공유됩니다. 프로세스 전역 싱글톤은 없습니다.
#[derive(Clone)]
struct AppServices {
    auth_service: Arc<AuthService>,
    user_service: Arc<UserService>,
    post_service: Arc<PostService>,
    hub: Arc<RealtimeHub>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 소셜 피드 백엔드 시작중...");

    // 데이터 스토어 초기화
    let (database, redis_client) = initialize_data_stores().await;

    // 서비스 그래프 구성
    let services = build_services(database, redis_client).await;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(services).await
}

/// 서비스 그래프를 구성합니다
///
/// 리포지토리 → 서비스 순서로 생성하며, 시작 시점에
/// MongoDB 인덱스(유니크 제약, 정렬, 텍스트 검색)를 보장합니다.
async fn build_services(database: Arc<Database>, redis_client: Arc<RedisClient>) -> AppServices {
    // 리포지토리 생성 및 인덱스 보장
    let user_repo = Arc::new(UserRepository::new(database.clone()));
    let post_repo = Arc::new(PostRepository::new(database.clone()));

    user_repo
        .create_indexes()
        .await
        .expect("사용자 인덱스 생성 실패");
    post_repo
        .create_indexes()
        .await
        .expect("포스트 인덱스 생성 실패");

    info!("✅ MongoDB 인덱스 생성 완료");

    // 토큰 서비스: JWT 설정 + Redis 블랙리스트
    let revocation = TokenRevocationList::new(redis_client.clone());
    let token_service = Arc::new(TokenService::new(JwtSettings::from_env(), revocation));

    // 사용자/인증 서비스
    let user_service = Arc::new(UserService::new(user_repo));
    let auth_service = Arc::new(AuthService::new(user_service.clone(), token_service));

    // 피드 캐시와 실시간 허브
    let feed_cache = Arc::new(FeedCache::new(redis_client));
    let hub = Arc::new(RealtimeHub::new());

    // 포스트 서비스
    let post_service = Arc::new(PostService::new(post_repo, feed_cache, hub.clone()));

    AppServices {
        auth_service,
        user_service,
        post_service,
        hub,
    }
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화, Rate Limiting 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(services: AppServices) -> std::io::Result<()> {
    let host = ServerConfig::host();
    let port = ServerConfig::port();

    info!("🌐 서버가 http://{}:{} 에서 실행중입니다", host, port);
    info!("📍 Health check: http://{}:{}/health", host, port);
    info!("📍 WebSocket: ws://{}:{}/ws", host, port);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .unwrap();

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        // CORS 설정
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))

            // 기존 미들웨어들
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())

            // 서비스 주입
            .app_data(web::Data::from(services.auth_service.clone()))
            .app_data(web::Data::from(services.user_service.clone()))
            .app_data(web::Data::from(services.post_service.clone()))
            .app_data(web::Data::from(services.hub.clone()))

            // 라우트 설정
            .configure(configure_all_routes)
    })
    .bind((host, port))?
    .workers(4) // 워커 스레드 수
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// PROFILE 환경변수에 따라 적절한 .env 파일을 로드합니다.
/// 개발환경과 운영환경을 구분하여 설정을 관리합니다.
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            // 기본 .env 파일 로드
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// 환경변수 RUST_LOG를 기반으로 로깅 레벨을 설정합니다.
/// 기본값은 info 레벨이며, actix_web은 debug 레벨로 설정됩니다.
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// 데이터베이스 연결을 설정하고 Arc로 래핑된 핸들을 반환합니다.
/// 연결 실패 시 애플리케이션이 종료됩니다.
///
/// # Panics
///
/// * MongoDB 연결 실패 시
/// * Redis 연결 실패 시
async fn initialize_data_stores() -> (Arc<Database>, Arc<RedisClient>) {
    info!("📡 데이터베이스 연결 중...");

    // 데이터베이스 초기화
    let database = Arc::new(Database::new().await.expect("데이터베이스 연결 실패"));

    info!("✅ MongoDB 연결 성공");

    // Redis 클라이언트 초기화
    let redis_client = Arc::new(RedisClient::new().await.expect("Redis 연결 실패"));

    info!("✅ Redis 연결 성공");

    (database, redis_client)
}

/// CORS 설정을 구성합니다
///
/// 프론트엔드와의 통신을 위한 CORS(Cross-Origin Resource Sharing)
/// 설정을 구성합니다. 허용 오리진은 `CORS_ORIGINS` 환경변수에서
/// 콤마로 구분하여 읽어옵니다.
fn configure_cors() -> Cors {
    let mut cors = Cors::default()
        // 허용할 HTTP 메서드
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])

        // 허용할 헤더
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_REQUEST_METHOD,
        ])

        // 자격 증명(쿠키 등) 지원
        .supports_credentials()

        // Preflight 요청 캐시 시간 (초)
        .max_age(3600);

    // 허용할 Origin 설정 (환경변수 기반)
    for origin in ServerConfig::cors_origins() {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
