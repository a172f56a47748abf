use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use scroll_portfolio::{
    config::MotionConfig,
    content::RESUME_FILE_NAME,
    telemetry::{LogLevel, Logger},
};
use serde::Serialize;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_RESUME_PATH: &str = "dist/resume.pdf";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const MOTION_CONFIG_MAX_AGE_SECONDS: u64 = 60;
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug)]
struct ServerConfig {
    port: u16,
    dist_dir: PathBuf,
    resume_path: PathBuf,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        let port = parse_env_non_empty_string("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let dist_dir = parse_env_non_empty_string("DIST_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let resume_path = parse_env_non_empty_string("RESUME_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESUME_PATH));
        let log_level = parse_env_non_empty_string("LOG_LEVEL")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            port,
            dist_dir,
            resume_path,
            log_level,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
    motion: Arc<MotionConfig>,
    logger: Logger,
}

#[derive(Serialize)]
struct ErrorPayload {
    ok: bool,
    error: String,
}

impl ErrorPayload {
    fn new(message: &str) -> Self {
        Self {
            ok: false,
            error: message.to_string(),
        }
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let logger = Logger::new(config.log_level);
    let motion = MotionConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);

    logger.info(
        "server_config",
        serde_json::json!({
            "port": config.port,
            "dist_dir": config.dist_dir.display().to_string(),
            "resume_path": config.resume_path.display().to_string(),
            "motion": &motion,
        }),
    );

    let state = AppState {
        config: Arc::new(config),
        motion: Arc::new(motion),
        logger,
    };
    let port = state.config.port;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    let index = state.config.dist_dir.join("index.html");
    let static_service =
        ServeDir::new(&state.config.dist_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/api/motion-config", get(get_motion_config))
        .route("/resume", get(get_resume))
        .fallback_service(static_service)
        .with_state(state)
}

async fn get_motion_config(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> axum::response::Response {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CACHE_CONTROL,
        cache_control(&format!("public, max-age={MOTION_CONFIG_MAX_AGE_SECONDS}")),
    );

    state.logger.info(
        "motion_config_served",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": uri.path(),
            "status": StatusCode::OK.as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis(),
        }),
    );

    response_with_request_id(
        StatusCode::OK,
        response_headers,
        Json(state.motion.as_ref().clone()),
        &request_id,
    )
}

async fn get_resume(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> axum::response::Response {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);

    let bytes = match tokio::fs::read(&state.config.resume_path).await {
        Ok(bytes) => bytes,
        Err(error) => {
            let status = if error.kind() == std::io::ErrorKind::NotFound {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            state.logger.warn(
                "resume_request_failed",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "method": method.as_str(),
                    "path": uri.path(),
                    "status": status.as_u16(),
                    "error_class": if status == StatusCode::NOT_FOUND { "resume_missing" } else { "resume_unreadable" },
                    "message": error.to_string(),
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            return error_response(status, "resume is not available", &request_id);
        }
    };

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    response_headers.insert(header::CONTENT_DISPOSITION, resume_disposition());
    response_headers.insert(header::CACHE_CONTROL, cache_control("no-cache"));

    state.logger.info(
        "resume_served",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": uri.path(),
            "status": StatusCode::OK.as_u16(),
            "bytes": bytes.len(),
            "duration_ms": request_started_at.elapsed().as_millis(),
        }),
    );

    response_with_request_id(StatusCode::OK, response_headers, bytes, &request_id)
}

fn error_response(status: StatusCode, message: &str, request_id: &str) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, cache_control("no-store"));
    response_with_request_id(status, headers, Json(ErrorPayload::new(message)), request_id)
}

fn resume_disposition() -> HeaderValue {
    HeaderValue::from_str(&format!("attachment; filename=\"{RESUME_FILE_NAME}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn response_with_request_id(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: impl IntoResponse,
    request_id: &str,
) -> axum::response::Response {
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, payload).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state(resume_path: PathBuf) -> AppState {
        AppState {
            config: Arc::new(ServerConfig {
                port: DEFAULT_PORT,
                dist_dir: PathBuf::from(DEFAULT_DIST_DIR),
                resume_path,
                log_level: DEFAULT_LOG_LEVEL,
            }),
            motion: Arc::new(MotionConfig::default()),
            logger: Logger::disabled(),
        }
    }

    fn temp_resume_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "scroll-portfolio-{tag}-{}-{}.pdf",
            std::process::id(),
            now_unix_millis()
        ))
    }

    fn headers_with_request_id(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).expect("ascii header"));
        headers
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body")
            .to_vec()
    }

    #[test]
    fn incoming_request_id_is_echoed() {
        let headers = headers_with_request_id("  req-from-edge ");

        assert_eq!(resolve_request_id(&headers), "req-from-edge");
    }

    #[test]
    fn missing_request_id_is_generated_uniquely() {
        let first = resolve_request_id(&HeaderMap::new());
        let second = resolve_request_id(&HeaderMap::new());

        assert!(first.starts_with("req-"));
        assert_ne!(first, second);
    }

    #[test]
    fn resume_disposition_names_the_download() {
        let value = resume_disposition();

        assert_eq!(
            value.to_str().expect("ascii header"),
            "attachment; filename=\"Ankit_Ranjan_Resume.pdf\""
        );
    }

    #[tokio::test]
    async fn motion_config_is_cacheable_json() {
        let state = test_state(temp_resume_path("unused"));

        let response = get_motion_config(
            State(state),
            Method::GET,
            Uri::from_static("/api/motion-config"),
            headers_with_request_id("req-test"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some("public, max-age=60")
        );
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-test")
        );

        let body = body_bytes(response).await;
        let served = MotionConfig::from_json(std::str::from_utf8(&body).expect("utf-8 body"))
            .expect("valid motion config");
        assert_eq!(served, MotionConfig::default());
    }

    #[tokio::test]
    async fn resume_is_served_as_attachment() {
        let path = temp_resume_path("present");
        tokio::fs::write(&path, b"%PDF-1.4 test").await.expect("temp file writable");
        let state = test_state(path.clone());

        let response = get_resume(
            State(state),
            Method::GET,
            Uri::from_static("/resume"),
            HeaderMap::new(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/pdf")
        );
        assert!(response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|value| value.starts_with("attachment;")));
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(body_bytes(response).await, b"%PDF-1.4 test".to_vec());

        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn missing_resume_is_a_json_404() {
        let state = test_state(temp_resume_path("missing"));

        let response = get_resume(
            State(state),
            Method::GET,
            Uri::from_static("/resume"),
            headers_with_request_id("req-missing"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
            Some("req-missing")
        );

        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("JSON body");
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "resume is not available");
    }
}
