// ==========================================
// 로그 초기화
// ==========================================
// tracing + tracing-subscriber
// 로그 레벨은 RUST_LOG 환경 변수로 조정
// 표준 출력은 명령 결과(JSON/CSV) 전용이므로 로그는 stderr로 보낸다.
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 로그 초기화
///
/// # 환경 변수
/// - RUST_LOG: 필터 (기본: info)
///   예: RUST_LOG=debug, RUST_LOG=weworks_profitability=trace
///
/// # 예시
/// ```no_run
/// use weworks_profitability::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// JSON 형식 로그 초기화 (로그 수집기 연동용)
pub fn init_json() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();
}

/// 테스트용 로그 초기화 (debug, 중복 호출 허용)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
