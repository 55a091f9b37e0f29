// ==========================================
// WEWORKS 수지분석 - SQLite 연결 초기화
// ==========================================
// 모든 Connection::open 경로에 같은 PRAGMA를 적용한다.
// - foreign_keys: 연결마다 켜야 한다
// - busy_timeout: 동시 쓰기 시 간헐적 busy 오류 완화
// ==========================================

use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Duration;

/// 기본 busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 기본 DB 파일명
pub const DEFAULT_DB_FILE_NAME: &str = "weworks_profitability.db";

pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// SQLite 연결을 열고 공통 설정 적용
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 기본 DB 경로 (사용자 데이터 디렉터리 하위)
///
/// 데이터 디렉터리를 알 수 없으면 현재 디렉터리.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("weworks").join(DEFAULT_DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME))
}
