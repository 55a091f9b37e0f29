// ==========================================
// WEWORKS 수지분석 - 설정 관리자
// ==========================================
// 책임: 계산 설정 조회/저장, 스냅샷
// 저장: config_kv 테이블 (key-value + scope)
// ==========================================

use crate::config::standard_expense::default_standard_expenses;
use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::expense::StandardExpense;
use crate::engine::profitability::DEFAULT_DELAY_RATE;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// 설정 계층 오류
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("데이터베이스 잠금 획득 실패: {0}")]
    LockError(String),

    #[error("설정 조회/저장 실패: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("설정 값 형식 오류 (key={key}): {message}")]
    InvalidValue { key: String, message: String },

    #[error("설정 직렬화 실패: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// CalcConfig - 계산 설정 스냅샷
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    pub delay_rate: f64,
    pub standard_expenses: Vec<StandardExpense>,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            delay_rate: DEFAULT_DELAY_RATE,
            standard_expenses: default_standard_expenses(),
        }
    }
}

// ==========================================
// ConfigManager - 설정 관리자
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// DB 파일 경로로 생성
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        let manager = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        manager.ensure_table()?;
        Ok(manager)
    }

    /// 기존 연결로 생성
    ///
    /// 공유 연결에도 PRAGMA를 다시 적용한다 (멱등).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| ConfigError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }

        let manager = Self { conn };
        manager.ensure_table()?;
        Ok(manager)
    }

    fn get_conn(&self) -> ConfigResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ConfigError::LockError(e.to_string()))
    }

    fn ensure_table(&self) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config_kv (
                scope_id TEXT NOT NULL DEFAULT 'global',
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                PRIMARY KEY (scope_id, key)
            );",
        )?;
        Ok(())
    }

    /// global scope 설정 값 조회
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// global scope 설정 값 저장 (upsert)
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        tracing::info!(config_key = key, "설정 저장");
        Ok(())
    }

    /// 지연 비용률 (기본 0)
    ///
    /// 형식이 잘못된 값은 경고 후 기본값을 쓴다.
    pub fn get_delay_rate(&self) -> ConfigResult<f64> {
        let raw = match self.get_global_config_value(config_keys::DELAY_RATE)? {
            Some(v) => v,
            None => return Ok(DEFAULT_DELAY_RATE),
        };

        let rate = match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::warn!(
                    config_key = config_keys::DELAY_RATE,
                    raw_value = %raw,
                    "지연 비용률 형식 오류, 기본값 사용"
                );
                return Ok(DEFAULT_DELAY_RATE);
            }
        };

        if rate != DEFAULT_DELAY_RATE {
            tracing::warn!(
                delay_rate = rate,
                "지연 비용률이 0이 아님: 용역 원가에 지연 비용이 포함됨"
            );
        }
        Ok(rate)
    }

    pub fn set_delay_rate(&self, rate: f64) -> ConfigResult<()> {
        if !rate.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: config_keys::DELAY_RATE.to_string(),
                message: format!("유한한 수가 아님: {}", rate),
            });
        }
        self.set_global_config_value(config_keys::DELAY_RATE, &rate.to_string())
    }

    /// 기준경비 (설정이 없으면 기본 9행)
    pub fn get_standard_expenses(&self) -> ConfigResult<Vec<StandardExpense>> {
        let raw = match self.get_global_config_value(config_keys::STANDARD_EXPENSES)? {
            Some(v) => v,
            None => return Ok(default_standard_expenses()),
        };

        match serde_json::from_str::<Vec<StandardExpense>>(&raw) {
            Ok(list) => Ok(list),
            Err(e) => {
                tracing::warn!(
                    config_key = config_keys::STANDARD_EXPENSES,
                    error = %e,
                    "기준경비 설정 형식 오류, 기본값 사용"
                );
                Ok(default_standard_expenses())
            }
        }
    }

    pub fn set_standard_expenses(&self, standards: &[StandardExpense]) -> ConfigResult<()> {
        let raw = serde_json::to_string(standards)?;
        self.set_global_config_value(config_keys::STANDARD_EXPENSES, &raw)
    }

    /// 계산 설정 스냅샷
    pub fn load_calc_config(&self) -> ConfigResult<CalcConfig> {
        Ok(CalcConfig {
            delay_rate: self.get_delay_rate()?,
            standard_expenses: self.get_standard_expenses()?,
        })
    }

    /// global 설정 전체 스냅샷 (JSON)
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let config_map = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<BTreeMap<String, String>, _>>()?;

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 스냅샷에서 global 설정 복원
    ///
    /// # 반환
    /// - 반영된 설정 항목 수
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in &config_map {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }
}

// ==========================================
// 설정 키 상수
// ==========================================
pub mod config_keys {
    // 용역 원가 대비 지연 비용률 (0.05 = 5%)
    pub const DELAY_RATE: &str = "calc/delay_rate";

    // 기준경비 목록 (JSON 배열)
    pub const STANDARD_EXPENSES: &str = "calc/standard_expenses";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let m = manager();
        let config = m.load_calc_config().unwrap();
        assert_eq!(config, CalcConfig::default());
        assert_eq!(config.standard_expenses.len(), 9);
    }

    #[test]
    fn test_delay_rate_round_trip() {
        let m = manager();
        m.set_delay_rate(0.05).unwrap();
        assert_eq!(m.get_delay_rate().unwrap(), 0.05);
        assert!(m.set_delay_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_malformed_values_fall_back() {
        let m = manager();
        m.set_global_config_value(config_keys::DELAY_RATE, "abc").unwrap();
        m.set_global_config_value(config_keys::STANDARD_EXPENSES, "{not json").unwrap();

        assert_eq!(m.get_delay_rate().unwrap(), DEFAULT_DELAY_RATE);
        assert_eq!(m.get_standard_expenses().unwrap(), default_standard_expenses());
    }

    #[test]
    fn test_standard_expense_override() {
        let m = manager();
        let mut standards = default_standard_expenses();
        standards[0].calculated_value = Some(12.0);
        m.set_standard_expenses(&standards).unwrap();

        let loaded = m.get_standard_expenses().unwrap();
        assert_eq!(loaded[0].unit_rate(), 120.0);
    }

    #[test]
    fn test_snapshot_restore() {
        let m = manager();
        m.set_delay_rate(0.1).unwrap();
        let snapshot = m.get_config_snapshot().unwrap();

        m.set_delay_rate(0.2).unwrap();
        assert_eq!(m.restore_config_from_snapshot(&snapshot).unwrap(), 1);
        assert_eq!(m.get_delay_rate().unwrap(), 0.1);
    }
}
