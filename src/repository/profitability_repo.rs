// ==========================================
// WEWORKS 수지분석 - 수지분석서 헤더/부가 수익비용 저장소
// ==========================================
// 헤더: 프로젝트별 버전, 상태, 요약 수치
// 부가: 프로젝트별 부가 수익/비용 (+ 설명)
// 원칙: 저장소에는 업무 규칙을 두지 않는다 (상태 전이 판정은 도메인)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::profitability::{ExtraAdjustment, ProfitabilityHeader, ProfitabilitySummary};
use crate::domain::types::ProfitabilityStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HEADER_COLUMNS: &str = "id, project_id, version, status, total_revenue, total_cost, \
                              net_profit, profit_rate, updated_at";

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

// ==========================================
// ProfitabilityRepository
// ==========================================
pub struct ProfitabilityRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProfitabilityRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 기존 연결로 생성 (테이블이 없으면 만든다)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        repo.ensure_tables()?;
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn ensure_tables(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS project_profitability (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                project_id INTEGER NOT NULL,
                version INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'STANDBY',
                total_revenue REAL NOT NULL DEFAULT 0,
                total_cost REAL NOT NULL DEFAULT 0,
                net_profit REAL NOT NULL DEFAULT 0,
                profit_rate REAL NOT NULL DEFAULT 0,
                updated_at TEXT NOT NULL,
                UNIQUE (project_id, version)
            );
            CREATE TABLE IF NOT EXISTS project_profitability_extra (
                project_id INTEGER PRIMARY KEY,
                extra_revenue REAL NOT NULL DEFAULT 0,
                extra_revenue_desc TEXT NOT NULL DEFAULT '',
                extra_expense REAL NOT NULL DEFAULT 0,
                extra_expense_desc TEXT NOT NULL DEFAULT '',
                updated_at TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    // ===== 헤더 =====

    /// 다음 버전 헤더 생성 (버전 = 기존 최대 + 1)
    pub fn create_next_version(
        &self,
        project_id: i64,
        status: ProfitabilityStatus,
    ) -> RepositoryResult<ProfitabilityHeader> {
        self.create_next_version_with(project_id, status, |_, _| Ok(()))
    }

    /// 다음 버전 헤더 생성 + 같은 트랜잭션 안에서 초기 데이터 기록
    ///
    /// `seed`는 (트랜잭션, 새 헤더 id)를 받는다. 실패하면 헤더도 남지 않는다.
    pub fn create_next_version_with<F>(
        &self,
        project_id: i64,
        status: ProfitabilityStatus,
        seed: F,
    ) -> RepositoryResult<ProfitabilityHeader>
    where
        F: FnOnce(&Transaction<'_>, i64) -> RepositoryResult<()>,
    {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let max_version: Option<i32> = tx.query_row(
            "SELECT MAX(version) FROM project_profitability WHERE project_id = ?1",
            params![project_id],
            |row| row.get(0),
        )?;
        let version = max_version.unwrap_or(0) + 1;
        let updated_at = now();

        tx.execute(
            r#"INSERT INTO project_profitability (project_id, version, status, updated_at)
               VALUES (?1, ?2, ?3, ?4)"#,
            params![
                project_id,
                version,
                status.to_db_str(),
                updated_at.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        let id = tx.last_insert_rowid();
        seed(&tx, id)?;
        tx.commit()?;

        tracing::info!(project_id, id, version, status = %status, "수지분석서 버전 생성");

        Ok(ProfitabilityHeader {
            id,
            project_id,
            version,
            status,
            total_revenue: 0.0,
            total_cost: 0.0,
            net_profit: 0.0,
            profit_rate: 0.0,
            updated_at,
        })
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ProfitabilityHeader>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM project_profitability WHERE id = ?1", HEADER_COLUMNS);
        let header = conn
            .query_row(&sql, params![id], map_header)
            .optional()?;
        Ok(header)
    }

    /// 프로젝트의 모든 버전 (버전 오름차순)
    pub fn find_by_project(&self, project_id: i64) -> RepositoryResult<Vec<ProfitabilityHeader>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM project_profitability WHERE project_id = ?1 ORDER BY version",
            HEADER_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let headers = stmt
            .query_map(params![project_id], map_header)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(headers)
    }

    /// 최신 버전
    pub fn find_latest(&self, project_id: i64) -> RepositoryResult<Option<ProfitabilityHeader>> {
        Ok(self.find_by_project(project_id)?.into_iter().last())
    }

    /// 아직 열려 있는(작성완료/승인 아님) 최신 버전
    pub fn find_latest_open(&self, project_id: i64) -> RepositoryResult<Option<ProfitabilityHeader>> {
        Ok(self
            .find_by_project(project_id)?
            .into_iter()
            .rev()
            .find(|h| h.status.is_open()))
    }

    /// 요약 수치 갱신
    pub fn update_summary(&self, id: i64, summary: &ProfitabilitySummary) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"UPDATE project_profitability
               SET total_revenue = ?1, total_cost = ?2, net_profit = ?3, profit_rate = ?4,
                   updated_at = ?5
               WHERE id = ?6"#,
            params![
                summary.total_revenue,
                summary.total_cost,
                summary.net_profit,
                summary.profit_rate,
                now().format(TIMESTAMP_FORMAT).to_string(),
                id,
            ],
        )?;

        if affected == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// 상태 갱신 (전이 가능 여부는 호출자가 판정)
    pub fn update_status(&self, id: i64, status: ProfitabilityStatus) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE project_profitability SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.to_db_str(), now().format(TIMESTAMP_FORMAT).to_string(), id],
        )?;

        if affected == 0 {
            return Err(not_found(id));
        }
        tracing::info!(id, status = %status, "수지분석서 상태 변경");
        Ok(())
    }

    // ===== 부가 수익/비용 =====

    /// 부가 수익/비용 조회 (없으면 0)
    pub fn find_extra(&self, project_id: i64) -> RepositoryResult<ExtraAdjustment> {
        let conn = self.get_conn()?;
        let extra = conn
            .query_row(
                r#"SELECT extra_revenue, extra_revenue_desc, extra_expense, extra_expense_desc
                   FROM project_profitability_extra WHERE project_id = ?1"#,
                params![project_id],
                |row| {
                    Ok(ExtraAdjustment {
                        extra_revenue: row.get(0)?,
                        extra_revenue_desc: row.get(1)?,
                        extra_expense: row.get(2)?,
                        extra_expense_desc: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(extra.unwrap_or_default())
    }

    pub fn upsert_extra(&self, project_id: i64, extra: &ExtraAdjustment) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"INSERT INTO project_profitability_extra (
                   project_id, extra_revenue, extra_revenue_desc,
                   extra_expense, extra_expense_desc, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(project_id) DO UPDATE SET
                   extra_revenue = ?2, extra_revenue_desc = ?3,
                   extra_expense = ?4, extra_expense_desc = ?5, updated_at = ?6"#,
            params![
                project_id,
                extra.extra_revenue,
                extra.extra_revenue_desc,
                extra.extra_expense,
                extra.extra_expense_desc,
                now().format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }
}

fn not_found(id: i64) -> RepositoryError {
    RepositoryError::NotFound {
        entity: "ProjectProfitability".to_string(),
        id: id.to_string(),
    }
}

fn map_header(row: &rusqlite::Row) -> rusqlite::Result<ProfitabilityHeader> {
    let raw_status: String = row.get(3)?;
    let status = ProfitabilityStatus::from_str(&raw_status).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            rusqlite::types::Type::Text,
            Box::new(RepositoryError::FieldValueError {
                field: "status".to_string(),
                message: format!("알 수 없는 상태: {}", raw_status),
            }),
        )
    })?;

    Ok(ProfitabilityHeader {
        id: row.get(0)?,
        project_id: row.get(1)?,
        version: row.get(2)?,
        status,
        total_revenue: row.get(4)?,
        total_cost: row.get(5)?,
        net_profit: row.get(6)?,
        profit_rate: row.get(7)?,
        updated_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(8)?, TIMESTAMP_FORMAT)
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
            })?,
    })
}
