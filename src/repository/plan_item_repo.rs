// ==========================================
// WEWORKS 수지분석 - 계획 행 저장소
// ==========================================
// 인력계획 / 제품계획 / 경비계획 행
// 저장: 수지분석서 단위로 전체 삭제 후 재삽입 (한 트랜잭션)
// 조회: 삽입 순서 유지
// 월별 맵은 JSON 문자열 컬럼으로 저장
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::expense::{ExpenseBasis, ProjectExpenseItem};
use crate::domain::manpower::ManpowerPlanItem;
use crate::domain::numeric::month_map_from_value;
use crate::domain::product::ProductPlanItem;
use crate::domain::types::{ExpenseCategory, ProductType, RequestType, StaffGroup};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Transaction};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// PlanItemRepository
// ==========================================
pub struct PlanItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlanItemRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

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
            CREATE TABLE IF NOT EXISTS profitability_manpower (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                profitability_id INTEGER NOT NULL,
                item_id INTEGER NOT NULL,
                project_name TEXT NOT NULL DEFAULT '',
                role TEXT NOT NULL DEFAULT '',
                detailed_task TEXT NOT NULL DEFAULT '',
                company_name TEXT NOT NULL DEFAULT '',
                affiliation_group TEXT NOT NULL DEFAULT '',
                staff_group TEXT,
                wmb_rank TEXT NOT NULL DEFAULT '',
                grade TEXT NOT NULL DEFAULT '',
                name TEXT NOT NULL DEFAULT '',
                user_id INTEGER,
                monthly_allocation TEXT NOT NULL DEFAULT '{}',
                proposed_unit_price REAL,
                proposed_amount REAL,
                internal_unit_price REAL,
                internal_amount REAL
            );
            CREATE INDEX IF NOT EXISTS idx_manpower_profitability
                ON profitability_manpower (profitability_id);

            CREATE TABLE IF NOT EXISTS profitability_product (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                profitability_id INTEGER NOT NULL,
                item_id INTEGER NOT NULL,
                product_type TEXT NOT NULL,
                product_id INTEGER,
                company_name TEXT NOT NULL DEFAULT '',
                product_name TEXT NOT NULL DEFAULT '',
                quantity REAL,
                unit_price REAL,
                base_price REAL NOT NULL DEFAULT 0,
                proposal_price REAL,
                cost_price REAL,
                discount_rate REAL NOT NULL DEFAULT 0,
                request_date TEXT NOT NULL DEFAULT '',
                request_type TEXT NOT NULL DEFAULT '',
                contract_cost_price REAL
            );
            CREATE INDEX IF NOT EXISTS idx_product_profitability
                ON profitability_product (profitability_id);

            CREATE TABLE IF NOT EXISTS profitability_expense (
                row_id INTEGER PRIMARY KEY AUTOINCREMENT,
                profitability_id INTEGER NOT NULL,
                item_id INTEGER NOT NULL,
                category TEXT NOT NULL,
                item TEXT NOT NULL DEFAULT '',
                monthly_values TEXT NOT NULL DEFAULT '{}',
                is_auto_calculated INTEGER NOT NULL DEFAULT 0,
                basis TEXT,
                standard_id INTEGER
            );
            CREATE INDEX IF NOT EXISTS idx_expense_profitability
                ON profitability_expense (profitability_id);
            "#,
        )?;
        Ok(())
    }

    // ===== 인력계획 =====

    /// 인력계획 저장 (기존 행 교체)
    ///
    /// 당사/외주 태그가 없는 행은 저장 시점에 태그를 붙인다.
    pub fn save_manpower_items(
        &self,
        profitability_id: i64,
        items: &[ManpowerPlanItem],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM profitability_manpower WHERE profitability_id = ?1",
            params![profitability_id],
        )?;

        for item in items {
            tx.execute(
                r#"INSERT INTO profitability_manpower (
                    profitability_id, item_id, project_name, role, detailed_task,
                    company_name, affiliation_group, staff_group, wmb_rank, grade, name,
                    user_id, monthly_allocation, proposed_unit_price, proposed_amount,
                    internal_unit_price, internal_amount
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"#,
                params![
                    profitability_id,
                    item.id,
                    item.project_name,
                    item.role,
                    item.detailed_task,
                    item.company_name,
                    item.affiliation_group,
                    item.group().to_db_str(),
                    item.wmb_rank,
                    item.grade,
                    item.name,
                    item.user_id,
                    serde_json::to_string(&item.monthly_allocation)?,
                    item.proposed_unit_price,
                    item.proposed_amount,
                    item.internal_unit_price,
                    item.internal_amount,
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!(profitability_id, count = items.len(), "인력계획 저장");
        Ok(items.len())
    }

    pub fn find_manpower_items(&self, profitability_id: i64) -> RepositoryResult<Vec<ManpowerPlanItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT item_id, project_name, role, detailed_task, company_name,
                      affiliation_group, staff_group, wmb_rank, grade, name, user_id,
                      monthly_allocation, proposed_unit_price, proposed_amount,
                      internal_unit_price, internal_amount
               FROM profitability_manpower
               WHERE profitability_id = ?1
               ORDER BY row_id"#,
        )?;

        let items = stmt
            .query_map(params![profitability_id], |row| {
                let affiliation_group: String = row.get(5)?;
                let staff_group = row
                    .get::<_, Option<String>>(6)?
                    .and_then(|s| StaffGroup::from_db_str(&s))
                    .or_else(|| Some(StaffGroup::from_affiliation(&affiliation_group)));

                Ok(ManpowerPlanItem {
                    id: row.get(0)?,
                    project_name: row.get(1)?,
                    role: row.get(2)?,
                    detailed_task: row.get(3)?,
                    company_name: row.get(4)?,
                    affiliation_group,
                    staff_group,
                    wmb_rank: row.get(7)?,
                    grade: row.get(8)?,
                    name: row.get(9)?,
                    user_id: row.get(10)?,
                    monthly_allocation: parse_month_map(row, 11)?,
                    proposed_unit_price: row.get(12)?,
                    proposed_amount: row.get(13)?,
                    internal_unit_price: row.get(14)?,
                    internal_amount: row.get(15)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    // ===== 제품계획 =====

    pub fn save_product_items(
        &self,
        profitability_id: i64,
        items: &[ProductPlanItem],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM profitability_product WHERE profitability_id = ?1",
            params![profitability_id],
        )?;

        for item in items {
            tx.execute(
                r#"INSERT INTO profitability_product (
                    profitability_id, item_id, product_type, product_id, company_name,
                    product_name, quantity, unit_price, base_price, proposal_price,
                    cost_price, discount_rate, request_date, request_type, contract_cost_price
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"#,
                params![
                    profitability_id,
                    item.id,
                    item.product_type.label(),
                    item.product_id,
                    item.company_name,
                    item.product_name,
                    item.quantity,
                    item.unit_price,
                    item.base_price,
                    item.proposal_price,
                    item.cost_price,
                    item.discount_rate,
                    item.request_date,
                    item.request_type.label(),
                    item.contract_cost_price,
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!(profitability_id, count = items.len(), "제품계획 저장");
        Ok(items.len())
    }

    pub fn find_product_items(&self, profitability_id: i64) -> RepositoryResult<Vec<ProductPlanItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT item_id, product_type, product_id, company_name, product_name,
                      quantity, unit_price, base_price, proposal_price, cost_price,
                      discount_rate, request_date, request_type, contract_cost_price
               FROM profitability_product
               WHERE profitability_id = ?1
               ORDER BY row_id"#,
        )?;

        let items = stmt
            .query_map(params![profitability_id], |row| {
                let product_type = ProductType::from(row.get::<_, String>(1)?);

                Ok(ProductPlanItem {
                    id: row.get(0)?,
                    product_type,
                    product_id: row.get(2)?,
                    company_name: row.get(3)?,
                    product_name: row.get(4)?,
                    quantity: row.get(5)?,
                    unit_price: row.get(6)?,
                    base_price: row.get(7)?,
                    proposal_price: row.get(8)?,
                    cost_price: row.get(9)?,
                    discount_rate: row.get(10)?,
                    request_date: row.get(11)?,
                    request_type: RequestType::from_label(&row.get::<_, String>(12)?),
                    contract_cost_price: row.get(13)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    // ===== 경비계획 =====

    pub fn save_expense_items(
        &self,
        profitability_id: i64,
        items: &[ProjectExpenseItem],
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            "DELETE FROM profitability_expense WHERE profitability_id = ?1",
            params![profitability_id],
        )?;

        for item in items {
            tx.execute(
                r#"INSERT INTO profitability_expense (
                    profitability_id, item_id, category, item, monthly_values,
                    is_auto_calculated, basis, standard_id
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
                params![
                    profitability_id,
                    item.id,
                    item.category.label(),
                    item.item,
                    serde_json::to_string(&item.monthly_values)?,
                    if item.is_auto_calculated { 1 } else { 0 },
                    item.basis.map(|b| b.to_db_str()),
                    item.standard_id,
                ],
            )?;
        }

        tx.commit()?;
        tracing::info!(profitability_id, count = items.len(), "경비계획 저장");
        Ok(items.len())
    }

    pub fn find_expense_items(&self, profitability_id: i64) -> RepositoryResult<Vec<ProjectExpenseItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT item_id, category, item, monthly_values, is_auto_calculated, basis, standard_id
               FROM profitability_expense
               WHERE profitability_id = ?1
               ORDER BY row_id"#,
        )?;

        let items = stmt
            .query_map(params![profitability_id], |row| {
                Ok(ProjectExpenseItem {
                    id: row.get(0)?,
                    category: ExpenseCategory::from(row.get::<_, String>(1)?),
                    item: row.get(2)?,
                    monthly_values: parse_month_map(row, 3)?,
                    is_auto_calculated: row.get::<_, i32>(4)? == 1,
                    basis: row
                        .get::<_, Option<String>>(5)?
                        .and_then(|s| ExpenseBasis::from_db_str(&s)),
                    standard_id: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

// ==========================================
// 버전 간 계획 행 복사
// ==========================================
const MANPOWER_COLUMNS: &str = "item_id, project_name, role, detailed_task, company_name, \
    affiliation_group, staff_group, wmb_rank, grade, name, user_id, monthly_allocation, \
    proposed_unit_price, proposed_amount, internal_unit_price, internal_amount";

const PRODUCT_COLUMNS: &str = "item_id, product_type, product_id, company_name, product_name, \
    quantity, unit_price, base_price, proposal_price, cost_price, discount_rate, request_date, \
    request_type, contract_cost_price";

const EXPENSE_COLUMNS: &str =
    "item_id, category, item, monthly_values, is_auto_calculated, basis, standard_id";

/// 한 수지분석서의 계획 행 전체를 다른 수지분석서로 복사
///
/// 호출자의 트랜잭션 안에서 실행된다. 행 순서는 유지된다.
pub fn copy_plan_rows(tx: &Transaction<'_>, from_id: i64, to_id: i64) -> RepositoryResult<usize> {
    let mut copied = 0;
    for (table, columns) in [
        ("profitability_manpower", MANPOWER_COLUMNS),
        ("profitability_product", PRODUCT_COLUMNS),
        ("profitability_expense", EXPENSE_COLUMNS),
    ] {
        copied += tx.execute(
            &format!(
                "INSERT INTO {table} (profitability_id, {columns}) \
                 SELECT ?2, {columns} FROM {table} WHERE profitability_id = ?1 ORDER BY row_id"
            ),
            params![from_id, to_id],
        )?;
    }
    Ok(copied)
}

/// JSON 컬럼 → 월별 맵 (숫자가 아닌 값은 0)
fn parse_month_map(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<BTreeMap<String, f64>> {
    let raw: String = row.get(idx)?;
    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(month_map_from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::standard_expense::default_expense_items;

    fn repo() -> PlanItemRepository {
        let conn = Connection::open_in_memory().unwrap();
        PlanItemRepository::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_manpower_round_trip_keeps_order_and_group() {
        let repo = repo();
        let mut legacy = ManpowerPlanItem::new(2, "외주_디자인").with_allocation("2025-03", 0.5);
        legacy.staff_group = None;

        let items = vec![
            ManpowerPlanItem::new(9, "위엠비_개발")
                .with_allocation("2025-01", 1.0)
                .with_proposed_unit_price(1200.0),
            legacy,
        ];
        assert_eq!(repo.save_manpower_items(1, &items).unwrap(), 2);

        let loaded = repo.find_manpower_items(1).unwrap();
        assert_eq!(loaded.iter().map(|i| i.id).collect::<Vec<_>>(), vec![9, 2]);
        assert_eq!(loaded[0].proposed_unit_price, Some(1200.0));
        assert_eq!(loaded[1].staff_group, Some(StaffGroup::External));
        assert_eq!(loaded[1].monthly_allocation["2025-03"], 0.5);
    }

    #[test]
    fn test_save_replaces_previous_rows() {
        let repo = repo();
        repo.save_manpower_items(1, &[ManpowerPlanItem::new(1, "위엠비_개발")])
            .unwrap();
        repo.save_manpower_items(1, &[ManpowerPlanItem::new(2, "외주_개발")])
            .unwrap();
        repo.save_manpower_items(2, &[ManpowerPlanItem::new(3, "위엠비_기획")])
            .unwrap();

        let loaded = repo.find_manpower_items(1).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
        assert_eq!(repo.find_manpower_items(2).unwrap().len(), 1);
    }

    #[test]
    fn test_product_round_trip() {
        let repo = repo();
        let mut item = ProductPlanItem::new(ProductType::ThirdParty, 2.0, 500.0)
            .with_id(5)
            .with_proposal_price(900.0)
            .with_cost_price(700.0);
        item.request_type = RequestType::ContractChanged;

        repo.save_product_items(1, &[item.clone()]).unwrap();
        assert_eq!(repo.find_product_items(1).unwrap(), vec![item]);
    }

    #[test]
    fn test_expense_round_trip() {
        let repo = repo();
        let items: Vec<ProjectExpenseItem> = default_expense_items()
            .into_iter()
            .map(|i| i.with_value("2025-01", 10.0))
            .collect();

        repo.save_expense_items(1, &items).unwrap();
        assert_eq!(repo.find_expense_items(1).unwrap(), items);
    }

    #[test]
    fn test_copy_plan_rows_keeps_order() {
        let conn = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
        let repo = PlanItemRepository::from_connection(conn.clone()).unwrap();
        repo.save_manpower_items(4, &[ManpowerPlanItem::new(1, "위엠비_개발")])
            .unwrap();
        repo.save_expense_items(4, &default_expense_items()).unwrap();

        {
            let mut guard = conn.lock().unwrap();
            let tx = guard.transaction().unwrap();
            assert_eq!(copy_plan_rows(&tx, 4, 5).unwrap(), 10);
            tx.commit().unwrap();
        }

        assert_eq!(repo.find_expense_items(5).unwrap(), repo.find_expense_items(4).unwrap());
        assert_eq!(repo.find_manpower_items(5).unwrap().len(), 1);
        assert!(repo.find_product_items(5).unwrap().is_empty());
    }
}
