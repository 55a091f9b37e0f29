// ==========================================
// WEWORKS 수지분석 - 수지분석 API
// ==========================================
// 책임:
// - 수지 요약 계산 (저장된 계획 행 + 부가 수익/비용 + 설정)
// - 부가 수익/비용 저장 및 헤더 요약 갱신
// - 상태 전이
// - 계획 행 저장 (인력/제품/경비)
// - 수지정산
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::db::open_sqlite_connection;
use crate::domain::expense::ProjectExpenseItem;
use crate::domain::manpower::ManpowerPlanItem;
use crate::domain::product::ProductPlanItem;
use crate::domain::profitability::{ExtraAdjustment, ProfitabilityHeader, ProfitabilitySummary};
use crate::domain::settlement::{ActualFigures, SettlementStatement};
use crate::domain::types::ProfitabilityStatus;
use crate::engine::expense::ExpensePlan;
use crate::engine::profitability::ProfitabilitySummarizer;
use crate::engine::settlement::SettlementCalculator;
use crate::repository::{copy_plan_rows, PlanItemRepository, ProfitabilityRepository};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// 수지분석서 한 버전의 계획 행
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanSnapshot {
    pub manpower: Vec<ManpowerPlanItem>,
    pub products: Vec<ProductPlanItem>,
    pub expenses: Vec<ProjectExpenseItem>,
}

// ==========================================
// ProfitabilityApi
// ==========================================
pub struct ProfitabilityApi {
    profitability_repo: Arc<ProfitabilityRepository>,
    plan_item_repo: Arc<PlanItemRepository>,
    config: Arc<ConfigManager>,
}

impl ProfitabilityApi {
    pub fn new(
        profitability_repo: Arc<ProfitabilityRepository>,
        plan_item_repo: Arc<PlanItemRepository>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            profitability_repo,
            plan_item_repo,
            config,
        }
    }

    /// DB 파일 하나로 저장소/설정을 모두 구성
    pub fn open(db_path: &str) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ApiResult<Self> {
        let profitability_repo = ProfitabilityRepository::from_connection(conn.clone())?;
        let plan_item_repo = PlanItemRepository::from_connection(conn.clone())?;
        let config = ConfigManager::from_connection(conn)?;

        Ok(Self::new(
            Arc::new(profitability_repo),
            Arc::new(plan_item_repo),
            Arc::new(config),
        ))
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config
    }

    // ===== 조회 =====

    pub fn get_latest_header(&self, project_id: i64) -> ApiResult<Option<ProfitabilityHeader>> {
        Ok(self.profitability_repo.find_latest(project_id)?)
    }

    pub fn list_versions(&self, project_id: i64) -> ApiResult<Vec<ProfitabilityHeader>> {
        Ok(self.profitability_repo.find_by_project(project_id)?)
    }

    pub fn get_extra(&self, project_id: i64) -> ApiResult<ExtraAdjustment> {
        Ok(self.profitability_repo.find_extra(project_id)?)
    }

    pub fn get_plan_items(&self, profitability_id: i64) -> ApiResult<PlanSnapshot> {
        Ok(PlanSnapshot {
            manpower: self.plan_item_repo.find_manpower_items(profitability_id)?,
            products: self.plan_item_repo.find_product_items(profitability_id)?,
            expenses: self.plan_item_repo.find_expense_items(profitability_id)?,
        })
    }

    /// 새 수지분석서 (대기 상태, 기본 경비 행 포함)
    pub fn create_profitability(&self, project_id: i64) -> ApiResult<ProfitabilityHeader> {
        let header = self
            .profitability_repo
            .create_next_version(project_id, ProfitabilityStatus::Standby)?;
        self.plan_item_repo
            .save_expense_items(header.id, &crate::config::default_expense_items())?;
        Ok(header)
    }

    // ===== 요약 =====

    /// 수지 요약 계산
    ///
    /// 저장된 계획 행과 프로젝트 부가 수익/비용으로 계산한다. 지연 비용률은 설정값.
    pub fn calculate_summary(
        &self,
        profitability_id: i64,
        project_id: i64,
    ) -> ApiResult<ProfitabilitySummary> {
        let plan = self.get_plan_items(profitability_id)?;
        let extra = self.profitability_repo.find_extra(project_id)?;
        let delay_rate = self.config.get_delay_rate()?;

        let summary = ProfitabilitySummarizer::with_delay_rate(delay_rate).summarize(
            &plan.manpower,
            &plan.products,
            &plan.expenses,
            extra.extra_revenue,
            extra.extra_expense,
        );

        tracing::debug!(
            profitability_id,
            project_id,
            net_profit = summary.net_profit,
            "수지 요약 조회"
        );
        Ok(summary)
    }

    /// 부가 수익/비용 저장 + 요약 갱신
    ///
    /// 열린 버전이 없으면 최신 버전의 계획 행을 복사해 다음 버전(작성중)을 만든다.
    /// 대기 상태였던 버전은 작성중으로 바뀐다.
    pub fn save_extra_and_summary(
        &self,
        project_id: i64,
        extra: &ExtraAdjustment,
    ) -> ApiResult<ProfitabilityHeader> {
        if !extra.extra_revenue.is_finite() || !extra.extra_expense.is_finite() {
            return Err(ApiError::InvalidInput(
                "부가 수익/비용은 유한한 수여야 합니다".to_string(),
            ));
        }

        self.profitability_repo.upsert_extra(project_id, extra)?;

        let header = match self.profitability_repo.find_latest_open(project_id)? {
            Some(header) => header,
            None => self.open_next_version(project_id)?,
        };

        let summary = self.calculate_summary(header.id, project_id)?;
        self.profitability_repo.update_summary(header.id, &summary)?;

        if header.status == ProfitabilityStatus::Standby {
            self.profitability_repo
                .update_status(header.id, ProfitabilityStatus::InProgress)?;
        }

        tracing::info!(
            project_id,
            profitability_id = header.id,
            total_revenue = summary.total_revenue,
            net_profit = summary.net_profit,
            "부가 수익/비용 및 요약 저장"
        );

        self.profitability_repo
            .find_by_id(header.id)?
            .ok_or_else(|| ApiError::NotFound(format!("ProjectProfitability(id={})", header.id)))
    }

    /// 다음 버전(작성중) 생성, 직전 버전의 계획 행을 같은 트랜잭션에서 복사
    fn open_next_version(&self, project_id: i64) -> ApiResult<ProfitabilityHeader> {
        let previous = self.profitability_repo.find_latest(project_id)?;
        let header = self.profitability_repo.create_next_version_with(
            project_id,
            ProfitabilityStatus::InProgress,
            |tx, new_id| {
                if let Some(previous) = &previous {
                    let copied = copy_plan_rows(tx, previous.id, new_id)?;
                    tracing::debug!(from = previous.id, to = new_id, copied, "계획 행 복사");
                }
                Ok(())
            },
        )?;
        Ok(header)
    }

    // ===== 상태 =====

    /// 최신 버전의 상태 변경 (같은 상태면 변경 없음)
    pub fn change_status(
        &self,
        project_id: i64,
        target: ProfitabilityStatus,
    ) -> ApiResult<ProfitabilityHeader> {
        let mut header = self
            .profitability_repo
            .find_latest(project_id)?
            .ok_or_else(|| ApiError::NotFound(format!("project_id={}의 수지분석서", project_id)))?;

        let next = header.status.transition_to(target)?;
        if next != header.status {
            self.profitability_repo.update_status(header.id, next)?;
            header.status = next;
        }
        Ok(header)
    }

    // ===== 계획 행 저장 =====

    pub fn save_manpower_plan(
        &self,
        profitability_id: i64,
        mut items: Vec<ManpowerPlanItem>,
    ) -> ApiResult<usize> {
        self.ensure_editable(profitability_id)?;
        ensure_unique_ids(items.iter().map(|i| i.id))?;

        for item in &mut items {
            item.attach_staff_group();
        }
        Ok(self.plan_item_repo.save_manpower_items(profitability_id, &items)?)
    }

    /// 제품계획 저장 (기준가/할인율 재계산 후)
    pub fn save_product_plan(
        &self,
        profitability_id: i64,
        mut items: Vec<ProductPlanItem>,
    ) -> ApiResult<usize> {
        self.ensure_editable(profitability_id)?;
        ensure_unique_ids(items.iter().map(|i| i.id))?;

        for item in &mut items {
            item.recalculate();
        }
        Ok(self.plan_item_repo.save_product_items(profitability_id, &items)?)
    }

    /// 경비계획 저장
    ///
    /// 자동 계산 행은 저장된 인력계획과 설정된 기준경비로 다시 계산한 뒤 저장한다.
    pub fn save_expense_plan(
        &self,
        profitability_id: i64,
        items: Vec<ProjectExpenseItem>,
    ) -> ApiResult<Vec<ProjectExpenseItem>> {
        self.ensure_editable(profitability_id)?;
        ensure_unique_ids(items.iter().map(|i| i.id))?;

        let manpower = self.plan_item_repo.find_manpower_items(profitability_id)?;
        let standards = self.config.get_standard_expenses()?;

        let mut plan = ExpensePlan::new(items, &manpower, &standards);
        plan.recalculate_all();
        let items = plan.into_items();

        self.plan_item_repo.save_expense_items(profitability_id, &items)?;
        Ok(items)
    }

    // ===== 정산 =====

    /// 수지정산서 (계획 = 현재 요약)
    pub fn settle(
        &self,
        profitability_id: i64,
        project_id: i64,
        actual: ActualFigures,
    ) -> ApiResult<SettlementStatement> {
        let summary = self.calculate_summary(profitability_id, project_id)?;
        Ok(SettlementCalculator::new().settle(&summary, actual))
    }

    fn ensure_editable(&self, profitability_id: i64) -> ApiResult<ProfitabilityHeader> {
        let header = self
            .profitability_repo
            .find_by_id(profitability_id)?
            .ok_or_else(|| ApiError::NotFound(format!("ProjectProfitability(id={})", profitability_id)))?;

        if !header.status.is_open() {
            return Err(ApiError::BusinessRuleViolation(format!(
                "{} 상태의 수지분석서는 수정할 수 없습니다",
                header.status
            )));
        }
        Ok(header)
    }
}

fn ensure_unique_ids(ids: impl Iterator<Item = i64>) -> ApiResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ApiError::InvalidInput(format!("중복된 행 id: {}", id)));
        }
    }
    Ok(())
}
