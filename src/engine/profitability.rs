// ==========================================
// WEWORKS 수지분석 - 수지 요약 엔진
// ==========================================
// 입력: 인력/제품/경비 행 + 부가 수익/비용
// 출력: ProfitabilitySummary
// 계산 순서:
//   1. 인력 집계 → 당사/외주 용역 제안/원가
//   2. 경비 구분별 합계
//   3. 용역 원가 = 당사 + 외주 + 지연비용 + 일반 + 특별
//   4. 제품 집계 (자사/타사)
//   5. 총매출 / 부가 반영 전 총원가 / 핵심 이익
//   6. 순이익, 이익률, 총원가(= 총매출 - 순이익)
// ==========================================

use crate::domain::expense::ProjectExpenseItem;
use crate::domain::manpower::ManpowerPlanItem;
use crate::domain::numeric::round_half_up;
use crate::domain::product::ProductPlanItem;
use crate::domain::profitability::{
    ProductSegment, ProductSummary, ProfitabilitySummary, SegmentTotal, ServiceSummary,
};
use crate::domain::types::ProductType;
use crate::engine::expense::sum_by_category;
use crate::engine::manpower::ManpowerAggregator;
use crate::engine::product::ProductAggregator;

/// 기본 지연 비용률 (0%)
pub const DEFAULT_DELAY_RATE: f64 = 0.0;

// ==========================================
// ProfitabilitySummarizer - 수지 요약
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ProfitabilitySummarizer {
    delay_rate: f64,
    manpower: ManpowerAggregator,
    product: ProductAggregator,
}

impl Default for ProfitabilitySummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfitabilitySummarizer {
    pub fn new() -> Self {
        Self::with_delay_rate(DEFAULT_DELAY_RATE)
    }

    /// 지연 비용률 지정 (용역 원가에 대한 비율, 0.05 = 5%)
    pub fn with_delay_rate(delay_rate: f64) -> Self {
        let delay_rate = if delay_rate.is_finite() { delay_rate } else { 0.0 };
        Self {
            delay_rate,
            manpower: ManpowerAggregator::new(),
            product: ProductAggregator::new(),
        }
    }

    pub fn delay_rate(&self) -> f64 {
        self.delay_rate
    }

    /// 수지 요약 계산
    pub fn summarize(
        &self,
        manpower_items: &[ManpowerPlanItem],
        product_items: &[ProductPlanItem],
        expense_items: &[ProjectExpenseItem],
        extra_revenue: f64,
        extra_expense: f64,
    ) -> ProfitabilitySummary {
        let extra_revenue = finite_or_zero(extra_revenue);
        let extra_expense = finite_or_zero(extra_expense);

        // 1. 용역
        let mut manpower = self.manpower.aggregate(manpower_items);
        manpower.internal.delay = round_half_up(manpower.internal.cost * self.delay_rate);
        manpower.external.delay = round_half_up(manpower.external.cost * self.delay_rate);

        // 2. 경비
        let expenses = sum_by_category(expense_items);

        // 3. 용역 합계
        let service_proposal = manpower.internal.proposal + manpower.external.proposal;
        let service_cost = manpower.internal.cost
            + manpower.external.cost
            + manpower.internal.delay
            + manpower.external.delay
            + expenses.general
            + expenses.special;

        let service = ServiceSummary {
            internal: manpower.internal,
            external: manpower.external,
            general_expense: expenses.general,
            special_expense: expenses.special,
            total: SegmentTotal::new(service_proposal, service_cost),
        };

        // 4. 제품
        let own = self.product.subtotal(product_items, ProductType::SelfSupplied);
        let other = self.product.subtotal(product_items, ProductType::ThirdParty);
        let product = ProductSummary {
            internal: ProductSegment {
                proposal: own.proposal,
                cost: own.cost,
            },
            external: ProductSegment {
                proposal: other.proposal,
                cost: other.cost,
            },
            total: SegmentTotal::new(own.proposal + other.proposal, own.cost + other.cost),
        };

        // 5. 전체
        let total_revenue = service.total.proposal + product.total.proposal;
        let total_cost_before_extra = service.total.cost + product.total.cost;
        let core_profit = total_revenue - total_cost_before_extra;

        // 6. 부가 수익/비용 반영
        let net_profit = core_profit + extra_revenue - extra_expense;
        let profit_rate = if total_revenue == 0.0 {
            0.0
        } else {
            net_profit / total_revenue * 100.0
        };

        tracing::debug!(
            total_revenue,
            net_profit,
            profit_rate,
            delay_rate = self.delay_rate,
            "수지 요약 계산 완료"
        );

        ProfitabilitySummary {
            service,
            product,
            total_revenue,
            // 역산: 총매출 - 총원가 == 순이익이 항상 성립
            total_cost: total_revenue - net_profit,
            net_profit,
            profit_rate,
            core_profit,
            extra_revenue,
            extra_expense,
            our_mm: manpower.internal.mm,
            others_mm: manpower.external.mm,
        }
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 수지 요약 (기본 지연 비용률)
pub fn summarize_profitability(
    manpower_items: &[ManpowerPlanItem],
    product_items: &[ProductPlanItem],
    expense_items: &[ProjectExpenseItem],
    extra_revenue: f64,
    extra_expense: f64,
) -> ProfitabilitySummary {
    ProfitabilitySummarizer::new().summarize(
        manpower_items,
        product_items,
        expense_items,
        extra_revenue,
        extra_expense,
    )
}
