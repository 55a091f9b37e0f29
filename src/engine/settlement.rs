// ==========================================
// WEWORKS 수지분석 - 수지정산 엔진
// ==========================================
// 계획: 수지분석서 요약
// 실적: 정산 시 입력한 세부 항목
// 차이: 실적 - 계획
// ==========================================

use crate::domain::profitability::ProfitabilitySummary;
use crate::domain::settlement::{
    ActualFigures, ActualTotals, PlannedFigures, SettlementStatement, SettlementVariance,
};

impl PlannedFigures {
    /// 수지분석서 요약 → 계획 수치
    pub fn from_summary(summary: &ProfitabilitySummary) -> Self {
        let service = &summary.service;
        Self {
            revenue: summary.total_revenue,
            cost: summary.total_cost,
            labor_cost: service.internal.cost
                + service.external.cost
                + service.internal.delay
                + service.external.delay,
            other_cost: service.general_expense + service.special_expense,
            profit: summary.net_profit,
            profit_rate: summary.profit_rate,
            svc_mm_own: summary.our_mm,
            svc_mm_ext: summary.others_mm,
        }
    }
}

impl ActualFigures {
    /// 실적 합계
    pub fn totals(&self) -> ActualTotals {
        let revenue = self.prod_rev_own + self.prod_rev_ext + self.svc_rev_own + self.svc_rev_ext;
        let labor_cost = self.svc_cost_own + self.svc_cost_ext;
        let other_cost = self.expense_general + self.expense_special;
        let cost = self.prod_cost_own + self.prod_cost_ext + labor_cost + other_cost;
        let profit = revenue - cost;

        ActualTotals {
            revenue,
            cost,
            labor_cost,
            other_cost,
            profit,
            profit_rate: rate(profit, revenue),
        }
    }
}

fn rate(profit: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        profit / revenue * 100.0
    }
}

// ==========================================
// SettlementCalculator - 계획 대비 실적
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementCalculator;

impl SettlementCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn variance(
        &self,
        planned: &PlannedFigures,
        actual: &ActualFigures,
        totals: &ActualTotals,
    ) -> SettlementVariance {
        SettlementVariance {
            revenue: totals.revenue - planned.revenue,
            cost: totals.cost - planned.cost,
            profit: totals.profit - planned.profit,
            profit_rate: totals.profit_rate - planned.profit_rate,
            svc_mm_own: actual.svc_mm_own - planned.svc_mm_own,
            svc_mm_ext: actual.svc_mm_ext - planned.svc_mm_ext,
        }
    }

    /// 수지정산서 작성
    pub fn settle(&self, summary: &ProfitabilitySummary, actual: ActualFigures) -> SettlementStatement {
        let planned = PlannedFigures::from_summary(summary);
        let actual_totals = actual.totals();
        let variance = self.variance(&planned, &actual, &actual_totals);

        tracing::debug!(
            planned_profit = planned.profit,
            actual_profit = actual_totals.profit,
            profit_variance = variance.profit,
            "수지정산 계산 완료"
        );

        SettlementStatement {
            planned,
            actual,
            actual_totals,
            variance,
        }
    }
}

pub fn settle(summary: &ProfitabilitySummary, actual: ActualFigures) -> SettlementStatement {
    SettlementCalculator::new().settle(summary, actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::manpower::ManpowerPlanItem;
    use crate::engine::profitability::summarize_profitability;

    fn planned_summary() -> ProfitabilitySummary {
        let manpower = vec![
            ManpowerPlanItem::new(1, "위엠비_개발")
                .with_allocation("2025-01", 2.0)
                .with_proposed_unit_price(1000.0)
                .with_internal_unit_price(500.0),
            ManpowerPlanItem::new(2, "외주_개발")
                .with_allocation("2025-01", 1.0)
                .with_proposed_unit_price(800.0)
                .with_internal_unit_price(700.0),
        ];
        summarize_profitability(&manpower, &[], &[], 0.0, 0.0)
    }

    #[test]
    fn test_planned_from_summary() {
        let planned = PlannedFigures::from_summary(&planned_summary());
        assert_eq!(planned.revenue, 2800.0);
        assert_eq!(planned.labor_cost, 1700.0);
        assert_eq!(planned.other_cost, 0.0);
        assert_eq!(planned.cost, 1700.0);
        assert_eq!(planned.profit, 1100.0);
        assert_eq!(planned.svc_mm_own, 2.0);
        assert_eq!(planned.svc_mm_ext, 1.0);
    }

    #[test]
    fn test_actual_totals() {
        let actual = ActualFigures {
            prod_rev_own: 100.0,
            svc_rev_own: 2000.0,
            svc_rev_ext: 900.0,
            prod_cost_own: 50.0,
            svc_cost_own: 1000.0,
            svc_cost_ext: 800.0,
            expense_general: 30.0,
            expense_special: 20.0,
            ..Default::default()
        };

        let totals = actual.totals();
        assert_eq!(totals.revenue, 3000.0);
        assert_eq!(totals.labor_cost, 1800.0);
        assert_eq!(totals.other_cost, 50.0);
        assert_eq!(totals.cost, 1900.0);
        assert_eq!(totals.profit, 1100.0);
        assert!((totals.profit_rate - 1100.0 / 3000.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_actual_revenue_rate() {
        let actual = ActualFigures {
            expense_general: 10.0,
            ..Default::default()
        };
        let totals = actual.totals();
        assert_eq!(totals.profit, -10.0);
        assert_eq!(totals.profit_rate, 0.0);
    }

    #[test]
    fn test_variance_is_actual_minus_planned() {
        let actual = ActualFigures {
            svc_rev_own: 2000.0,
            svc_rev_ext: 700.0,
            svc_cost_own: 1100.0,
            svc_cost_ext: 700.0,
            svc_mm_own: 2.5,
            svc_mm_ext: 1.0,
            ..Default::default()
        };

        let statement = settle(&planned_summary(), actual);
        assert_eq!(statement.variance.revenue, -100.0);
        assert_eq!(statement.variance.cost, 100.0);
        assert_eq!(statement.variance.profit, -200.0);
        assert_eq!(statement.variance.svc_mm_own, 0.5);
        assert_eq!(statement.variance.svc_mm_ext, 0.0);
        assert_eq!(
            statement.variance.profit_rate,
            statement.actual_totals.profit_rate - statement.planned.profit_rate
        );
    }

    #[test]
    fn test_deserialize_lenient_actuals() {
        let json = r#"{"svcRevOwn": "1500", "svcCostOwn": 1000, "expenseGeneral": null}"#;
        let actual: ActualFigures = serde_json::from_str(json).unwrap();
        assert_eq!(actual.svc_rev_own, 1500.0);
        assert_eq!(actual.totals().profit, 500.0);
    }
}
