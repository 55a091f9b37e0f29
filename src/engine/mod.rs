// ==========================================
// WEWORKS 수지분석 - 엔진 계층
// ==========================================
// 책임: 집계/계산 규칙 구현
// 원칙: 엔진은 SQL을 다루지 않는다. 입력 행을 변경하지 않는다.
// ==========================================

pub mod expense;
pub mod manpower;
pub mod product;
pub mod profitability;
pub mod settlement;

// 핵심 엔진 재노출
pub use expense::{
    monthly_headcount, sum_by_category, ExpenseCalculator, ExpensePlan, ExpenseTotals,
    MonthlyHeadcount,
};
pub use manpower::{aggregate_manpower, ManpowerAggregator};
pub use product::{aggregate_product, aggregate_product_total, ProductAggregator};
pub use profitability::{summarize_profitability, ProfitabilitySummarizer, DEFAULT_DELAY_RATE};
pub use settlement::{settle, SettlementCalculator};
