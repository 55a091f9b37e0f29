// ==========================================
// WEWORKS 수지분석 - 도메인 계층
// ==========================================
// 책임: 엔티티/값 타입/상태 정의
// 원칙: 데이터 접근 로직 없음, 집계 로직 없음 (engine 담당)
// ==========================================

pub mod expense;
pub mod manpower;
pub mod numeric;
pub mod period;
pub mod product;
pub mod profitability;
pub mod settlement;
pub mod types;

// 핵심 타입 재노출
pub use expense::{ExpenseBasis, ProjectExpenseItem, StandardExpense};
pub use manpower::ManpowerPlanItem;
pub use period::{AnalysisPeriod, YearMonth};
pub use product::{ProductEdit, ProductMasterItem, ProductPlanItem};
pub use profitability::{
    ExtraAdjustment, ManpowerTotals, ProductSegment, ProductSubtotal, ProductSummary,
    ProfitabilityHeader, ProfitabilitySummary, SegmentTotal, ServiceSegment, ServiceSummary,
};
pub use settlement::{
    ActualFigures, ActualTotals, PlannedFigures, SettlementStatement, SettlementVariance,
};
pub use types::{ExpenseCategory, ProductType, ProfitabilityStatus, RequestType, StaffGroup};
