// ==========================================
// WEWORKS 수지분석 - 핵심 라이브러리
// ==========================================
// 프로젝트 수지분석서(계획)와 수지정산서(실적) 계산 코어
// 기술 스택: Rust + SQLite
// ==========================================

// 다국어 초기화
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 모듈 선언
// ==========================================

// 도메인 계층 - 엔티티와 타입
pub mod domain;

// 엔진 계층 - 집계/계산 규칙
pub mod engine;

// 저장소 계층 - 데이터 접근
pub mod repository;

// 설정 계층
pub mod config;

// SQLite 연결 초기화
pub mod db;

// 로그
pub mod logging;

// 다국어
pub mod i18n;

// API 계층
pub mod api;

// 요약 CSV 내보내기
pub mod exporter;

// ==========================================
// 핵심 타입 재노출
// ==========================================

pub use domain::types::{ExpenseCategory, ProductType, ProfitabilityStatus, StaffGroup};

pub use domain::{
    ExtraAdjustment, ManpowerPlanItem, ProductPlanItem, ProfitabilityHeader, ProfitabilitySummary,
    ProjectExpenseItem, SettlementStatement,
};

pub use engine::{
    aggregate_manpower, aggregate_product, summarize_profitability, ManpowerAggregator,
    ProductAggregator, ProfitabilitySummarizer,
};

pub use api::{ApiError, ApiResult, ProfitabilityApi};

// 버전
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "WEWORKS 수지분석";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
