// ==========================================
// WEWORKS 수지분석 - API 계층
// ==========================================
// 책임: 저장소/엔진/설정을 묶어 업무 단위 기능 제공
// ==========================================

pub mod error;
pub mod profitability_api;

pub use error::{ApiError, ApiResult};
pub use profitability_api::{PlanSnapshot, ProfitabilityApi};
