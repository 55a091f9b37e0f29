// ==========================================
// WEWORKS 수지분석 - 저장소 계층
// ==========================================
// 책임: 데이터 접근 인터페이스, DB 세부사항 은닉
// 원칙: 업무 규칙 없음, 모든 쿼리는 파라미터 바인딩
// ==========================================

pub mod error;
pub mod plan_item_repo;
pub mod profitability_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use plan_item_repo::{copy_plan_rows, PlanItemRepository};
pub use profitability_repo::ProfitabilityRepository;
