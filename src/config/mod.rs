// ==========================================
// WEWORKS 수지분석 - 설정 계층
// ==========================================
// 책임: 계산 설정 로드/저장, 기준경비 기본값
// 저장: config_kv 테이블 (scope_id = 'global')
// ==========================================

pub mod config_manager;
pub mod standard_expense;

pub use config_manager::{config_keys, CalcConfig, ConfigError, ConfigManager, ConfigResult};
pub use standard_expense::{default_expense_items, default_standard_expenses};
