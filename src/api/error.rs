// ==========================================
// WEWORKS 수지분석 - API 계층 오류
// ==========================================
// 저장소/설정 오류를 사용자에게 보여줄 업무 오류로 변환한다.
// ==========================================

use crate::config::ConfigError;
use crate::domain::types::ProfitabilityStatus;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API 계층 오류
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 업무 규칙 =====
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    #[error("대상 없음: {0}")]
    NotFound(String),

    #[error("허용되지 않는 상태 전이: {from} → {to}")]
    InvalidStateTransition {
        from: ProfitabilityStatus,
        to: ProfitabilityStatus,
    },

    #[error("업무 규칙 위반: {0}")]
    BusinessRuleViolation(String),

    // ===== 데이터 접근 =====
    #[error("데이터베이스 오류: {0}")]
    DatabaseError(String),

    #[error("설정 오류: {0}")]
    ConfigError(String),

    // ===== 일반 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("유일 제약 위반: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("외래 키 제약 위반: {}", msg))
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("{}: {}", field, message))
            }
            RepositoryError::Other(e) => ApiError::Other(e),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<(ProfitabilityStatus, ProfitabilityStatus)> for ApiError {
    fn from((from, to): (ProfitabilityStatus, ProfitabilityStatus)) -> Self {
        ApiError::InvalidStateTransition { from, to }
    }
}

/// Result 별칭
pub type ApiResult<T> = Result<T, ApiError>;
