// ==========================================
// WEWORKS 수지분석 - 저장소 계층 오류
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 저장소 계층 오류
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 데이터베이스 =====
    #[error("레코드 없음: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("데이터베이스 잠금 획득 실패: {0}")]
    LockError(String),

    #[error("데이터베이스 쿼리 실패: {0}")]
    DatabaseQueryError(String),

    #[error("유일 제약 위반: {0}")]
    UniqueConstraintViolation(String),

    #[error("외래 키 제약 위반: {0}")]
    ForeignKeyViolation(String),

    // ===== 데이터 품질 =====
    #[error("필드 값 오류 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    #[error("직렬화 실패: {0}")]
    SerializationError(String),

    // ===== 일반 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// Result 별칭
pub type RepositoryResult<T> = Result<T, RepositoryError>;
