use thiserror::Error;
use serde::Serialize;

use crate::core::features::unit_converter::ConvertError;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Storage Error: {0}")]
    Storage(String),

    #[error("Conversion Error: {0}")]
    Conversion(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Feature Error: {0}")]
    Feature(String),

    #[error("Unknown Error: {0}")]
    Unknown(String),
}

// Implement conversion from standard errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        AppError::Conversion(err.to_string())
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(err: redb::DatabaseError) -> Self {
        AppError::Storage(format!("Database error: {}", err))
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(err: redb::TransactionError) -> Self {
        AppError::Storage(format!("Transaction error: {}", err))
    }
}

impl From<redb::TableError> for AppError {
    fn from(err: redb::TableError) -> Self {
        AppError::Storage(format!("Table error: {}", err))
    }
}

impl From<redb::StorageError> for AppError {
    fn from(err: redb::StorageError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(err: redb::CommitError) -> Self {
        AppError::Storage(format!("Commit error: {}", err))
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Unknown(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Unknown(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Returned by a feature that does not handle the requested action, so the
/// registry can move on to the next feature.
pub const ERR_UNSUPPORTED_ACTION: &str = "Unsupported action type";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features::unit_converter::Category;

    #[test]
    fn test_convert_error_maps_to_conversion() {
        let err: AppError = ConvertError::UnknownUnit {
            category: Category::Temperature,
            unit: "rankine".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Conversion(_)));
        assert!(err.to_string().contains("rankine"));
    }

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_value(AppError::Validation("bad".to_string())).unwrap();
        assert_eq!(json["type"], "Validation");
        assert_eq!(json["message"], "bad");
    }
}
