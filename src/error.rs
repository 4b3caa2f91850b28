use std::{env::VarError, io::Error as IO_ERROR, num::ParseIntError};

use bigdecimal::ParseBigDecimalError as BIG_DECIMAL_ERROR;
use serde_json::Error as JSON_ERROR;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    BigDecimalError(#[from] BIG_DECIMAL_ERROR),

    #[error("Field not exists: {0}")]
    FieldNotExist(String),

    #[error("Unexpected type for field {field}, expected {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Column not exists: {0}")]
    MissingColumn(String),

    #[error("Invalid period key: {0}")]
    InvalidPeriodKey(String),

    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    #[error("Invalid option {option}")]
    InvalidOption { option: String },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
