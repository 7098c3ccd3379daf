//! The [`ServiceError`] type returned by every service operation.

use models::{password::HashError, validation::ValidationErrors};
use sea_orm::{DbErr, SqlErr};
use std::fmt::Display;

/// Represents any error a service operation can return.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// No record matched the lookup.
    #[error("{entity} `{key}` not found")]
    NotFound {
        /// The kind of record, e.g. `"user"`.
        entity: &'static str,
        /// The id or username that was looked up.
        key: String,
    },
    /// One or more fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A uniqueness rule was violated when persisting, e.g. a seat that is
    /// already booked for the session.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// A foreign key pointed at a missing record.
    #[error("invalid reference: {0}")]
    InvalidReference(String),
    /// The password could not be hashed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    /// Any other database error.
    #[error(transparent)]
    Db(DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Validation error with a single message for `field`
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(ValidationErrors::single(field, message))
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => Self::ConstraintViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::InvalidReference(msg),
            _ => Self::Db(err),
        }
    }
}

impl From<HashError> for ServiceError {
    fn from(err: HashError) -> Self {
        Self::PasswordHash(err.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
