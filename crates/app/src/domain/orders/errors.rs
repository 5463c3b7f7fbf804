//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use tiffin::{payment::ParsePaymentMethodError, status::ParseOrderStatusError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error(transparent)]
    InvalidStatus(#[from] ParseOrderStatusError),

    #[error("delivery estimate out of range")]
    Timestamp(#[from] jiff::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

/// Errors raised by checkout. Nothing is written when any of these is returned.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    InvalidPaymentMethod(#[from] ParsePaymentMethodError),

    #[error("checkout failed and was rolled back")]
    Failed(#[source] CheckoutFailure),
}

/// Why a checkout was rolled back.
#[derive(Debug, Error)]
pub enum CheckoutFailure {
    #[error("checkout time out of range")]
    Timestamp(#[from] jiff::Error),

    #[error("storage error")]
    Sql(#[from] Error),
}

impl From<Error> for CheckoutError {
    fn from(error: Error) -> Self {
        Self::Failed(error.into())
    }
}

impl From<jiff::Error> for CheckoutError {
    fn from(error: jiff::Error) -> Self {
        Self::Failed(error.into())
    }
}
