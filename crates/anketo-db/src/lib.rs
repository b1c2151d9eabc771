pub mod category;
pub mod question;
pub mod response;
pub mod survey;

pub use sea_orm;
use sea_orm::{DbErr, TransactionError};
use std::error::Error;

/// Collapses `TransactionError<E>` back into the mutation's own error type,
/// folding connection failures in through `From<DbErr>`.
pub trait FlattenTransactionResultExt<T> {
    fn flatten_res(self) -> T;
}

impl<T, E> FlattenTransactionResultExt<Result<T, E>> for Result<T, TransactionError<E>>
where
    E: From<DbErr> + Error,
{
    fn flatten_res(self) -> Result<T, E> {
        self.map_err(|err| match err {
            TransactionError::Connection(err) => err.into(),
            TransactionError::Transaction(err) => err,
        })
    }
}

/// Turns a missing row into `DbErr::RecordNotFound` at lookup sites that
/// expect the record to exist.
pub trait RequireRecord<T> {
    fn require(self) -> Result<T, DbErr>;
}

impl<T> RequireRecord<T> for Result<Option<T>, DbErr> {
    fn require(self) -> Result<T, DbErr> {
        self?.ok_or_else(|| DbErr::RecordNotFound("record not found".to_string()))
    }
}
