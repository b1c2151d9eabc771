use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateError {
    #[error("date arithmetic overflowed")]
    Overflow,
}
