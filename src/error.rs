use num_bigint::BigUint;
use thiserror::Error;

/// Errors raised while building or loading a register.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LfsrError {
    /// The polynomial is too small for the model to derive any stage.
    #[error("polynomial {polynomial:#b} yields no register stages")]
    InvalidPolynomial { polynomial: BigUint },

    /// The state does not fit in the register.
    #[error("state {state:#b} does not fit in {field_order} bits")]
    StateOutOfRange { state: BigUint, field_order: usize },

    #[error("cannot compose a register from zero registers")]
    EmptyComposition,

    /// `2^field_order` rows cannot be addressed on this platform.
    #[error("state table for a {field_order}-bit register cannot be enumerated")]
    TableTooLarge { field_order: usize },

    #[error("invalid binary digit {0:?}")]
    InvalidDigit(char),
}

pub type Result<T> = std::result::Result<T, LfsrError>;
