//! Core error type.
//!
//! Sub-crates define their own error enums and lift `CoreError` into them via
//! `From` so configuration failures surface unchanged at the top level.

use thiserror::Error;

use crate::OnuId;

/// Errors raised by `pon-core` validation and lookups.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} not found")]
    OnuNotFound(OnuId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `pon-core`.
pub type CoreResult<T> = Result<T, CoreError>;
