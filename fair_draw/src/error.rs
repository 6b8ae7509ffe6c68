// Error type for the Fair Draw core.
//
// Two kinds, matching how a caller should react: `InvalidType` when an
// argument is not the kind of value expected at all (a parameter token that
// is not a number), `InvalidRange` when it is the right kind but outside the
// allowed domain (negative parameter, zero total, blank text, empty array).
// Validation happens at the boundary of each public operation; nothing is
// retried or clamped here except step indices (see `params.rs`).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("invalid type: {0}")]
    InvalidType(String),

    #[error("out of range: {0}")]
    InvalidRange(String),
}

impl DrawError {
    pub fn is_invalid_type(&self) -> bool {
        matches!(self, DrawError::InvalidType(_))
    }

    pub fn is_invalid_range(&self) -> bool {
        matches!(self, DrawError::InvalidRange(_))
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;
