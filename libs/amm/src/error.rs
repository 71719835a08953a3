//! Engine error types.
//!
//! Every fallible operation in this crate returns [`AmmError`]. Each variant
//! belongs to exactly one [`ErrorCategory`], which callers can use to decide
//! retryability: economic rejections may be retried with adjusted
//! parameters, everything else signals a caller or boundary-layer bug.
//!
//! No operation commits a partial state change: an error means the pool and
//! registry are byte-for-byte unchanged.

use thiserror::Error;
use types::ValueError;

/// Coarse classification of [`AmmError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller error (zero amounts, bad fee ratio, identical assets). Never
    /// retried as-is.
    InvalidParameter,
    /// Registration/lookup conflicts and lifecycle misuse.
    StateConflict,
    /// Economic rejection (slippage, liquidity floors). Retry with adjusted
    /// parameters is legitimate.
    InsufficientValue,
    /// Product or result outside the 64-bit range, or division by zero.
    ArithmeticOverflow,
}

/// Unified error enum for the pool engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmmError {
    // --- invalid-parameter ---
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("pool reserves must be non-zero")]
    EmptyReserves,

    #[error("fee {numerator}/{denominator} out of range (require denominator > numerator > 0)")]
    FeeOutOfRange { numerator: u64, denominator: u64 },

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Value(#[from] ValueError),

    // --- state-conflict ---
    #[error("pool already registered for {0}")]
    AlreadyRegistered(String),

    #[error("no pool registered for {0}")]
    NotRegistered(String),

    #[error("global pool registry already initialized")]
    RegistryAlreadyInitialized,

    #[error("global pool registry not initialized")]
    RegistryUninitialized,

    // --- insufficient-value ---
    #[error("computed output {computed} below caller minimum {minimum}")]
    OutputBelowMinimum { computed: u64, minimum: u64 },

    #[error("required input {required} above caller maximum {maximum}")]
    InputAboveMaximum { required: u64, maximum: u64 },

    #[error("implied deposit {implied} below caller minimum {minimum}")]
    DepositBelowMinimum { implied: u64, minimum: u64 },

    #[error("initial liquidity {initial} does not exceed the minimum-liquidity floor {floor}")]
    BelowMinimumLiquidity { initial: u64, floor: u64 },

    #[error("deposit too small: no liquidity units would be minted")]
    NothingMinted,

    #[error("burn of {requested} units exceeds redeemable supply {redeemable}")]
    InsufficientLiquidity { requested: u64, redeemable: u64 },

    #[error("withdrawal of {requested} exceeds reserve {available}")]
    InsufficientReserve { requested: u64, available: u64 },

    #[error("reserve {resulting} would exceed the pool ceiling {ceiling}")]
    PoolFull { resulting: u64, ceiling: u64 },

    // --- arithmetic-overflow ---
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),
}

impl AmmError {
    /// The taxonomy class of this error.
    pub fn category(&self) -> ErrorCategory {
        use AmmError::*;
        match self {
            ZeroAmount | EmptyReserves | FeeOutOfRange { .. } | InvalidConfig(_) => {
                ErrorCategory::InvalidParameter
            }
            Value(inner) => match inner {
                ValueError::ValueOverflow(..) => ErrorCategory::ArithmeticOverflow,
                _ => ErrorCategory::InvalidParameter,
            },
            AlreadyRegistered(_)
            | NotRegistered(_)
            | RegistryAlreadyInitialized
            | RegistryUninitialized => ErrorCategory::StateConflict,
            OutputBelowMinimum { .. }
            | InputAboveMaximum { .. }
            | DepositBelowMinimum { .. }
            | BelowMinimumLiquidity { .. }
            | NothingMinted
            | InsufficientLiquidity { .. }
            | InsufficientReserve { .. }
            | PoolFull { .. } => ErrorCategory::InsufficientValue,
            Overflow(_) | DivisionByZero(_) => ErrorCategory::ArithmeticOverflow,
        }
    }
}
